use anchor_lang::prelude::*;

#[event]
pub struct RandomnessRequested {
    pub config: Pubkey,
    pub request_id: u64,
    pub requester: Pubkey,
    pub tag: u64,
}

#[event]
pub struct RandomnessFulfilled {
    pub config: Pubkey,
    pub request_id: u64,
}
