use anchor_lang::prelude::*;

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStored {
    pub vault: Pubkey,
    pub caller: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueUpdated {
    pub vault: Pubkey,
    pub caller: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomnessRequested {
    pub vault: Pubkey,
    pub request_id: u64,
    pub caller: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyConsumed {
    pub vault: Pubkey,
    pub request_id: u64,
    pub caller: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStoredWithEntropy {
    pub vault: Pubkey,
    pub request_id: u64,
    pub caller: Pubkey,
}
