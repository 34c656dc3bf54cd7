#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod state;

pub mod initialize_oracle;
pub mod set_fee;
pub mod request_randomness;
pub mod fulfill_randomness;
pub mod allow_requester;

use initialize_oracle::*;
use set_fee::*;
use request_randomness::*;
use fulfill_randomness::*;
use allow_requester::*;

declare_id!("CFFnW8RyjfJpgUS3zWNmKv5ssaQyi5T9J2FNbEkwq93g");

#[program]
pub mod entropy_oracle {
    use super::*;

    /// Creates the oracle config with its request fee
    pub fn initialize_oracle(ctx: Context<InitializeOracle>, fee: u64) -> Result<()> {
        initialize_oracle::handler(ctx, fee)
    }

    /// Authority changes the request fee
    pub fn set_fee(ctx: Context<SetFee>, fee: u64) -> Result<()> {
        set_fee::handler(ctx, fee)
    }

    /// Pays the fee and opens a request, returning its id
    pub fn request_randomness(
        ctx: Context<RequestRandomness>,
        tag: u64,
        payment: u64,
    ) -> Result<u64> {
        request_randomness::handler(ctx, tag, payment)
    }

    /// Authority attaches encrypted randomness to a request
    pub fn fulfill_randomness(ctx: Context<FulfillRandomness>, request_id: u64) -> Result<()> {
        fulfill_randomness::handler(ctx, request_id)
    }

    /// Authority grants the requester permission on the fulfilled handle
    pub fn allow_requester(ctx: Context<AllowRequester>, request_id: u64) -> Result<()> {
        allow_requester::handler(ctx, request_id)
    }
}
