#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod oracle;
pub mod state;
pub mod tracker;
pub mod transform;

#[cfg(test)]
mod testing;

pub mod initialize_vault;
pub mod store_value;
pub mod replace_value;
pub mod request_entropy;
pub mod consume_entropy;
pub mod store_with_entropy;
pub mod read_value;

use engine::EncryptedInput;
use initialize_vault::*;
use store_value::*;
use replace_value::*;
use request_entropy::*;
use consume_entropy::*;
use store_with_entropy::*;
use read_value::*;

declare_id!("7C6gvAngNSaxUPhG9yVWZeubuLVfeximF8gJ4hPRCYFP");

#[program]
pub mod confidential_vault {
    use super::*;

    /// Creates an empty vault bound to an oracle config
    pub fn initialize_vault(ctx: Context<InitializeVault>, oracle_config: Pubkey) -> Result<()> {
        initialize_vault::handler(ctx, oracle_config)
    }

    /// Stores a caller-encrypted value (first write or overwrite)
    pub fn store_value<'info>(
        ctx: Context<'_, '_, '_, 'info, StoreValue<'info>>,
        input: EncryptedInput,
    ) -> Result<()> {
        store_value::handler(ctx, input)
    }

    /// Replaces the value of an initialized vault
    pub fn replace_value<'info>(
        ctx: Context<'_, '_, '_, 'info, ReplaceValue<'info>>,
        input: EncryptedInput,
    ) -> Result<()> {
        replace_value::handler(ctx, input)
    }

    /// Pays the oracle fee and opens an entropy request, returning its id
    pub fn request_entropy(ctx: Context<RequestEntropy>, tag: u64, payment: u64) -> Result<u64> {
        request_entropy::handler(ctx, tag, payment)
    }

    /// Consumes a fulfilled request, returning the randomness handle
    pub fn consume_entropy<'info>(
        ctx: Context<'_, '_, '_, 'info, ConsumeEntropy<'info>>,
        request_id: u64,
    ) -> Result<u128> {
        consume_entropy::handler(ctx, request_id)
    }

    /// Stores input XOR the randomness of a fulfilled request, consuming it
    pub fn store_with_entropy<'info>(
        ctx: Context<'_, '_, '_, 'info, StoreWithEntropy<'info>>,
        input: EncryptedInput,
        request_id: u64,
    ) -> Result<()> {
        store_with_entropy::handler(ctx, input, request_id)
    }

    /// Returns the current value handle
    pub fn read_value(ctx: Context<ReadValue>) -> Result<u128> {
        read_value::handler(ctx)
    }

    /// Returns whether the vault has been written at least once
    pub fn is_initialized(ctx: Context<ReadValue>) -> Result<bool> {
        read_value::is_initialized(ctx)
    }

    /// Returns whether a request is issued and not yet consumed
    pub fn is_request_outstanding(ctx: Context<ReadRequest>, request_id: u64) -> Result<bool> {
        read_value::is_request_outstanding(ctx, request_id)
    }
}
