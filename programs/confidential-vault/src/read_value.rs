use anchor_lang::prelude::*;
use crate::constants::{ENTROPY_SEED, VAULT_SEED};
use crate::state::{EntropyRequest, ValueVault};

/// Current value handle. Fails until the vault has been written.
pub fn handler(ctx: Context<ReadValue>) -> Result<u128> {
    let handle = ctx.accounts.vault.read()?;
    Ok(handle.0)
}

pub fn is_initialized(ctx: Context<ReadValue>) -> Result<bool> {
    Ok(ctx.accounts.vault.is_initialized())
}

/// Whether `request_id` is issued and not yet consumed. Unissued ids
/// report false.
pub fn is_request_outstanding(ctx: Context<ReadRequest>, _request_id: u64) -> Result<bool> {
    EntropyRequest::outstanding_at(&ctx.accounts.entropy_request)
}

#[derive(Accounts)]
pub struct ReadValue<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, ValueVault>,
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct ReadRequest<'info> {
    pub vault: Account<'info, ValueVault>,

    /// CHECK: seed-checked; may be empty for an unissued id
    #[account(
        seeds = [ENTROPY_SEED, vault.key().as_ref(), &request_id.to_le_bytes()],
        bump
    )]
    pub entropy_request: UncheckedAccount<'info>,
}
