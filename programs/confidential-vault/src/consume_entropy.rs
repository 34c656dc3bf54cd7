use anchor_lang::prelude::*;
use entropy_oracle::state::RandomnessRequest;
use inco_lightning::program::IncoLightning;
use crate::constants::{ENTROPY_SEED, VAULT_SEED};
use crate::error::VaultError;
use crate::engine::IncoEngine;
use crate::oracle::OracleRequestView;
use crate::state::{EntropyRequest, RecordSlot, ValueVault};
use crate::tracker::EntropyRequestTracker;

/// Consume a fulfilled entropy request without touching the vault value
///
/// The vault is granted permission on the randomness handle and the
/// request is retired. Returns the randomness handle.
///
/// remaining_accounts[0]: Inco allowance account for (randomness, vault)
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ConsumeEntropy<'info>>,
    request_id: u64,
) -> Result<u128> {
    let vault_key = ctx.accounts.vault.key();
    let caller = ctx.accounts.caller.key();
    let mut engine = IncoEngine::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.caller.to_account_info(),
        ctx.accounts.inco_lightning_program.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
    );

    let oracle = OracleRequestView::new(&ctx.accounts.oracle_request);
    let mut record = EntropyRequest::load_issued(&ctx.accounts.entropy_request)?;
    let (randomness, event) = {
        let mut slot = RecordSlot::new(&mut record, request_id);
        let mut tracker = EntropyRequestTracker::new(vault_key, &mut slot);
        tracker.consume(&oracle, &mut engine, request_id, caller)?
    };
    record.save(&ctx.accounts.entropy_request)?;
    emit!(event);

    Ok(randomness.handle().0)
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct ConsumeEntropy<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, ValueVault>,

    #[account(
        constraint = oracle_request.config == vault.oracle_config @ VaultError::OracleMismatch,
        constraint = oracle_request.requester == vault.key() @ VaultError::UnknownRequest
    )]
    pub oracle_request: Account<'info, RandomnessRequest>,

    /// CHECK: seed-checked; empty when `request_id` was never issued,
    /// otherwise deserialized by `EntropyRequest::load`
    #[account(
        mut,
        seeds = [ENTROPY_SEED, vault.key().as_ref(), &request_id.to_le_bytes()],
        bump
    )]
    pub entropy_request: UncheckedAccount<'info>,

    #[account(mut)]
    pub caller: Signer<'info>,

    /// Inco Lightning program for FHE operations
    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}
