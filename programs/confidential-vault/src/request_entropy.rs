use anchor_lang::prelude::*;
use entropy_oracle::program::EntropyOracle;
use entropy_oracle::state::OracleConfig;
use crate::constants::{ENTROPY_SEED, VAULT_SEED};
use crate::error::VaultError;
use crate::oracle::{OracleRequestAccounts, OracleRequestCpi};
use crate::state::{EntropyRequest, RecordSlot, ValueVault};
use crate::tracker::EntropyRequestTracker;

/// Pay the oracle fee and open an entropy request for the vault
///
/// The vault PDA signs as requester. Both the oracle request and the
/// vault's record are derived from `oracle_config.next_request_id`;
/// the id the oracle returns must match it.
///
/// Returns the request id.
pub fn handler(ctx: Context<RequestEntropy>, tag: u64, payment: u64) -> Result<u64> {
    let vault_key = ctx.accounts.vault.key();
    let authority = ctx.accounts.vault.authority;
    let bump = [ctx.accounts.vault.bump];
    let seeds: &[&[u8]] = &[VAULT_SEED, authority.as_ref(), &bump];
    let signer_seeds = &[seeds];

    let expected_id = ctx.accounts.oracle_config.next_request_id;
    let mut oracle = OracleRequestCpi::new(
        ctx.accounts.oracle_config.fee,
        OracleRequestAccounts {
            oracle_program: ctx.accounts.oracle_program.to_account_info(),
            config: ctx.accounts.oracle_config.to_account_info(),
            request: ctx.accounts.oracle_request.to_account_info(),
            requester: ctx.accounts.vault.to_account_info(),
            payer: ctx.accounts.caller.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
        signer_seeds,
    );
    let caller = ctx.accounts.caller.key();

    // ===== ISSUE =====
    let (request_id, event) = {
        let mut slot = RecordSlot::new(&mut ctx.accounts.entropy_request, expected_id);
        let mut tracker = EntropyRequestTracker::new(vault_key, &mut slot);
        tracker.issue(&mut oracle, caller, tag, payment)?
    };

    // ===== RECORD METADATA =====
    let record = &mut ctx.accounts.entropy_request;
    record.vault = vault_key;
    record.requester = caller;
    record.tag = tag;
    record.bump = ctx.bumps.entropy_request;

    emit!(event);
    msg!("Entropy request {} opened by {} (tag {})", request_id, caller, tag);

    Ok(request_id)
}

#[derive(Accounts)]
pub struct RequestEntropy<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, ValueVault>,

    #[account(
        mut,
        address = vault.oracle_config @ VaultError::OracleMismatch
    )]
    pub oracle_config: Account<'info, OracleConfig>,

    /// CHECK: created and seed-checked by the oracle program during the CPI
    #[account(mut)]
    pub oracle_request: UncheckedAccount<'info>,

    #[account(
        init,
        payer = caller,
        space = EntropyRequest::LEN,
        seeds = [ENTROPY_SEED, vault.key().as_ref(), &oracle_config.next_request_id.to_le_bytes()],
        bump
    )]
    pub entropy_request: Account<'info, EntropyRequest>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub oracle_program: Program<'info, EntropyOracle>,

    pub system_program: Program<'info, System>,
}
