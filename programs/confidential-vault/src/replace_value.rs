use anchor_lang::prelude::*;
use inco_lightning::program::IncoLightning;
use crate::constants::VAULT_SEED;
use crate::engine::{EncryptedInput, IncoEngine};
use crate::state::ValueVault;

/// Overwrite the value of an already initialized vault
///
/// remaining_accounts[0]: Inco allowance account for (new handle, vault)
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ReplaceValue<'info>>,
    input: EncryptedInput,
) -> Result<()> {
    let mut engine = IncoEngine::new(
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.caller.to_account_info(),
        ctx.accounts.inco_lightning_program.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
    );
    let caller = ctx.accounts.caller.key();

    let event = ctx.accounts.vault.replace(&mut engine, &input, caller)?;
    emit!(event);

    msg!("Value updated in vault {} by {}", ctx.accounts.vault.key(), caller);
    Ok(())
}

#[derive(Accounts)]
pub struct ReplaceValue<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.authority.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, ValueVault>,

    #[account(mut)]
    pub caller: Signer<'info>,

    /// Inco Lightning program for FHE operations
    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}
