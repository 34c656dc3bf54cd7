use anchor_lang::prelude::*;
use entropy_oracle::state::OracleConfig;
use inco_lightning::types::Euint128;
use crate::constants::VAULT_SEED;
use crate::error::VaultError;
use crate::state::ValueVault;

/// Create an empty vault bound to one oracle config
pub fn handler(ctx: Context<InitializeVault>, oracle_config: Pubkey) -> Result<()> {
    require_keys_neq!(oracle_config, Pubkey::default(), VaultError::InvalidOracle);

    let vault = &mut ctx.accounts.vault;
    vault.authority = ctx.accounts.authority.key();
    vault.oracle_config = oracle_config;
    vault.value = Euint128::default();
    vault.initialized = false;
    vault.bump = ctx.bumps.vault;

    msg!("Vault {} created with oracle {}", vault.key(), oracle_config);
    Ok(())
}

#[derive(Accounts)]
#[instruction(oracle_config: Pubkey)]
pub struct InitializeVault<'info> {
    #[account(
        init,
        payer = authority,
        space = ValueVault::LEN,
        seeds = [VAULT_SEED, authority.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, ValueVault>,

    /// Oracle the vault will request entropy from
    #[account(address = oracle_config @ VaultError::OracleMismatch)]
    pub oracle: Account<'info, OracleConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
