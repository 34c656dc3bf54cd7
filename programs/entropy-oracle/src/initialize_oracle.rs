use anchor_lang::prelude::*;
use crate::constants::{FIRST_REQUEST_ID, ORACLE_SEED};
use crate::state::OracleConfig;

/// Create the oracle config owned by `authority`
pub fn handler(ctx: Context<InitializeOracle>, fee: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.authority = ctx.accounts.authority.key();
    config.fee = fee;
    config.next_request_id = FIRST_REQUEST_ID;
    config.collected = 0;
    config.bump = ctx.bumps.config;

    msg!("Oracle {} initialized with fee {}", config.key(), fee);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeOracle<'info> {
    #[account(
        init,
        payer = authority,
        space = OracleConfig::LEN,
        seeds = [ORACLE_SEED, authority.key().as_ref()],
        bump
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
