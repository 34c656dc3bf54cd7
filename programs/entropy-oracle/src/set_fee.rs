use anchor_lang::prelude::*;
use crate::error::OracleError;
use crate::state::OracleConfig;

/// Authority updates the request fee. Applies to requests issued afterwards.
pub fn handler(ctx: Context<SetFee>, fee: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let previous = config.fee;
    config.fee = fee;

    msg!("Oracle fee changed from {} to {}", previous, fee);
    Ok(())
}

#[derive(Accounts)]
pub struct SetFee<'info> {
    #[account(
        mut,
        has_one = authority @ OracleError::NotAuthority
    )]
    pub config: Account<'info, OracleConfig>,

    pub authority: Signer<'info>,
}
