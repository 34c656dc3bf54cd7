use anchor_lang::prelude::*;
use inco_lightning::cpi::accounts::Allow;
use inco_lightning::cpi::allow;
use inco_lightning::program::IncoLightning;
use crate::constants::REQUEST_SEED;
use crate::error::OracleError;
use crate::state::{OracleConfig, RandomnessRequest};

/// Grant the requester permission on a fulfilled randomness handle
///
/// Must be called after fulfill_randomness and before the requester
/// consumes the value.
pub fn handler(ctx: Context<AllowRequester>, request_id: u64) -> Result<()> {
    let request = &ctx.accounts.request;
    let handle = request.randomness()?;

    allow(
        CpiContext::new(
            ctx.accounts.inco_lightning_program.to_account_info(),
            Allow {
                allowance_account: ctx.accounts.allowance_account.to_account_info(),
                signer: ctx.accounts.authority.to_account_info(),
                allowed_address: ctx.accounts.requester.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
            },
        ),
        handle.0,
        true,
        request.requester,
    )?;

    msg!("Requester {} allowed on request {}", request.requester, request_id);
    Ok(())
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct AllowRequester<'info> {
    #[account(
        has_one = authority @ OracleError::NotAuthority
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [REQUEST_SEED, config.key().as_ref(), &request_id.to_le_bytes()],
        bump = request.bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// CHECK: must match the requester recorded on the request
    #[account(address = request.requester)]
    pub requester: UncheckedAccount<'info>,

    /// Allowance account PDA for Inco
    /// CHECK: This is derived by Inco Lightning program
    #[account(mut)]
    pub allowance_account: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}
