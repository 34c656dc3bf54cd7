use anchor_lang::prelude::*;
use inco_lightning::cpi::accounts::Operation;
use inco_lightning::cpi::e_rand;
use inco_lightning::program::IncoLightning;
use crate::constants::{INCO_OPERAND_BYTE, REQUEST_SEED};
use crate::error::OracleError;
use crate::events::RandomnessFulfilled;
use crate::state::{OracleConfig, RandomnessRequest};

/// Authority fulfills a request with a fresh encrypted random value
///
/// The value is produced by Inco's `e_rand`, so neither the authority
/// nor the requester learns it in the clear.
pub fn handler(ctx: Context<FulfillRandomness>, request_id: u64) -> Result<()> {
    let request = &mut ctx.accounts.request;
    require!(!request.fulfilled, OracleError::AlreadyFulfilled);

    let cpi_ctx = CpiContext::new(
        ctx.accounts.inco_lightning_program.to_account_info(),
        Operation {
            signer: ctx.accounts.authority.to_account_info(),
        },
    );
    let randomness = e_rand(cpi_ctx, INCO_OPERAND_BYTE)?;
    request.fulfill(randomness)?;

    emit!(RandomnessFulfilled {
        config: ctx.accounts.config.key(),
        request_id,
    });
    msg!("Randomness request {} fulfilled", request_id);

    Ok(())
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomness<'info> {
    #[account(
        has_one = authority @ OracleError::NotAuthority
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [REQUEST_SEED, config.key().as_ref(), &request_id.to_le_bytes()],
        bump = request.bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// Inco Lightning program for FHE operations
    pub inco_lightning_program: Program<'info, IncoLightning>,
}
