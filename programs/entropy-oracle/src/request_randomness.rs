use anchor_lang::prelude::*;
use anchor_lang::system_program;
use inco_lightning::types::Euint128;
use crate::constants::{ORACLE_SEED, REQUEST_SEED};
use crate::events::RandomnessRequested;
use crate::state::{OracleConfig, RandomnessRequest};

/// Pay the fee and open a randomness request
///
/// The full payment moves from `payer` into the config PDA. The request
/// PDA is derived from the id the config will hand out, so callers derive
/// it from `config.next_request_id` before sending the transaction.
///
/// Returns the new request id.
pub fn handler(ctx: Context<RequestRandomness>, tag: u64, payment: u64) -> Result<u64> {
    // ===== ISSUE ID =====
    let config_key = ctx.accounts.config.key();
    let request_id = ctx.accounts.config.issue_request_id(payment)?;

    // ===== COLLECT PAYMENT =====
    if payment > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.config.to_account_info(),
                },
            ),
            payment,
        )?;
    }

    // ===== RECORD REQUEST =====
    let request = &mut ctx.accounts.request;
    request.config = config_key;
    request.request_id = request_id;
    request.requester = ctx.accounts.requester.key();
    request.tag = tag;
    request.paid = payment;
    request.fulfilled = false;
    request.randomness = Euint128::default();
    request.bump = ctx.bumps.request;

    emit!(RandomnessRequested {
        config: config_key,
        request_id,
        requester: request.requester,
        tag,
    });
    msg!("Randomness request {} opened by {}", request_id, request.requester);

    Ok(request_id)
}

#[derive(Accounts)]
pub struct RequestRandomness<'info> {
    #[account(
        mut,
        seeds = [ORACLE_SEED, config.authority.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        init,
        payer = payer,
        space = RandomnessRequest::LEN,
        seeds = [REQUEST_SEED, config.key().as_ref(), &config.next_request_id.to_le_bytes()],
        bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    /// Identity recorded on the request
    pub requester: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
