use anchor_lang::prelude::*;

#[error_code]
pub enum OracleError {
    #[msg("Payment is below the oracle fee")]
    InsufficientFee,

    #[msg("Only the oracle authority can perform this action")]
    NotAuthority,

    #[msg("Request already fulfilled")]
    AlreadyFulfilled,

    #[msg("Request not yet fulfilled")]
    NotFulfilled,

    #[msg("Request id space exhausted")]
    RequestIdOverflow,
}
