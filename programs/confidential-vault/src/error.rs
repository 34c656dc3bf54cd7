use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Oracle address must not be the default pubkey")]
    InvalidOracle,

    #[msg("Oracle account does not match the vault configuration")]
    OracleMismatch,

    #[msg("Encrypted input rejected")]
    InvalidInput,

    #[msg("Handle has no permission grant for this vault")]
    PermissionMissing,

    #[msg("Missing allowance account for permission grant")]
    MissingAllowanceAccount,

    #[msg("Vault value not initialized")]
    Uninitialized,

    #[msg("Payment is below the oracle fee")]
    InsufficientFee,

    #[msg("Unknown entropy request")]
    UnknownRequest,

    #[msg("Entropy request already consumed")]
    AlreadyConsumed,

    #[msg("Entropy request not yet fulfilled")]
    NotFulfilled,

    #[msg("Oracle returned an unexpected request id")]
    RequestIdMismatch,

    #[msg("Entropy request already recorded")]
    DuplicateRequest,
}

/// Coarse failure classes surfaced to callers
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Precondition,
    Fee,
    RequestState,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::InvalidOracle | VaultError::OracleMismatch => ErrorKind::Configuration,
            VaultError::InvalidInput
            | VaultError::PermissionMissing
            | VaultError::MissingAllowanceAccount => ErrorKind::Validation,
            VaultError::Uninitialized => ErrorKind::Precondition,
            VaultError::InsufficientFee => ErrorKind::Fee,
            VaultError::UnknownRequest
            | VaultError::AlreadyConsumed
            | VaultError::NotFulfilled
            | VaultError::RequestIdMismatch
            | VaultError::DuplicateRequest => ErrorKind::RequestState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_share_one_kind() {
        for err in [
            VaultError::UnknownRequest,
            VaultError::AlreadyConsumed,
            VaultError::NotFulfilled,
            VaultError::RequestIdMismatch,
            VaultError::DuplicateRequest,
        ] {
            assert_eq!(err.kind(), ErrorKind::RequestState);
        }
    }

    #[test]
    fn each_taxonomy_bucket_is_reachable() {
        assert_eq!(VaultError::InvalidOracle.kind(), ErrorKind::Configuration);
        assert_eq!(VaultError::InvalidInput.kind(), ErrorKind::Validation);
        assert_eq!(VaultError::Uninitialized.kind(), ErrorKind::Precondition);
        assert_eq!(VaultError::InsufficientFee.kind(), ErrorKind::Fee);
    }
}
