use anchor_lang::prelude::*;

pub mod value_vault;
pub mod entropy_request;

pub use value_vault::*;
pub use entropy_request::*;

/// Lifecycle of one entropy request as seen by the vault
///
/// Unissued requests have no status at all. `Consumed` is terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RequestStatus {
    /// Issued, randomness not yet used
    Outstanding = 0,
    /// Randomness used to transform the vault value
    Consumed = 1,
}

impl RequestStatus {
    /// The only transition: Outstanding -> Consumed
    pub fn consume(self) -> Result<RequestStatus> {
        match self {
            RequestStatus::Outstanding => Ok(RequestStatus::Consumed),
            RequestStatus::Consumed => err!(crate::error::VaultError::AlreadyConsumed),
        }
    }
}
