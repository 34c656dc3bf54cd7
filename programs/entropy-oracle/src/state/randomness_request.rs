use anchor_lang::prelude::*;
use inco_lightning::types::Euint128;
use crate::error::OracleError;

/// One randomness request and, once fulfilled, its encrypted result
#[account]
pub struct RandomnessRequest {
    /// Oracle config this request belongs to
    pub config: Pubkey,
    /// Oracle-assigned request id
    pub request_id: u64,
    /// Who asked for randomness (may be a PDA of the calling program)
    pub requester: Pubkey,
    /// Caller-chosen metadata, not interpreted by the oracle
    pub tag: u64,
    /// Lamports paid with the request
    pub paid: u64,
    /// Whether randomness is available
    pub fulfilled: bool,
    /// The encrypted random value handle
    pub randomness: Euint128,
    /// Bump seed for PDA
    pub bump: u8,
}

impl RandomnessRequest {
    /// 8 (discriminator) + 32 (config) + 8 (request_id) + 32 (requester)
    /// + 8 (tag) + 8 (paid) + 1 (fulfilled) + 16 (Euint128) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 8 + 32 + 8 + 8 + 1 + 16 + 1;

    /// Attach the randomness. A request is fulfilled once.
    pub fn fulfill(&mut self, randomness: Euint128) -> Result<()> {
        require!(!self.fulfilled, OracleError::AlreadyFulfilled);
        self.randomness = randomness;
        self.fulfilled = true;
        Ok(())
    }

    /// Fetch the randomness, failing until the request is fulfilled
    pub fn randomness(&self) -> Result<Euint128> {
        require!(self.fulfilled, OracleError::NotFulfilled);
        Ok(self.randomness)
    }
}
