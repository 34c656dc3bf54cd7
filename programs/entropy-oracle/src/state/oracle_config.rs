use anchor_lang::prelude::*;
use crate::error::OracleError;

/// Oracle configuration and request counter
#[account]
pub struct OracleConfig {
    /// Authority allowed to fulfill requests and change the fee
    pub authority: Pubkey,
    /// Minimum payment in lamports for one request
    pub fee: u64,
    /// Id the next request will receive
    pub next_request_id: u64,
    /// Lamports collected from requesters
    pub collected: u64,
    /// Bump seed for PDA
    pub bump: u8,
}

impl OracleConfig {
    /// 8 (discriminator) + 32 (authority) + 8 (fee) + 8 (next_request_id)
    /// + 8 (collected) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 8 + 8 + 8 + 1;

    /// Reject payments below the current fee
    fn check_payment(&self, payment: u64) -> Result<()> {
        require!(payment >= self.fee, OracleError::InsufficientFee);
        Ok(())
    }

    /// Hand out the next request id and record the payment.
    /// Ids are strictly increasing and never reused.
    pub fn issue_request_id(&mut self, payment: u64) -> Result<u64> {
        self.check_payment(payment)?;
        let request_id = self.next_request_id;
        self.next_request_id = request_id
            .checked_add(1)
            .ok_or(OracleError::RequestIdOverflow)?;
        self.collected = self.collected.saturating_add(payment);
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIRST_REQUEST_ID;

    fn config(fee: u64) -> OracleConfig {
        OracleConfig {
            authority: Pubkey::new_unique(),
            fee,
            next_request_id: FIRST_REQUEST_ID,
            collected: 0,
            bump: 255,
        }
    }

    fn error_code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            anchor_lang::error::Error::ProgramError(_) => u32::MAX,
        }
    }

    #[test]
    fn payment_below_fee_is_rejected_without_consuming_an_id() {
        let mut config = config(500);
        let err = config.issue_request_id(499).unwrap_err();
        assert_eq!(error_code(err), u32::from(OracleError::InsufficientFee));
        assert_eq!(config.next_request_id, FIRST_REQUEST_ID);
        assert_eq!(config.collected, 0);
    }

    #[test]
    fn exact_fee_is_accepted_once_per_call() {
        let mut config = config(500);
        assert!(config.check_payment(500).is_ok());
        assert_eq!(config.issue_request_id(500).unwrap(), FIRST_REQUEST_ID);
        assert_eq!(config.collected, 500);
    }

    #[test]
    fn ids_increase_and_payments_accumulate() {
        let mut config = config(500);
        assert_eq!(config.issue_request_id(500).unwrap(), 1);
        assert_eq!(config.issue_request_id(900).unwrap(), 2);
        assert_eq!(config.next_request_id, 3);
        assert_eq!(config.collected, 1400);
    }

    #[test]
    fn zero_fee_accepts_zero_payment() {
        let mut config = config(0);
        assert_eq!(config.issue_request_id(0).unwrap(), 1);
    }

    #[test]
    fn exhausted_id_space_fails() {
        let mut config = config(0);
        config.next_request_id = u64::MAX;
        let err = config.issue_request_id(0).unwrap_err();
        assert_eq!(error_code(err), u32::from(OracleError::RequestIdOverflow));
        assert_eq!(config.next_request_id, u64::MAX);
    }
}
