use anchor_lang::prelude::*;
use entropy_oracle::state::RandomnessRequest;
use inco_lightning::types::Euint128;
use crate::error::VaultError;

/// Issuing side of the randomness oracle
pub trait OracleRequests {
    /// Current fee in lamports
    fn fee(&self) -> Result<u64>;

    /// Pay `payment` and open a request. Returns the oracle's request id.
    fn request_randomness(&mut self, tag: u64, payment: u64) -> Result<u64>;
}

/// Fulfillment side of the randomness oracle
pub trait OracleFulfillments {
    fn is_fulfilled(&self, request_id: u64) -> Result<bool>;

    /// Fails while the request is unfulfilled
    fn fetch_randomness(&self, request_id: u64) -> Result<Euint128>;
}

/// Accounts the oracle needs to open a request
pub struct OracleRequestAccounts<'info> {
    pub oracle_program: AccountInfo<'info>,
    pub config: AccountInfo<'info>,
    pub request: AccountInfo<'info>,
    pub requester: AccountInfo<'info>,
    pub payer: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

/// Opens requests on the entropy oracle program, signing as the vault PDA
pub struct OracleRequestCpi<'a, 'info> {
    fee: u64,
    accounts: OracleRequestAccounts<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> OracleRequestCpi<'a, 'info> {
    pub fn new(
        fee: u64,
        accounts: OracleRequestAccounts<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            fee,
            accounts,
            signer_seeds,
        }
    }
}

impl<'a, 'info> OracleRequests for OracleRequestCpi<'a, 'info> {
    fn fee(&self) -> Result<u64> {
        Ok(self.fee)
    }

    fn request_randomness(&mut self, tag: u64, payment: u64) -> Result<u64> {
        let accounts = &self.accounts;
        let cpi_ctx = CpiContext::new_with_signer(
            accounts.oracle_program.clone(),
            entropy_oracle::cpi::accounts::RequestRandomness {
                config: accounts.config.clone(),
                request: accounts.request.clone(),
                requester: accounts.requester.clone(),
                payer: accounts.payer.clone(),
                system_program: accounts.system_program.clone(),
            },
            self.signer_seeds,
        );
        let request_id = entropy_oracle::cpi::request_randomness(cpi_ctx, tag, payment)?.get();
        Ok(request_id)
    }
}

/// Read-only view over one oracle request account
pub struct OracleRequestView<'a> {
    request: &'a RandomnessRequest,
}

impl<'a> OracleRequestView<'a> {
    pub fn new(request: &'a RandomnessRequest) -> Self {
        Self { request }
    }
}

impl<'a> OracleFulfillments for OracleRequestView<'a> {
    fn is_fulfilled(&self, request_id: u64) -> Result<bool> {
        require!(
            self.request.request_id == request_id,
            VaultError::UnknownRequest
        );
        Ok(self.request.fulfilled)
    }

    fn fetch_randomness(&self, request_id: u64) -> Result<Euint128> {
        require!(self.is_fulfilled(request_id)?, VaultError::NotFulfilled);
        Ok(self.request.randomness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::error_code;

    fn request(fulfilled: bool) -> RandomnessRequest {
        RandomnessRequest {
            config: Pubkey::new_unique(),
            request_id: 4,
            requester: Pubkey::new_unique(),
            tag: 0,
            paid: 10,
            fulfilled,
            randomness: Euint128(77),
            bump: 255,
        }
    }

    #[test]
    fn view_reports_fulfillment_for_its_own_id() {
        let pending = request(false);
        let view = OracleRequestView::new(&pending);
        assert!(!view.is_fulfilled(4).unwrap());
        let err = view.fetch_randomness(4).map(|h| h.0).unwrap_err();
        assert_eq!(error_code(err), u32::from(VaultError::NotFulfilled));

        let done = request(true);
        let view = OracleRequestView::new(&done);
        assert!(view.is_fulfilled(4).unwrap());
        assert_eq!(view.fetch_randomness(4).unwrap().0, 77);
    }

    #[test]
    fn view_rejects_other_ids() {
        let done = request(true);
        let view = OracleRequestView::new(&done);
        let err = view.is_fulfilled(5).unwrap_err();
        assert_eq!(error_code(err), u32::from(VaultError::UnknownRequest));
    }
}
