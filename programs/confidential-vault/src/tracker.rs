use anchor_lang::prelude::*;
use crate::engine::{Allowed, ConfidentialEngine};
use crate::error::VaultError;
use crate::events::{EntropyConsumed, RandomnessRequested};
use crate::oracle::{OracleFulfillments, OracleRequests};
use crate::state::{RequestLedger, RequestStatus};

/// Checked, not yet committed consumption of one request.
///
/// Produced by `prepare_consume` after every external read has
/// succeeded. Nothing is mutated until it is passed to `commit`.
#[must_use]
pub struct ConsumeTicket {
    request_id: u64,
    randomness: Allowed,
}

impl ConsumeTicket {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn randomness(&self) -> &Allowed {
        &self.randomness
    }
}

/// Issues entropy requests for one vault and retires them on use
pub struct EntropyRequestTracker<'a, L: RequestLedger> {
    vault: Pubkey,
    ledger: &'a mut L,
}

impl<'a, L: RequestLedger> EntropyRequestTracker<'a, L> {
    pub fn new(vault: Pubkey, ledger: &'a mut L) -> Self {
        Self { vault, ledger }
    }

    pub fn status(&self, request_id: u64) -> Option<RequestStatus> {
        self.ledger.status(request_id)
    }

    /// Pay the oracle and record the new request as outstanding.
    ///
    /// `tag` is forwarded metadata; two calls with the same tag open two
    /// independent requests.
    pub fn issue<O: OracleRequests>(
        &mut self,
        oracle: &mut O,
        caller: Pubkey,
        tag: u64,
        payment: u64,
    ) -> Result<(u64, RandomnessRequested)> {
        let fee = oracle.fee()?;
        require!(payment >= fee, VaultError::InsufficientFee);

        let request_id = oracle.request_randomness(tag, payment)?;
        self.ledger.open(request_id)?;

        msg!("Entropy request {} issued for vault {}", request_id, self.vault);
        Ok((
            request_id,
            RandomnessRequested {
                vault: self.vault,
                request_id,
                caller,
            },
        ))
    }

    /// Run every check and external read needed to consume `request_id`
    /// without touching the ledger.
    pub fn prepare_consume<O, E>(
        &self,
        oracle: &O,
        engine: &mut E,
        request_id: u64,
    ) -> Result<ConsumeTicket>
    where
        O: OracleFulfillments,
        E: ConfidentialEngine,
    {
        match self.ledger.status(request_id) {
            None => return err!(VaultError::UnknownRequest),
            Some(RequestStatus::Consumed) => return err!(VaultError::AlreadyConsumed),
            Some(RequestStatus::Outstanding) => {}
        }
        require!(oracle.is_fulfilled(request_id)?, VaultError::NotFulfilled);

        let handle = oracle.fetch_randomness(request_id)?;
        let randomness = engine.grant(handle)?;

        Ok(ConsumeTicket {
            request_id,
            randomness,
        })
    }

    /// Retire the ticket's request and hand back its permitted randomness
    pub fn commit(&mut self, ticket: ConsumeTicket) -> Result<Allowed> {
        self.ledger.close(ticket.request_id)?;
        msg!("Entropy request {} consumed", ticket.request_id);
        Ok(ticket.randomness)
    }

    /// Consume a fulfilled request in one step
    pub fn consume<O, E>(
        &mut self,
        oracle: &O,
        engine: &mut E,
        request_id: u64,
        caller: Pubkey,
    ) -> Result<(Allowed, EntropyConsumed)>
    where
        O: OracleFulfillments,
        E: ConfidentialEngine,
    {
        let ticket = self.prepare_consume(oracle, engine, request_id)?;
        let randomness = self.commit(ticket)?;
        Ok((
            randomness,
            EntropyConsumed {
                vault: self.vault,
                request_id,
                caller,
            },
        ))
    }
}
