use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use super::RequestStatus;
use crate::error::VaultError;

/// Vault-side record of one entropy request
#[account]
pub struct EntropyRequest {
    /// Vault the request was issued for
    pub vault: Pubkey,
    /// Oracle-assigned request id (0 until issued)
    pub request_id: u64,
    /// Who paid for the request
    pub requester: Pubkey,
    /// Caller-chosen metadata
    pub tag: u64,
    /// None until issued
    pub status: Option<RequestStatus>,
    /// Bump seed for PDA
    pub bump: u8,
}

impl EntropyRequest {
    /// 8 (discriminator) + 32 (vault) + 8 (request_id) + 32 (requester)
    /// + 8 (tag) + 2 (Option<RequestStatus>) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 8 + 32 + 8 + 2 + 1;

    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, Some(RequestStatus::Outstanding))
    }

    /// Read the record behind `info`. None when the PDA was never created,
    /// i.e. the request id was never issued for this vault.
    pub fn load(info: &AccountInfo) -> Result<Option<EntropyRequest>> {
        if info.data_is_empty() {
            return Ok(None);
        }
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::AccountOwnedByWrongProgram);

        let data = info.try_borrow_data()?;
        let mut bytes: &[u8] = &data[..];
        let record = EntropyRequest::try_deserialize(&mut bytes)?;
        Ok(Some(record))
    }

    /// Like `load`, but an unissued id is an error
    pub fn load_issued(info: &AccountInfo) -> Result<EntropyRequest> {
        Self::load(info)?.ok_or_else(|| error!(VaultError::UnknownRequest))
    }

    pub fn outstanding_at(info: &AccountInfo) -> Result<bool> {
        Ok(Self::load(info)?.is_some_and(|record| record.is_outstanding()))
    }

    /// Write the record back into `info`
    pub fn save(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }
}

/// Storage for request statuses keyed by request id
pub trait RequestLedger {
    fn status(&self, request_id: u64) -> Option<RequestStatus>;

    /// Record a freshly issued request as outstanding
    fn open(&mut self, request_id: u64) -> Result<()>;

    /// Move an outstanding request to consumed
    fn close(&mut self, request_id: u64) -> Result<()>;
}

impl RequestLedger for BTreeMap<u64, RequestStatus> {
    fn status(&self, request_id: u64) -> Option<RequestStatus> {
        self.get(&request_id).copied()
    }

    fn open(&mut self, request_id: u64) -> Result<()> {
        require!(
            !self.contains_key(&request_id),
            VaultError::DuplicateRequest
        );
        self.insert(request_id, RequestStatus::Outstanding);
        Ok(())
    }

    fn close(&mut self, request_id: u64) -> Result<()> {
        let status = self
            .get_mut(&request_id)
            .ok_or_else(|| error!(VaultError::UnknownRequest))?;
        *status = status.consume()?;
        Ok(())
    }
}

/// Ledger over a single on-chain `EntropyRequest` account
///
/// The account's PDA is derived from one request id, so the slot only
/// answers for that id.
pub struct RecordSlot<'a> {
    record: &'a mut EntropyRequest,
    request_id: u64,
}

impl<'a> RecordSlot<'a> {
    pub fn new(record: &'a mut EntropyRequest, request_id: u64) -> Self {
        Self { record, request_id }
    }
}

impl<'a> RequestLedger for RecordSlot<'a> {
    fn status(&self, request_id: u64) -> Option<RequestStatus> {
        if request_id != self.request_id || self.record.request_id != request_id {
            return None;
        }
        self.record.status
    }

    fn open(&mut self, request_id: u64) -> Result<()> {
        require!(request_id == self.request_id, VaultError::RequestIdMismatch);
        require!(self.record.status.is_none(), VaultError::DuplicateRequest);
        self.record.request_id = request_id;
        self.record.status = Some(RequestStatus::Outstanding);
        Ok(())
    }

    fn close(&mut self, request_id: u64) -> Result<()> {
        let status = self
            .status(request_id)
            .ok_or_else(|| error!(VaultError::UnknownRequest))?;
        self.record.status = Some(status.consume()?);
        Ok(())
    }
}
