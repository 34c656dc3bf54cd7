//! In-memory engine and oracle doubles for host tests

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;
use inco_lightning::types::Euint128;
use crate::engine::{xor_from_primitives, Allowed, BitwiseOps, ConfidentialEngine, EncryptedInput};
use crate::error::VaultError;
use crate::oracle::{OracleFulfillments, OracleRequests};
use crate::state::ValueVault;

/// Engine that keeps cleartexts next to handles so tests can look inside
pub struct MockEngine {
    identity: Pubkey,
    next_handle: u128,
    values: BTreeMap<u128, u128>,
    granted: BTreeSet<u128>,
    conversions: usize,
    fail_grants: bool,
    fail_combines: bool,
}

impl MockEngine {
    pub fn new(identity: Pubkey) -> Self {
        Self {
            identity,
            next_handle: 1,
            values: BTreeMap::new(),
            granted: BTreeSet::new(),
            conversions: 0,
            fail_grants: false,
            fail_combines: false,
        }
    }

    /// Mint a handle for `cleartext` without going through input validation
    pub fn encrypt(&mut self, cleartext: u128) -> Euint128 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.values.insert(handle, cleartext);
        Euint128(handle)
    }

    pub fn decrypt(&self, handle: Euint128) -> Option<u128> {
        self.values.get(&handle.0).copied()
    }

    fn cleartext(&self, handle: Euint128) -> Result<u128> {
        self.decrypt(handle)
            .ok_or_else(|| error!(VaultError::InvalidInput))
    }

    pub fn is_granted(&self, handle: Euint128) -> bool {
        self.granted.contains(&handle.0)
    }

    pub fn conversions(&self) -> usize {
        self.conversions
    }

    pub fn fail_grants(&mut self) {
        self.fail_grants = true;
    }

    pub fn fail_combines(&mut self) {
        self.fail_combines = true;
    }
}

impl ConfidentialEngine for MockEngine {
    fn identity(&self) -> Pubkey {
        self.identity
    }

    fn convert_external(&mut self, input: &EncryptedInput) -> Result<Euint128> {
        require!(
            !input.ciphertext.is_empty() && input.ciphertext.len() <= 16,
            VaultError::InvalidInput
        );
        let mut bytes = [0u8; 16];
        bytes[..input.ciphertext.len()].copy_from_slice(&input.ciphertext);
        self.conversions += 1;
        Ok(self.encrypt(u128::from_le_bytes(bytes)))
    }

    fn grant(&mut self, handle: Euint128) -> Result<Allowed> {
        if self.fail_grants {
            return err!(VaultError::MissingAllowanceAccount);
        }
        self.granted.insert(handle.0);
        Ok(Allowed::stamp(handle, self.identity))
    }

    fn combine(&mut self, lhs: &Allowed, rhs: &Allowed) -> Result<Euint128> {
        require!(!self.fail_combines, VaultError::PermissionMissing);
        lhs.check(self.identity)?;
        rhs.check(self.identity)?;
        require!(
            self.is_granted(lhs.handle()) && self.is_granted(rhs.handle()),
            VaultError::PermissionMissing
        );

        xor_from_primitives(self, lhs.handle(), rhs.handle())
    }
}

impl BitwiseOps for MockEngine {
    fn or(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        let value = self.cleartext(lhs)? | self.cleartext(rhs)?;
        Ok(self.encrypt(value))
    }

    fn and(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        let value = self.cleartext(lhs)? & self.cleartext(rhs)?;
        Ok(self.encrypt(value))
    }

    fn sub(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        let value = self
            .cleartext(lhs)?
            .checked_sub(self.cleartext(rhs)?)
            .ok_or_else(|| error!(VaultError::InvalidInput))?;
        Ok(self.encrypt(value))
    }
}

/// Oracle with a fixed fee and manual fulfillment
pub struct MockOracle {
    fee: u64,
    next_id: u64,
    issued: usize,
    collected: u64,
    requests: BTreeMap<u64, Option<Euint128>>,
}

impl MockOracle {
    pub fn new(fee: u64) -> Self {
        Self {
            fee,
            next_id: 1,
            issued: 0,
            collected: 0,
            requests: BTreeMap::new(),
        }
    }

    pub fn fulfill(&mut self, request_id: u64, randomness: Euint128) {
        self.requests.insert(request_id, Some(randomness));
    }

    pub fn request_count(&self) -> usize {
        self.issued
    }

    pub fn collected(&self) -> u64 {
        self.collected
    }
}

impl OracleRequests for MockOracle {
    fn fee(&self) -> Result<u64> {
        Ok(self.fee)
    }

    fn request_randomness(&mut self, _tag: u64, payment: u64) -> Result<u64> {
        require!(payment >= self.fee, VaultError::InsufficientFee);
        let request_id = self.next_id;
        self.next_id += 1;
        self.issued += 1;
        self.collected += payment;
        self.requests.insert(request_id, None);
        Ok(request_id)
    }
}

impl OracleFulfillments for MockOracle {
    fn is_fulfilled(&self, request_id: u64) -> Result<bool> {
        Ok(matches!(self.requests.get(&request_id), Some(Some(_))))
    }

    fn fetch_randomness(&self, request_id: u64) -> Result<Euint128> {
        self.requests
            .get(&request_id)
            .copied()
            .flatten()
            .ok_or_else(|| error!(VaultError::NotFulfilled))
    }
}

pub fn empty_vault(oracle_config: Pubkey) -> ValueVault {
    ValueVault {
        authority: Pubkey::new_unique(),
        oracle_config,
        value: Euint128::default(),
        initialized: false,
        bump: 255,
    }
}

/// Mock-engine input that decrypts to `cleartext`
pub fn input(cleartext: u128) -> EncryptedInput {
    EncryptedInput {
        ciphertext: cleartext.to_le_bytes().to_vec(),
        input_type: 0,
    }
}

/// Numeric code of an Anchor error, `u32::MAX` for raw program errors
pub fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(_) => u32::MAX,
    }
}
