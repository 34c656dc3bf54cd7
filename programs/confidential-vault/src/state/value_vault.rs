use anchor_lang::prelude::*;
use inco_lightning::types::Euint128;
use crate::engine::{Allowed, ConfidentialEngine, EncryptedInput};
use crate::error::VaultError;
use crate::events::{ValueStored, ValueUpdated};

/// Vault holding one confidential value
#[account]
pub struct ValueVault {
    /// Who created the vault
    pub authority: Pubkey,
    /// Oracle config account entropy is requested from
    pub oracle_config: Pubkey,
    /// Current encrypted value handle
    pub value: Euint128,
    /// Set by the first store, never cleared
    pub initialized: bool,
    /// Bump seed for PDA
    pub bump: u8,
}

impl ValueVault {
    /// 8 (discriminator) + 32 (authority) + 32 (oracle_config)
    /// + 16 (Euint128) + 1 (initialized) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 32 + 16 + 1 + 1;

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current handle. Fails before the first store.
    pub fn read(&self) -> Result<Euint128> {
        require!(self.initialized, VaultError::Uninitialized);
        Ok(self.value)
    }

    /// Convert and permit an input, then overwrite the value.
    /// Works for both the first write and later writes.
    pub fn store<E: ConfidentialEngine>(
        &mut self,
        engine: &mut E,
        input: &EncryptedInput,
        caller: Pubkey,
    ) -> Result<ValueStored> {
        let permitted = Self::admit(engine, input)?;
        self.put(permitted);

        Ok(ValueStored {
            vault: engine.identity(),
            caller,
        })
    }

    /// Same as `store` but only once the vault holds a value
    pub fn replace<E: ConfidentialEngine>(
        &mut self,
        engine: &mut E,
        input: &EncryptedInput,
        caller: Pubkey,
    ) -> Result<ValueUpdated> {
        require!(self.initialized, VaultError::Uninitialized);
        let permitted = Self::admit(engine, input)?;
        self.put(permitted);

        Ok(ValueUpdated {
            vault: engine.identity(),
            caller,
        })
    }

    /// Validate an input through the engine and stamp it for this vault
    pub(crate) fn admit<E: ConfidentialEngine>(
        engine: &mut E,
        input: &EncryptedInput,
    ) -> Result<Allowed> {
        let handle = engine.convert_external(input)?;
        engine.grant(handle)
    }

    /// Overwrite the value. Infallible so it can run after all checks.
    pub(crate) fn put(&mut self, value: Allowed) {
        self.value = value.handle();
        self.initialized = true;
    }
}
