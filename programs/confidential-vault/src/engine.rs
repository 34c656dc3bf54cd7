use std::collections::VecDeque;

use anchor_lang::prelude::*;
use inco_lightning::cpi::accounts::{Allow, Operation};
use inco_lightning::cpi::{allow, e_and, e_or, e_sub, new_euint128};
use inco_lightning::types::Euint128;
use crate::constants::INCO_OPERAND_BYTE;
use crate::error::VaultError;

/// Caller-encrypted value as submitted to the vault.
///
/// Inco carries the input proof inside the ciphertext envelope;
/// `input_type` selects the envelope format.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EncryptedInput {
    pub ciphertext: Vec<u8>,
    pub input_type: u8,
}

/// A handle stamped with the identity that may operate on it.
///
/// Only an engine's `grant` produces one, so holding an `Allowed` is
/// proof that the permission call went through.
#[derive(Clone, Copy)]
pub struct Allowed {
    handle: Euint128,
    grantee: Pubkey,
}

impl Allowed {
    pub(crate) fn stamp(handle: Euint128, grantee: Pubkey) -> Self {
        Self { handle, grantee }
    }

    pub fn handle(&self) -> Euint128 {
        self.handle
    }

    pub fn grantee(&self) -> Pubkey {
        self.grantee
    }

    /// Fails unless the stamp was issued to `grantee`
    pub fn check(&self, grantee: Pubkey) -> Result<()> {
        require_keys_eq!(self.grantee, grantee, VaultError::PermissionMissing);
        Ok(())
    }
}

/// The confidential-computation engine as seen by the vault
pub trait ConfidentialEngine {
    /// Identity permissions are granted to (the vault account)
    fn identity(&self) -> Pubkey;

    /// Validate a caller-encrypted input and turn it into a handle
    fn convert_external(&mut self, input: &EncryptedInput) -> Result<Euint128>;

    /// Grant `identity()` permission on `handle`
    fn grant(&mut self, handle: Euint128) -> Result<Allowed>;

    /// XOR two permitted handles. Both stamps must belong to `identity()`.
    fn combine(&mut self, lhs: &Allowed, rhs: &Allowed) -> Result<Euint128>;
}

/// Encrypted primitives the XOR combinator is assembled from
pub trait BitwiseOps {
    fn or(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128>;
    fn and(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128>;
    fn sub(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128>;
}

/// `a ^ b = (a | b) - (a & b)`. The subtraction never underflows since
/// `a & b` is a bit subset of `a | b`.
pub fn xor_from_primitives<P: BitwiseOps>(
    ops: &mut P,
    lhs: Euint128,
    rhs: Euint128,
) -> Result<Euint128> {
    let either = ops.or(lhs, rhs)?;
    let both = ops.and(lhs, rhs)?;
    ops.sub(either, both)
}

/// `ConfidentialEngine` backed by Inco Lightning CPIs
///
/// Each `grant` consumes the next allowance account, in the order the
/// client passed them.
pub struct IncoEngine<'info> {
    vault: AccountInfo<'info>,
    signer: AccountInfo<'info>,
    inco_program: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    allowances: VecDeque<AccountInfo<'info>>,
}

impl<'info> IncoEngine<'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        signer: AccountInfo<'info>,
        inco_program: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        allowances: &[AccountInfo<'info>],
    ) -> Self {
        Self {
            vault,
            signer,
            inco_program,
            system_program,
            allowances: allowances.iter().cloned().collect(),
        }
    }

    fn operation(&self) -> CpiContext<'_, '_, '_, 'info, Operation<'info>> {
        CpiContext::new(
            self.inco_program.clone(),
            Operation {
                signer: self.signer.clone(),
            },
        )
    }
}

impl<'info> ConfidentialEngine for IncoEngine<'info> {
    fn identity(&self) -> Pubkey {
        self.vault.key()
    }

    fn convert_external(&mut self, input: &EncryptedInput) -> Result<Euint128> {
        require!(!input.ciphertext.is_empty(), VaultError::InvalidInput);
        new_euint128(self.operation(), input.ciphertext.clone(), input.input_type)
    }

    fn grant(&mut self, handle: Euint128) -> Result<Allowed> {
        let allowance_account = self
            .allowances
            .pop_front()
            .ok_or_else(|| error!(VaultError::MissingAllowanceAccount))?;
        let vault = self.identity();

        allow(
            CpiContext::new(
                self.inco_program.clone(),
                Allow {
                    allowance_account,
                    signer: self.signer.clone(),
                    allowed_address: self.vault.clone(),
                    system_program: self.system_program.clone(),
                },
            ),
            handle.0,
            true,
            vault,
        )?;

        Ok(Allowed::stamp(handle, vault))
    }

    fn combine(&mut self, lhs: &Allowed, rhs: &Allowed) -> Result<Euint128> {
        let vault = self.identity();
        lhs.check(vault)?;
        rhs.check(vault)?;
        xor_from_primitives(self, lhs.handle(), rhs.handle())
    }
}

impl<'info> BitwiseOps for IncoEngine<'info> {
    fn or(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        e_or(self.operation(), lhs, rhs, INCO_OPERAND_BYTE)
    }

    fn and(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        e_and(self.operation(), lhs, rhs, INCO_OPERAND_BYTE)
    }

    fn sub(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
        e_sub(self.operation(), lhs, rhs, INCO_OPERAND_BYTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::testing::{error_code, MockEngine};

    /// Cleartext or/and/sub with a log of the calls made
    #[derive(Default)]
    struct PrimitiveOnly {
        next: u128,
        values: BTreeMap<u128, u128>,
        calls: Vec<&'static str>,
    }

    impl PrimitiveOnly {
        fn put(&mut self, cleartext: u128) -> Euint128 {
            self.next += 1;
            self.values.insert(self.next, cleartext);
            Euint128(self.next)
        }

        fn get(&self, handle: Euint128) -> u128 {
            self.values[&handle.0]
        }
    }

    impl BitwiseOps for PrimitiveOnly {
        fn or(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
            self.calls.push("or");
            let value = self.get(lhs) | self.get(rhs);
            Ok(self.put(value))
        }

        fn and(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
            self.calls.push("and");
            let value = self.get(lhs) & self.get(rhs);
            Ok(self.put(value))
        }

        fn sub(&mut self, lhs: Euint128, rhs: Euint128) -> Result<Euint128> {
            self.calls.push("sub");
            let value = self
                .get(lhs)
                .checked_sub(self.get(rhs))
                .ok_or_else(|| error!(VaultError::InvalidInput))?;
            Ok(self.put(value))
        }
    }

    #[test]
    fn xor_is_or_minus_and() {
        let pairs = [
            (0, 0),
            (0b1100, 0b1010),
            (u128::MAX, 0),
            (u128::MAX, u128::MAX),
            (0xDEAD_BEEF, 0xFFFF_0000),
            (1 << 127, (1 << 127) | 1),
        ];
        for (a, b) in pairs {
            let mut ops = PrimitiveOnly::default();
            let lhs = ops.put(a);
            let rhs = ops.put(b);
            let out = xor_from_primitives(&mut ops, lhs, rhs).unwrap();
            assert_eq!(ops.get(out), a ^ b);
            assert_eq!(ops.calls, ["or", "and", "sub"]);
        }
    }

    #[test]
    fn stamp_check_rejects_other_grantee() {
        let owner = Pubkey::new_unique();
        let stamped = Allowed::stamp(Euint128(9), owner);
        assert!(stamped.check(owner).is_ok());

        let err = stamped.check(Pubkey::new_unique()).unwrap_err();
        assert_eq!(error_code(err), u32::from(VaultError::PermissionMissing));
    }

    #[test]
    fn combine_requires_both_stamps() {
        let mut engine = MockEngine::new(Pubkey::new_unique());
        let a = engine.encrypt(0b1100);
        let b = engine.encrypt(0b1010);
        let a = engine.grant(a).unwrap();
        let foreign = Allowed::stamp(b, Pubkey::new_unique());

        let err = engine.combine(&a, &foreign).map(|h| h.0).unwrap_err();
        assert_eq!(error_code(err), u32::from(VaultError::PermissionMissing));

        let b = engine.grant(b).unwrap();
        let combined = engine.combine(&a, &b).unwrap();
        assert_eq!(engine.decrypt(combined), Some(0b0110));
    }
}
