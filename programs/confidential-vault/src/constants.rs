pub const VAULT_SEED: &[u8] = b"vault";
pub const ENTROPY_SEED: &[u8] = b"entropy";

/// Operand byte passed to Inco arithmetic on 128-bit encrypted values
pub const INCO_OPERAND_BYTE: u8 = 16;
