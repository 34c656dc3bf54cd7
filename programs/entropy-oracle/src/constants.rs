pub const ORACLE_SEED: &[u8] = b"oracle";
pub const REQUEST_SEED: &[u8] = b"request";

/// First id handed out by a fresh oracle. Zero is never a valid request id.
pub const FIRST_REQUEST_ID: u64 = 1;

/// Operand byte passed to Inco for 128-bit encrypted values
pub const INCO_OPERAND_BYTE: u8 = 16;
