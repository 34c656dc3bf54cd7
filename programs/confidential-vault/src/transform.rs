use anchor_lang::prelude::*;
use crate::engine::{ConfidentialEngine, EncryptedInput};
use crate::events::ValueStoredWithEntropy;
use crate::oracle::OracleFulfillments;
use crate::state::{RequestLedger, ValueVault};
use crate::tracker::EntropyRequestTracker;

/// Store `input` XOR the randomness of a fulfilled request
///
/// STAGING:
/// 1. Check the request and fetch its randomness (ledger untouched)
/// 2. Convert and permit the input
/// 3. Combine and permit the result
/// 4. Retire the request, then write the vault
///
/// Any failure in 1-3 leaves both the vault and the ledger as they were.
pub fn store_with_entropy<E, O, L>(
    vault: &mut ValueVault,
    tracker: &mut EntropyRequestTracker<'_, L>,
    engine: &mut E,
    oracle: &O,
    input: &EncryptedInput,
    request_id: u64,
    caller: Pubkey,
) -> Result<ValueStoredWithEntropy>
where
    E: ConfidentialEngine,
    O: OracleFulfillments,
    L: RequestLedger,
{
    // ===== STAGE =====
    let ticket = tracker.prepare_consume(oracle, engine, request_id)?;
    let value = ValueVault::admit(engine, input)?;
    let combined = engine.combine(&value, ticket.randomness())?;
    let combined = engine.grant(combined)?;

    // ===== COMMIT =====
    tracker.commit(ticket)?;
    vault.put(combined);

    msg!("Vault value rekeyed with entropy request {}", request_id);
    Ok(ValueStoredWithEntropy {
        vault: engine.identity(),
        request_id,
        caller,
    })
}
