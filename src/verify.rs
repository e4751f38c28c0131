//! Third-party verification of disclosed rolls.
//!
//! Recomputes the commitment and the roll from the revealed values and
//! compares them against the claims. A mismatch is a normal `false`
//! outcome, not an error; errors are reserved for malformed hex inputs.

use crate::commitment::commit;
use crate::errors::{FairnessError, Result};
use crate::roll::{derive_roll, DEFAULT_RANGE};
use crate::session::RollRecord;
use subtle::ConstantTimeEq;

fn decode_hex_field(field: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| FairnessError::InvalidArgument(format!("{} is not valid hex: {}", field, e)))
}

/// Verify a disclosed roll against its published commitment.
///
/// Returns `Ok(false)` when the revealed seed pair does not hash to the
/// claimed public hash (the committer changed their seeds after the fact)
/// or when the recomputed roll differs from the claim. The commitment
/// comparison is constant-time. The roll is recomputed over the default
/// `[1, 10_000_000]` range; rolls generated with a custom `max` can be
/// checked directly via [`derive_roll`].
pub fn verify_roll(
    client_seed: &str,
    claimed_roll: u32,
    server_seed_hex: &str,
    secret_salt_hex: &str,
    nonce: u64,
    claimed_public_hash_hex: &str,
    external_hash: &str,
) -> Result<bool> {
    let server_seed = decode_hex_field("server seed", server_seed_hex)?;
    let secret_salt = decode_hex_field("secret salt", secret_salt_hex)?;
    let claimed_hash = decode_hex_field("public hash", claimed_public_hash_hex)?;

    let computed_hash = commit(&server_seed, &secret_salt);
    if !bool::from(computed_hash[..].ct_eq(&claimed_hash)) {
        return Ok(false);
    }

    let computed_roll = derive_roll(
        external_hash,
        client_seed,
        &server_seed,
        &secret_salt,
        nonce,
        DEFAULT_RANGE,
    )?;
    Ok(computed_roll == claimed_roll)
}

/// Verify a complete round-trip record.
pub fn verify_record(record: &RollRecord) -> Result<bool> {
    verify_roll(
        &record.client_seed,
        record.random_number,
        &record.server_seed,
        &record.secret_salt,
        record.nonce,
        &record.public_hash,
        &record.external_hash,
    )
}
