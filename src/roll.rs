//! Deterministic roll derivation via keyed hashing.
//!
//! The roll is a pure function of the external entropy hash, the client
//! seed, the committed server seed/salt and a per-round nonce. Verification
//! relies on recomputing exactly this function, so the message layout below
//! is part of the protocol contract.

use crate::errors::{FairnessError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default size of the roll output space, `[1, 10_000_000]`.
pub const DEFAULT_RANGE: u32 = 10_000_000;

/// Canonical message the keyed hash is computed over.
///
/// Field order and the `:` delimiter are fixed; both parties must
/// canonicalize identically or verification fails.
fn roll_message(external_hash: &str, client_seed: &str, server_seed: &[u8], nonce: u64) -> String {
    format!(
        "{}:{}:{}:{}",
        external_hash,
        client_seed,
        hex::encode(server_seed),
        nonce
    )
}

/// Derive a roll in `[1, max]`.
///
/// HMAC-SHA256 over the canonical message, keyed by the secret salt; the
/// first 4 MAC bytes are read as a big-endian u32 and reduced modulo `max`.
/// Values of `max` near `u32::MAX` carry negligible modulo bias.
pub fn derive_roll(
    external_hash: &str,
    client_seed: &str,
    server_seed: &[u8],
    secret_salt: &[u8],
    nonce: u64,
    max: u32,
) -> Result<u32> {
    if max == 0 {
        return Err(FairnessError::InvalidArgument(
            "roll range max must be >= 1".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret_salt)
        .map_err(|e| FairnessError::InvalidArgument(format!("secret salt unusable as key: {}", e)))?;
    mac.update(roll_message(external_hash, client_seed, server_seed, nonce).as_bytes());
    let output = mac.finalize().into_bytes();

    let value = u32::from_be_bytes([output[0], output[1], output[2], output[3]]);
    Ok((value % max) + 1)
}
