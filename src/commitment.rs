//! Public-hash commitment binding the server seed and secret salt.

use sha2::{Digest, Sha256};

/// Compute the commitment digest over `server_seed ‖ secret_salt`.
///
/// The digest is published before any client seed is accepted; revealing
/// the inputs later lets anyone check the server could not have swapped
/// them after the fact.
pub fn commit(server_seed: &[u8], secret_salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(server_seed);
    hasher.update(secret_salt);
    hasher.finalize().into()
}

/// Hex form of [`commit`] for the public boundary.
pub fn commit_hex(server_seed: &[u8], secret_salt: &[u8]) -> String {
    hex::encode(commit(server_seed, secret_salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_deterministic() {
        let seed = b"server seed bytes";
        let salt = b"salt";
        assert_eq!(commit(seed, salt), commit(seed, salt));
    }

    #[test]
    fn test_commitment_binds_both_inputs() {
        let base = commit(b"seed", b"salt");
        assert_ne!(base, commit(b"seed", b"sal0"));
        assert_ne!(base, commit(b"see0", b"salt"));
    }

    #[test]
    fn test_commit_hex_is_64_lowercase_hex_chars() {
        let hash = commit_hex(b"seed", b"salt");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_sha256_vector() {
        // SHA-256("abc") split across seed and salt, checked against the
        // FIPS 180-2 test vector.
        assert_eq!(
            commit_hex(b"ab", b"c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
