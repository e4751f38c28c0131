//! Session state: committed seed pair, nonce counter and roll generation.

use crate::beacon::{BlockExplorerBeacon, CachedBeacon, EntropyBeacon};
use crate::commitment::commit;
use crate::config::FairnessConfig;
use crate::entropy::{mixed_nonce, EntropySource, OsEntropy};
use crate::errors::Result;
use crate::roll::{derive_roll, DEFAULT_RANGE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Complete evidence for one round.
///
/// This tuple is everything a third party needs to run verification.
/// Secrets are revealed in hex, so handing out a record spends the
/// commitment; rotate the seeds afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RollRecord {
    pub random_number: u32,
    /// Revealed server seed, hex.
    pub server_seed: String,
    /// Revealed secret salt, hex.
    pub secret_salt: String,
    pub nonce: u64,
    pub client_seed: String,
    /// Commitment published before the round, hex.
    pub public_hash: String,
    /// External entropy hash the roll was derived from.
    pub external_hash: String,
}

/// A provably fair session.
///
/// Owns one `(server_seed, secret_salt, public_hash)` triple at a time;
/// the public hash is available from construction, before any client seed
/// is accepted. State is single-owner mutable; share across threads only
/// with external synchronization.
pub struct ProvablyFair {
    config: FairnessConfig,
    entropy: Arc<dyn EntropySource>,
    beacon: Arc<dyn EntropyBeacon>,
    server_seed: Vec<u8>,
    secret_salt: Vec<u8>,
    public_hash: [u8; 32],
    nonce: u64,
}

impl ProvablyFair {
    /// Session with default configuration, OS entropy and the public
    /// block-explorer beacon (cached per config).
    pub fn new() -> Result<Self> {
        Self::with_config(FairnessConfig::default())
    }

    /// Session with custom configuration.
    pub fn with_config(config: FairnessConfig) -> Result<Self> {
        config.validate()?;
        let explorer = BlockExplorerBeacon::new(&config.beacon_url, config.fetch_timeout())?;
        let beacon: Arc<dyn EntropyBeacon> = if config.use_cache {
            Arc::new(CachedBeacon::new(explorer, config.cache_ttl()))
        } else {
            Arc::new(explorer)
        };
        Self::with_parts(config, Arc::new(OsEntropy), beacon)
    }

    /// Session with injected capabilities. This is the seam tests use to
    /// substitute deterministic entropy and a stubbed beacon.
    pub fn with_parts(
        config: FairnessConfig,
        entropy: Arc<dyn EntropySource>,
        beacon: Arc<dyn EntropyBeacon>,
    ) -> Result<Self> {
        config.validate()?;
        let server_seed = entropy.random_bytes(config.server_seed_length)?;
        let secret_salt = entropy.random_bytes(config.secret_salt_length)?;
        let public_hash = commit(&server_seed, &secret_salt);

        Ok(Self {
            config,
            entropy,
            beacon,
            server_seed,
            secret_salt,
            public_hash,
            nonce: 0,
        })
    }

    /// The published commitment for the current seed pair, hex.
    pub fn public_hash_hex(&self) -> String {
        hex::encode(self.public_hash)
    }

    /// Current counter nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Advance the counter nonce by one.
    pub fn increment_nonce(&mut self) {
        self.nonce += 1;
    }

    /// Replace the seed pair with fresh material, recompute the public
    /// hash and reset the nonce counter. Required after a record has been
    /// revealed: the old commitment is spent.
    pub fn rotate_seeds(&mut self) -> Result<()> {
        self.server_seed = self.entropy.random_bytes(self.config.server_seed_length)?;
        self.secret_salt = self.entropy.random_bytes(self.config.secret_salt_length)?;
        self.public_hash = commit(&self.server_seed, &self.secret_salt);
        self.nonce = 0;
        tracing::info!(public_hash = %self.public_hash_hex(), "rotated server seeds");
        Ok(())
    }

    /// Produce a roll for `client_seed` with a fresh high-entropy nonce.
    ///
    /// Fetches the current beacon hash (cached within its TTL window) and
    /// derives the roll over the default `[1, 10_000_000]` range against
    /// the session's committed seeds.
    pub async fn generate_roll(&self, client_seed: &str) -> Result<RollRecord> {
        let nonce = mixed_nonce(self.entropy.as_ref())?;
        self.generate_roll_with_nonce(client_seed, nonce).await
    }

    /// Produce a roll with a caller-supplied nonce.
    ///
    /// Use this to run the counter-nonce convention: pass [`nonce`] and
    /// call [`increment_nonce`] after each round. The record carries the
    /// exact nonce used, whichever convention produced it.
    ///
    /// [`nonce`]: Self::nonce
    /// [`increment_nonce`]: Self::increment_nonce
    pub async fn generate_roll_with_nonce(
        &self,
        client_seed: &str,
        nonce: u64,
    ) -> Result<RollRecord> {
        let external_hash = self.beacon.latest_hash().await?;
        let random_number = derive_roll(
            &external_hash,
            client_seed,
            &self.server_seed,
            &self.secret_salt,
            nonce,
            DEFAULT_RANGE,
        )?;
        tracing::debug!(nonce, roll = random_number, "derived roll");

        Ok(RollRecord {
            random_number,
            server_seed: hex::encode(&self.server_seed),
            secret_salt: hex::encode(&self.secret_salt),
            nonce,
            client_seed: client_seed.to_string(),
            public_hash: self.public_hash_hex(),
            external_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FairnessError;
    use async_trait::async_trait;

    const EXTERNAL: &str = "000000000000000000002dbaa98481dea46256d80ac7aa46e80ea4ecf49ea33e";

    struct FixedBeacon;

    #[async_trait]
    impl EntropyBeacon for FixedBeacon {
        async fn latest_hash(&self) -> Result<String> {
            Ok(EXTERNAL.to_string())
        }
    }

    fn session() -> ProvablyFair {
        ProvablyFair::with_parts(
            FairnessConfig::default(),
            Arc::new(OsEntropy),
            Arc::new(FixedBeacon),
        )
        .expect("session")
    }

    #[test]
    fn test_public_hash_available_at_construction() {
        let session = session();
        let hash = session.public_hash_hex();
        assert_eq!(hash.len(), 64);
        assert_eq!(session.nonce(), 0);
    }

    #[test]
    fn test_nonce_counter_advances() {
        let mut session = session();
        session.increment_nonce();
        session.increment_nonce();
        assert_eq!(session.nonce(), 2);
    }

    #[test]
    fn test_rotation_replaces_hash_and_resets_nonce() {
        let mut session = session();
        let before = session.public_hash_hex();
        session.increment_nonce();

        session.rotate_seeds().expect("rotate");

        assert_ne!(session.public_hash_hex(), before);
        assert_eq!(session.nonce(), 0);
    }

    #[test]
    fn test_zero_length_seed_config_rejected() {
        let mut config = FairnessConfig::default();
        config.server_seed_length = 0;
        let err = ProvablyFair::with_parts(config, Arc::new(OsEntropy), Arc::new(FixedBeacon))
            .err()
            .expect("must fail");
        assert!(matches!(err, FairnessError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_roll_record_is_self_sufficient() {
        let session = session();
        let record = session.generate_roll("test1").await.expect("roll");

        assert!((1..=DEFAULT_RANGE).contains(&record.random_number));
        assert_eq!(record.client_seed, "test1");
        assert_eq!(record.external_hash, EXTERNAL);
        assert_eq!(record.public_hash, session.public_hash_hex());
        assert_eq!(
            hex::decode(&record.server_seed).expect("hex seed").len(),
            32
        );
        assert_eq!(hex::decode(&record.secret_salt).expect("hex salt").len(), 4);
    }

    #[tokio::test]
    async fn test_counter_convention_round_trip() {
        let mut session = session();
        let nonce = session.nonce();
        let record = session
            .generate_roll_with_nonce("test1", nonce)
            .await
            .expect("roll");
        session.increment_nonce();

        assert_eq!(record.nonce, 0);
        assert_eq!(session.nonce(), 1);
    }

    #[tokio::test]
    async fn test_rolls_with_distinct_nonces_stay_in_range() {
        let session = session();
        let mut seen = std::collections::HashSet::new();
        for nonce in 0..10 {
            let record = session
                .generate_roll_with_nonce("test1", nonce)
                .await
                .expect("roll");
            assert!((1..=DEFAULT_RANGE).contains(&record.random_number));
            seen.insert(record.random_number);
        }
        // Probabilistic: 10 draws over 10M outcomes colliding would be
        // a ~5e-6 event.
        assert!(seen.len() >= 9);
    }
}
