//! External entropy beacon: a public block-explorer hash with caching.
//!
//! The beacon is a collaborator, not part of the cryptographic core. It
//! supplies a third-party-observable value neither party can choose, so a
//! verifier can confirm the round's entropy independently. Responses are
//! shape-checked before use and cached in a single slot for a TTL window.

use crate::errors::{FairnessError, Result};
use async_trait::async_trait;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Source of the public external entropy hash.
#[async_trait]
pub trait EntropyBeacon: Send + Sync {
    /// Latest beacon hash as a string, exactly as published.
    async fn latest_hash(&self) -> Result<String>;
}

/// HTTP client for a block-explorer endpoint returning JSON with a `hash`
/// field, e.g. `https://blockchain.info/latestblock`.
pub struct BlockExplorerBeacon {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl BlockExplorerBeacon {
    /// Build a client with the given endpoint and request timeout. The
    /// timeout cancels the in-flight request when it elapses.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FairnessError::BeaconFetchFailed(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> FairnessError {
        if e.is_timeout() {
            FairnessError::BeaconTimeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            FairnessError::BeaconFetchFailed(e.to_string())
        }
    }
}

#[async_trait]
impl EntropyBeacon for BlockExplorerBeacon {
    async fn latest_hash(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FairnessError::BeaconFetchFailed(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.map_transport_error(e)
                } else {
                    FairnessError::BeaconInvalidResponse(format!("body is not JSON: {}", e))
                }
            })?;

        // Type-check the shape before trusting it as entropy.
        match body.get("hash").and_then(serde_json::Value::as_str) {
            Some(hash) => {
                tracing::debug!(hash, "fetched beacon hash");
                Ok(hash.to_string())
            }
            None => {
                tracing::warn!("beacon response missing string `hash` field");
                Err(FairnessError::BeaconInvalidResponse(
                    "missing or non-string `hash` field".to_string(),
                ))
            }
        }
    }
}

/// Single-slot TTL cache over any beacon.
///
/// One external entropy value is cached at a time; concurrent rounds
/// within the TTL window share it without issuing new requests. Writes are
/// last-writer-wins.
pub struct CachedBeacon<B> {
    inner: B,
    ttl: Duration,
    slot: RwLock<Option<(String, Instant)>>,
}

impl<B> CachedBeacon<B> {
    pub fn new(inner: B, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: RwLock::new(None),
        }
    }

    fn cached(&self) -> Option<String> {
        let slot = self.slot.read().ok()?;
        let (hash, cached_at) = slot.as_ref()?;
        if cached_at.elapsed() < self.ttl {
            Some(hash.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl<B: EntropyBeacon> EntropyBeacon for CachedBeacon<B> {
    async fn latest_hash(&self) -> Result<String> {
        if let Some(hash) = self.cached() {
            tracing::debug!("beacon cache hit");
            return Ok(hash);
        }

        let hash = self.inner.latest_hash().await?;
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some((hash.clone(), Instant::now()));
        }
        Ok(hash)
    }
}
