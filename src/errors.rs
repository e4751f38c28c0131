//! Error types for the provably fair pipeline.

/// Errors surfaced by seed generation, roll derivation, verification and
/// the external entropy beacon.
#[derive(Debug, thiserror::Error)]
pub enum FairnessError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Secure entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Beacon fetch failed: {0}")]
    BeaconFetchFailed(String),

    #[error("Beacon request did not complete within {timeout_ms}ms")]
    BeaconTimeout { timeout_ms: u64 },

    #[error("Invalid response format from block explorer: {0}")]
    BeaconInvalidResponse(String),
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, FairnessError>;
