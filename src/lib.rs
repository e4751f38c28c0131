//! Fairroll - Provably Fair Commit-Reveal RNG
//!
//! Commit-reveal random number generation for games of chance: the server
//! commits to a secret seed pair by publishing its hash, each roll is
//! derived deterministically from that pair plus a client seed, a per-round
//! nonce and a public blockchain block hash, and after the secrets are
//! revealed any third party can recompute both commitment and roll.
//!
//! ```no_run
//! # async fn demo() -> fairroll::Result<()> {
//! use fairroll::{verify_record, ProvablyFair};
//!
//! let session = ProvablyFair::new()?;
//! println!("commitment: {}", session.public_hash_hex());
//!
//! let record = session.generate_roll("my client seed").await?;
//! assert!(verify_record(&record)?);
//! # Ok(())
//! # }
//! ```

pub mod beacon;
pub mod commitment;
pub mod config;
pub mod entropy;
pub mod errors;
pub mod interval;
pub mod roll;
pub mod session;
pub mod verify;

pub use beacon::{BlockExplorerBeacon, CachedBeacon, EntropyBeacon};
pub use commitment::{commit, commit_hex};
pub use config::FairnessConfig;
pub use entropy::{EntropySource, OsEntropy};
pub use errors::{FairnessError, Result};
pub use interval::{win_interval, win_intervals, win_probability, WinInterval};
pub use roll::{derive_roll, DEFAULT_RANGE};
pub use session::{ProvablyFair, RollRecord};
pub use verify::{verify_record, verify_roll};
