//! Error types for catalog loading, ledger persistence and tracking operations

use std::path::PathBuf;
use thiserror::Error;

/// A catalog or ledger resource could not be loaded.
///
/// Always recovered by the caller as an empty collection; it is reported,
/// never fatal.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The catalog file does not exist
    #[error("Airdrop catalog not found at {path}")]
    Missing { path: PathBuf },

    /// The resource exists but could not be read
    #[error("Failed to read {resource} from {path}: {source}")]
    Read {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource was read but is not valid JSON of the expected shape
    #[error("Failed to parse {resource} at {path} (corrupted or invalid format): {source}")]
    Parse {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The tracking ledger could not be written. The user's change is lost.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create ledger directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize tracking ledger")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write tracking ledger to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a track/untrack/update operation is refused or fails
#[derive(Error, Debug)]
pub enum TrackError {
    /// The query did not resolve to any catalog record
    #[error("Airdrop \"{query}\" not found")]
    NotFound { query: String },

    #[error("Already tracking {name}")]
    AlreadyTracked { name: String },

    #[error("Not currently tracking {name}. Use \"track\" first.")]
    NotTracked { name: String },

    /// The ledger is at the free-tier cap
    #[error("Free tier limit: Max {cap} tracked airdrops. Untrack some or upgrade to Pro.")]
    CapacityExceeded { cap: usize },

    #[error("Progress must be between 0 and 100 (got {progress})")]
    InvalidProgress { progress: u8 },

    /// Writing the ledger failed after all checks passed
    #[error("Could not save tracking ledger; the change was not recorded")]
    Persist(#[from] StoreError),
}
