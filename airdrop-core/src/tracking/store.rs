//! Tracking ledger persistence
//!
//! The ledger is always read and written whole. There is no locking: two
//! processes mutating the same file concurrently race, and the last writer
//! wins. Writes go through a temp file that is renamed into place, so a
//! crash mid-write leaves the previous ledger intact rather than a torn one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::Cell;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{TrackingLedger, TrackingRecord};
use crate::error::{LoadError, StoreError};

/// Result of a soft-failing ledger load
#[derive(Debug, Default)]
pub struct LedgerLoad {
    /// Records in persisted order
    pub records: Vec<TrackingRecord>,
    /// Set when the ledger existed but could not be read; `records` is then empty
    pub error: Option<LoadError>,
}

impl LedgerLoad {
    pub fn ok(records: Vec<TrackingRecord>) -> Self {
        Self {
            records,
            error: None,
        }
    }
}

/// Load/save contract for the tracking ledger.
///
/// Stores do no invariant checking; the tracking engine validates before
/// calling [`TrackingStore::save`].
pub trait TrackingStore {
    /// Load every record. A ledger that does not exist yet is empty, not an error.
    fn load(&self) -> LedgerLoad;

    /// Replace the whole ledger with `records`
    fn save(&mut self, records: &[TrackingRecord]) -> Result<(), StoreError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerView<'a> {
    last_updated: DateTime<Utc>,
    tracking: &'a [TrackingRecord],
}

/// Ledger stored as pretty-printed JSON at a fixed path
#[derive(Debug, Clone)]
pub struct FileTrackingStore {
    path: PathBuf,
}

impl FileTrackingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the ledger file. `Ok(None)` on first run.
    pub fn read_ledger(&self) -> Result<Option<TrackingLedger>, LoadError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LoadError::Read {
                    resource: "tracking ledger",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| LoadError::Parse {
                resource: "tracking ledger",
                path: self.path.clone(),
                source,
            })
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl TrackingStore for FileTrackingStore {
    fn load(&self) -> LedgerLoad {
        match self.read_ledger() {
            Ok(Some(ledger)) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = ledger.tracking.len(),
                    "Loaded tracking ledger"
                );
                LedgerLoad::ok(ledger.tracking)
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "No tracking ledger yet");
                LedgerLoad::default()
            }
            Err(error) => {
                tracing::warn!("{}", error);
                LedgerLoad {
                    records: Vec::new(),
                    error: Some(error),
                }
            }
        }
    }

    fn save(&mut self, records: &[TrackingRecord]) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let view = LedgerView {
            last_updated: Utc::now(),
            tracking: records,
        };
        let content =
            serde_json::to_string_pretty(&view).map_err(|source| StoreError::Serialize { source })?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "Saved tracking ledger"
        );
        Ok(())
    }
}

/// In-memory ledger for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryTrackingStore {
    records: Vec<TrackingRecord>,
    last_updated: Option<DateTime<Utc>>,
    loads: Cell<usize>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TrackingRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A store whose every save fails as if the disk were read-only
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[TrackingRecord] {
        &self.records
    }

    /// Number of times the ledger was read
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl TrackingStore for MemoryTrackingStore {
    fn load(&self) -> LedgerLoad {
        self.loads.set(self.loads.get() + 1);
        LedgerLoad::ok(self.records.clone())
    }

    fn save(&mut self, records: &[TrackingRecord]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "read-only store"),
            });
        }

        self.records = records.to_vec();
        self.last_updated = Some(Utc::now());
        self.saves += 1;
        Ok(())
    }
}
