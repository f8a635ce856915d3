//! Tracking ledger records
//!
//! Which airdrops the user is farming and how far along they are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked airdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    /// Catalog id of the tracked airdrop, unique within the ledger
    pub airdrop_id: String,

    /// Free-form status (interested, farming, completed, claimed, ...)
    pub status: String,

    /// 0-100
    #[serde(default)]
    pub progress: u8,

    #[serde(default)]
    pub tasks_completed: Vec<String>,

    #[serde(default)]
    pub notes: String,

    /// When tracking started; never changes afterwards
    pub added_at: DateTime<Utc>,

    /// Time of the last update, absent until the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Keys this build does not know about, kept across rewrites
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TrackingRecord {
    pub fn new(
        airdrop_id: impl Into<String>,
        status: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            airdrop_id: airdrop_id.into(),
            status: status.into(),
            progress: 0,
            tasks_completed: Vec::new(),
            notes: String::new(),
            added_at: now,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Merge the supplied fields and stamp `updated_at`
    pub fn apply(&mut self, update: &TrackingUpdate, now: DateTime<Utc>) {
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        self.updated_at = Some(now);
    }
}

/// Partial update of a tracking record. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingUpdate {
    pub progress: Option<u8>,
    pub status: Option<String>,
}

impl TrackingUpdate {
    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            status: None,
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            progress: None,
            status: Some(status.into()),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// On-disk shape of the ledger file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingLedger {
    /// When the ledger was last written
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tracking: Vec<TrackingRecord>,
}
