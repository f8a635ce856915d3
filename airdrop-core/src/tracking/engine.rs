//! Tracking engine
//!
//! Enforces the ledger invariants and performs every mutation as a full
//! reload → check → mutate → persist cycle against the injected store:
//!
//! - a project must resolve in the catalog,
//! - each airdrop is tracked at most once,
//! - at most [`FREE_TIER_CAP`] airdrops are tracked (checked on insert only).
//!
//! Nothing is cached between operations, so edits made to the ledger file by
//! another process between two commands are always seen.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{TrackingRecord, TrackingStore, TrackingUpdate, FREE_TIER_CAP};
use crate::catalog::{AirdropRecord, Catalog};
use crate::error::TrackError;

/// Deadlines at most this many days away count as upcoming
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// At most this many upcoming deadlines are reported
pub const UPCOMING_LIMIT: usize = 5;

/// Which mutation produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingAction {
    Tracked,
    Untracked,
    Updated,
}

/// Successful result of track/untrack/update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOutcome {
    pub action: TrackingAction,
    /// The resolved catalog record
    pub airdrop: AirdropRecord,
    /// The created, removed or merged ledger record
    pub record: TrackingRecord,
}

impl TrackingOutcome {
    pub fn message(&self) -> String {
        match self.action {
            TrackingAction::Tracked => format!("Now tracking {}", self.airdrop.name),
            TrackingAction::Untracked => format!("Stopped tracking {}", self.airdrop.name),
            TrackingAction::Updated => format!("Updated {}", self.airdrop.name),
        }
    }
}

/// Summary counts and value totals over the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStats {
    pub count: usize,
    pub by_status: BTreeMap<String, usize>,
    pub total_value_min: f64,
    pub total_value_max: f64,
}

/// A ledger record joined with its catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct TrackedAirdrop<'a> {
    pub airdrop: &'a AirdropRecord,
    pub record: TrackingRecord,
}

/// A tracked airdrop whose deadline is coming up
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadline<'a> {
    pub airdrop: &'a AirdropRecord,
    pub days_left: i64,
}

/// Everything the portfolio view shows, derived from one ledger read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio<'a> {
    pub stats: TrackingStats,
    pub tracking: Vec<TrackedAirdrop<'a>>,
    pub upcoming_deadlines: Vec<UpcomingDeadline<'a>>,
}

/// Query and mutation engine over a catalog and a tracking store
pub struct TrackingEngine<S> {
    catalog: Catalog,
    store: S,
}

impl<S: TrackingStore> TrackingEngine<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current ledger contents, freshly loaded
    pub fn records(&self) -> Vec<TrackingRecord> {
        let load = self.store.load();
        if let Some(error) = &load.error {
            tracing::warn!("Treating tracking ledger as empty: {}", error);
        }
        load.records
    }

    fn resolve(&self, query: &str) -> Result<AirdropRecord, TrackError> {
        self.catalog
            .resolve(query)
            .cloned()
            .ok_or_else(|| TrackError::NotFound {
                query: query.to_string(),
            })
    }

    /// Start tracking the airdrop `query` resolves to
    pub fn track(&mut self, query: &str, status: &str) -> Result<TrackingOutcome, TrackError> {
        let airdrop = self.resolve(query)?;
        let mut records = self.records();

        if records.iter().any(|t| t.airdrop_id == airdrop.id) {
            return Err(TrackError::AlreadyTracked { name: airdrop.name });
        }
        if records.len() >= FREE_TIER_CAP {
            return Err(TrackError::CapacityExceeded { cap: FREE_TIER_CAP });
        }

        let record = TrackingRecord::new(airdrop.id.clone(), status, Utc::now());
        records.push(record.clone());
        self.store.save(&records)?;

        tracing::info!(id = %airdrop.id, status, "Started tracking airdrop");
        Ok(TrackingOutcome {
            action: TrackingAction::Tracked,
            airdrop,
            record,
        })
    }

    /// Stop tracking; the record is removed outright
    pub fn untrack(&mut self, query: &str) -> Result<TrackingOutcome, TrackError> {
        let airdrop = self.resolve(query)?;
        let mut records = self.records();

        let index = records
            .iter()
            .position(|t| t.airdrop_id == airdrop.id)
            .ok_or_else(|| TrackError::NotTracked {
                name: airdrop.name.clone(),
            })?;

        let record = records.remove(index);
        self.store.save(&records)?;

        tracing::info!(id = %airdrop.id, "Stopped tracking airdrop");
        Ok(TrackingOutcome {
            action: TrackingAction::Untracked,
            airdrop,
            record,
        })
    }

    /// Merge `update` into an existing record and stamp `updatedAt`
    pub fn update(
        &mut self,
        query: &str,
        update: &TrackingUpdate,
    ) -> Result<TrackingOutcome, TrackError> {
        if let Some(progress) = update.progress.filter(|p| *p > 100) {
            return Err(TrackError::InvalidProgress { progress });
        }

        let airdrop = self.resolve(query)?;
        let mut records = self.records();

        let record = records
            .iter_mut()
            .find(|t| t.airdrop_id == airdrop.id)
            .ok_or_else(|| TrackError::NotTracked {
                name: airdrop.name.clone(),
            })?;

        record.apply(update, Utc::now());
        let record = record.clone();
        self.store.save(&records)?;

        tracing::info!(
            id = %airdrop.id,
            progress = record.progress,
            status = %record.status,
            "Updated tracked airdrop"
        );
        Ok(TrackingOutcome {
            action: TrackingAction::Updated,
            airdrop,
            record,
        })
    }

    /// Count by status and sum the value ranges of tracked airdrops.
    ///
    /// Records whose airdrop has left the catalog still count towards
    /// `byStatus` but add nothing to the value totals.
    pub fn stats(&self) -> TrackingStats {
        self.stats_of(&self.records())
    }

    /// Ledger records joined with the catalog, in ledger order.
    /// Records whose airdrop is gone from the catalog are skipped.
    pub fn tracked(&self) -> Vec<TrackedAirdrop<'_>> {
        self.join(self.records())
    }

    /// Tracked airdrops with a deadline 1 to 30 days after `today`,
    /// soonest first, at most five
    pub fn upcoming_deadlines(&self, today: NaiveDate) -> Vec<UpcomingDeadline<'_>> {
        upcoming_of(&self.tracked(), today)
    }

    /// Stats, join view and upcoming deadlines over a single snapshot
    pub fn portfolio(&self, today: NaiveDate) -> Portfolio<'_> {
        let records = self.records();
        let stats = self.stats_of(&records);
        let tracking = self.join(records);
        let upcoming_deadlines = upcoming_of(&tracking, today);

        Portfolio {
            stats,
            tracking,
            upcoming_deadlines,
        }
    }

    fn stats_of(&self, records: &[TrackingRecord]) -> TrackingStats {
        let mut stats = TrackingStats::default();

        for record in records {
            stats.count += 1;
            *stats.by_status.entry(record.status.clone()).or_insert(0) += 1;

            if let Some(airdrop) = self.catalog.get(&record.airdrop_id) {
                stats.total_value_min += airdrop.estimated_value.min;
                stats.total_value_max += airdrop.estimated_value.max;
            }
        }

        stats
    }

    fn join(&self, records: Vec<TrackingRecord>) -> Vec<TrackedAirdrop<'_>> {
        records
            .into_iter()
            .filter_map(|record| {
                self.catalog
                    .get(&record.airdrop_id)
                    .map(|airdrop| TrackedAirdrop { airdrop, record })
            })
            .collect()
    }
}

fn upcoming_of<'a>(
    tracked: &[TrackedAirdrop<'a>],
    today: NaiveDate,
) -> Vec<UpcomingDeadline<'a>> {
    let mut upcoming: Vec<UpcomingDeadline<'a>> = tracked
        .iter()
        .filter_map(|tracked| {
            let days_left = tracked.airdrop.days_until_deadline(today)?;
            (1..=UPCOMING_WINDOW_DAYS)
                .contains(&days_left)
                .then_some(UpcomingDeadline {
                    airdrop: tracked.airdrop,
                    days_left,
                })
        })
        .collect();

    upcoming.sort_by_key(|u| u.days_left);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}
