//! Personal tracking ledger
//!
//! Records which catalog airdrops the user is pursuing, with a free-form
//! status and a 0-100 progress value. The ledger lives in a single JSON file
//! outside the project tree:
//!
//! ```json
//! {
//!   "lastUpdated": "2025-06-01T10:00:00Z",
//!   "tracking": [
//!     { "airdropId": "monad", "status": "farming", "progress": 40, "addedAt": "..." }
//!   ]
//! }
//! ```

mod engine;
mod record;
mod store;

pub use engine::{
    Portfolio, TrackedAirdrop, TrackingAction, TrackingEngine, TrackingOutcome, TrackingStats,
    UpcomingDeadline, UPCOMING_LIMIT, UPCOMING_WINDOW_DAYS,
};
pub use record::{TrackingLedger, TrackingRecord, TrackingUpdate};
pub use store::{FileTrackingStore, LedgerLoad, MemoryTrackingStore, TrackingStore};

/// Maximum number of simultaneously tracked airdrops on the free tier
pub const FREE_TIER_CAP: usize = 10;

/// Status given to newly tracked airdrops unless configured otherwise
pub const DEFAULT_TRACK_STATUS: &str = "farming";
