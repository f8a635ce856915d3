//! Airdrop catalog records
//!
//! One entry of the catalog's `airdrops` array. Records are read-only for
//! the lifetime of a process.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How certain it is that an airdrop will happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirdropStatus {
    Confirmed,
    Likely,
    Possible,
    Ended,
    /// Any status string this build does not know
    #[serde(other)]
    Unknown,
}

impl AirdropStatus {
    /// Display order of status groups
    pub const ORDER: [AirdropStatus; 5] = [
        AirdropStatus::Confirmed,
        AirdropStatus::Likely,
        AirdropStatus::Possible,
        AirdropStatus::Ended,
        AirdropStatus::Unknown,
    ];

    /// Rank used by the default catalog sort (lower sorts first)
    pub fn priority(self) -> u8 {
        match self {
            AirdropStatus::Confirmed => 0,
            AirdropStatus::Likely => 1,
            AirdropStatus::Possible => 2,
            AirdropStatus::Ended => 3,
            AirdropStatus::Unknown => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AirdropStatus::Confirmed => "confirmed",
            AirdropStatus::Likely => "likely",
            AirdropStatus::Possible => "possible",
            AirdropStatus::Ended => "ended",
            AirdropStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AirdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a user has to do to qualify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirdropType {
    Mainnet,
    Testnet,
    Usage,
    Holder,
    #[serde(other)]
    Other,
}

impl AirdropType {
    pub fn as_str(self) -> &'static str {
        match self {
            AirdropType::Mainnet => "mainnet",
            AirdropType::Testnet => "testnet",
            AirdropType::Usage => "usage",
            AirdropType::Holder => "holder",
            AirdropType::Other => "other",
        }
    }
}

impl fmt::Display for AirdropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated reward range in USD
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimatedValue {
    pub min: f64,
    pub max: f64,
}

/// A qualifying task and its relative weight (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub task: String,
    pub weight: f64,
}

/// A single airdrop opportunity from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropRecord {
    /// Unique, case-insensitive key
    pub id: String,

    /// Human label, used as a secondary lookup key
    pub name: String,

    pub status: AirdropStatus,

    #[serde(rename = "type")]
    pub kind: AirdropType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_raised: Option<String>,

    pub estimated_value: EstimatedValue,

    /// Human-readable deadline ("Q2 2025", "TBA")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Machine-readable deadline, used for sorting and countdowns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,

    /// 1 (trivial) to 5 (grind)
    pub difficulty: u8,

    /// 0-100
    pub confidence: u8,

    #[serde(default)]
    pub requirements: Vec<Requirement>,

    #[serde(default)]
    pub tips: Vec<String>,

    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

impl AirdropRecord {
    /// Parse `deadlineDate` as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp. Anything else is
    /// treated as no deadline at all.
    pub fn deadline_on(&self) -> Option<NaiveDate> {
        let raw = self.deadline_date.as_deref()?.trim();

        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
    }

    /// Whole days from `today` until the deadline (negative once passed)
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline_on()
            .map(|deadline| deadline.signed_duration_since(today).num_days())
    }

    /// Whether `needle` (already lower-cased) occurs in the id or name
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "monad",
            "name": "Monad",
            "status": "confirmed",
            "type": "testnet",
            "chain": "Monad",
            "fundingRaised": "$244M",
            "estimatedValue": { "min": 500, "max": 5000 },
            "deadline": "Q1 2026",
            "deadlineDate": "2026-03-31",
            "difficulty": 2,
            "confidence": 95,
            "requirements": [{ "task": "Use the testnet", "weight": 40 }],
            "tips": ["Be early"],
            "links": { "website": "https://monad.xyz" }
        }"#
    }

    #[test]
    fn test_parse_full_record() {
        let record: AirdropRecord = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(record.id, "monad");
        assert_eq!(record.status, AirdropStatus::Confirmed);
        assert_eq!(record.kind, AirdropType::Testnet);
        assert_eq!(record.funding_raised.as_deref(), Some("$244M"));
        assert_eq!(record.estimated_value.max, 5000.0);
        assert_eq!(record.requirements[0].task, "Use the testnet");
        assert_eq!(record.links["website"], "https://monad.xyz");
    }

    #[test]
    fn test_unknown_status_and_type_do_not_fail() {
        let json = r#"{
            "id": "x", "name": "X", "status": "rumored", "type": "bridge",
            "estimatedValue": { "min": 0, "max": 0 }, "difficulty": 1, "confidence": 10
        }"#;
        let record: AirdropRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.status, AirdropStatus::Unknown);
        assert_eq!(record.status.priority(), 4);
        assert_eq!(record.kind, AirdropType::Other);
        assert!(record.tips.is_empty());
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_deadline_parsing() {
        let mut record: AirdropRecord = serde_json::from_str(sample_json()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert_eq!(
            record.deadline_on(),
            NaiveDate::from_ymd_opt(2026, 3, 31)
        );
        assert_eq!(record.days_until_deadline(today), Some(30));

        record.deadline_date = Some("2026-03-31T12:00:00Z".to_string());
        assert_eq!(record.days_until_deadline(today), Some(30));

        record.deadline_date = Some("soon".to_string());
        assert_eq!(record.deadline_on(), None);

        record.deadline_date = None;
        assert_eq!(record.days_until_deadline(today), None);
    }
}
