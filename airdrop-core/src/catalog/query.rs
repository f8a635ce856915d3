//! Catalog filtering and sorting
//!
//! Both operations borrow from the catalog and return a fresh `Vec` of
//! references, so `filter` and `sort` chain without cloning records. Sorting
//! is stable everywhere: ties keep catalog order.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::{AirdropRecord, AirdropStatus, AirdropType};

/// Difficulty buckets accepted as named filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyBand {
    /// difficulty <= 2
    Easy,
    /// difficulty == 3
    Medium,
    /// difficulty >= 4
    Hard,
}

impl DifficultyBand {
    pub fn contains(self, difficulty: u8) -> bool {
        match self {
            DifficultyBand::Easy => difficulty <= 2,
            DifficultyBand::Medium => difficulty == 3,
            DifficultyBand::Hard => difficulty >= 4,
        }
    }
}

/// A parsed `--filter` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    Status(AirdropStatus),
    Kind(AirdropType),
    Difficulty(DifficultyBand),
    /// Case-insensitive substring of id or name (stored lower-cased)
    Text(String),
}

impl FilterSpec {
    /// Parse a filter name. Anything that is not a named filter becomes a
    /// free-text filter.
    pub fn parse(raw: &str) -> Self {
        let f = raw.to_lowercase();
        match f.as_str() {
            "confirmed" => FilterSpec::Status(AirdropStatus::Confirmed),
            "likely" => FilterSpec::Status(AirdropStatus::Likely),
            "possible" => FilterSpec::Status(AirdropStatus::Possible),
            "testnet" => FilterSpec::Kind(AirdropType::Testnet),
            "mainnet" => FilterSpec::Kind(AirdropType::Mainnet),
            "usage" => FilterSpec::Kind(AirdropType::Usage),
            "easy" => FilterSpec::Difficulty(DifficultyBand::Easy),
            "medium" => FilterSpec::Difficulty(DifficultyBand::Medium),
            "hard" => FilterSpec::Difficulty(DifficultyBand::Hard),
            _ => FilterSpec::Text(f),
        }
    }

    pub fn matches(&self, record: &AirdropRecord) -> bool {
        match self {
            FilterSpec::Status(status) => record.status == *status,
            FilterSpec::Kind(kind) => record.kind == *kind,
            FilterSpec::Difficulty(band) => band.contains(record.difficulty),
            FilterSpec::Text(needle) => record.mentions(needle),
        }
    }
}

impl FromStr for FilterSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterSpec::parse(s))
    }
}

/// A parsed `--sort` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// `estimatedValue.max`, highest first
    Value,
    /// `deadlineDate`, soonest first, undated last
    Deadline,
    /// easiest first
    Difficulty,
    Name,
    /// most confident first
    Confidence,
    /// Unknown key: the input order is kept as-is
    Unrecognized(String),
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "value" => SortKey::Value,
            "deadline" => SortKey::Deadline,
            "difficulty" => SortKey::Difficulty,
            "name" => SortKey::Name,
            "confidence" => SortKey::Confidence,
            _ => SortKey::Unrecognized(raw.to_string()),
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

/// Keep the records matching `spec`, in input order. `None` passes
/// everything through.
pub fn filter<'a, I>(records: I, spec: Option<&FilterSpec>) -> Vec<&'a AirdropRecord>
where
    I: IntoIterator<Item = &'a AirdropRecord>,
{
    match spec {
        Some(spec) => records.into_iter().filter(|r| spec.matches(r)).collect(),
        None => records.into_iter().collect(),
    }
}

/// Return the records ordered by `key`.
///
/// With no key the order is status priority (confirmed, likely, possible,
/// ended, unknown), then highest `estimatedValue.max` first.
pub fn sort<'a, I>(records: I, key: Option<&SortKey>) -> Vec<&'a AirdropRecord>
where
    I: IntoIterator<Item = &'a AirdropRecord>,
{
    let mut sorted: Vec<&AirdropRecord> = records.into_iter().collect();

    match key {
        None => sorted.sort_by(|a, b| {
            a.status
                .priority()
                .cmp(&b.status.priority())
                .then_with(|| by_value_desc(a, b))
        }),
        Some(SortKey::Value) => sorted.sort_by(|a, b| by_value_desc(a, b)),
        Some(SortKey::Deadline) => sorted.sort_by(|a, b| by_deadline(a, b)),
        Some(SortKey::Difficulty) => sorted.sort_by_key(|r| r.difficulty),
        Some(SortKey::Name) => sorted.sort_by(|a, b| by_name(a, b)),
        Some(SortKey::Confidence) => sorted.sort_by(|a, b| b.confidence.cmp(&a.confidence)),
        Some(SortKey::Unrecognized(raw)) => {
            tracing::debug!(sort_key = %raw, "Unrecognized sort key, keeping input order");
        }
    }

    sorted
}

fn by_value_desc(a: &AirdropRecord, b: &AirdropRecord) -> Ordering {
    b.estimated_value.max.total_cmp(&a.estimated_value.max)
}

fn by_deadline(a: &AirdropRecord, b: &AirdropRecord) -> Ordering {
    match (a.deadline_on(), b.deadline_on()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Alphabetic order the way a reader expects it: accents and case only
/// break ties, so "Éclipse" sorts between "Abstract" and "Zora".
fn by_name(a: &AirdropRecord, b: &AirdropRecord) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Lower-cased base letters: decompose (NFD) and drop combining marks
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
