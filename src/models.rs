/// Data Models Module
///
/// This module defines the core data structures used throughout the application.
/// The remote API returns opaque match identifiers; the pipeline pairs each one
/// with the run's capture timestamp before loading.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One row of the destination table: an opaque match identifier stamped
/// with the capture timestamp of the run that produced it.
///
/// Every row of a single run carries the same `last_updated` value, so the
/// timestamp doubles as the batch marker for the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub record: String,
    pub last_updated: DateTime<FixedOffset>,
}
