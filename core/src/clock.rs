//! Collaborator seams for wall-clock time and identifier generation.
//!
//! Both are external primitives as far as the lifecycle engine is
//! concerned: the rule engine consumes them but never implements them.

use chrono::SecondsFormat;
use chrono::Utc;
use uuid::Uuid;

/// Source of the current wall-clock time as an ISO-8601 string.
pub trait Clock {
    fn now_iso8601(&self) -> String;
}

/// System clock, millisecond precision, UTC with a `Z` suffix.
///
/// Millisecond RFC3339 keeps lexicographic ordering of the stored strings
/// chronological, which the query layer relies on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Source of record identifiers, unique within the process's lifetime.
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
