//! The error record data model and its invariant helpers.

use serde::Deserialize;
use serde::Serialize;

/// Browser recorded when the reporting browser is unknown.
pub const DEFAULT_BROWSER: &str = "Chrome";

/// Informational severity of a reported error. No workflow rule depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Developer-facing workflow state of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDev {
    #[default]
    Open,
    InProgress,
    Fixed,
    WontFix,
}

impl StatusDev {
    /// Sort rank for the `oldest_open_first` sort mode: open sorts first,
    /// won't-fix last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
            Self::Fixed => 2,
            Self::WontFix => 3,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Fixed => "Fixed",
            Self::WontFix => "Won't fix",
        }
    }
}

/// A single tracked error report. The sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Opaque unique identifier, assigned at creation and never changed.
    pub id: String,
    /// The reported error message. Non-empty after trimming; also the
    /// de-duplication key (trimmed, case-insensitive).
    pub error_message: String,
    /// Free-text interpretation of the cause. May be empty.
    pub context: String,
    /// Source file the error was reported from, if known.
    pub source_file: String,
    /// Line in `source_file`, if known.
    pub line: Option<i64>,
    /// Column in `source_file`, if known.
    pub column: Option<i64>,
    /// Reporting browser. Defaults to [`DEFAULT_BROWSER`] when unknown.
    pub browser: String,
    /// Informational severity.
    pub severity: Severity,
    /// Workflow state.
    pub status_dev: StatusDev,
    /// Developer the record is assigned to. May be empty.
    pub assigned_dev: String,
    /// Whether support confirmed the fix. Only meaningful while
    /// `status_dev` is [`StatusDev::Fixed`].
    pub fix_confirmed_support: bool,
    /// ISO-8601 creation timestamp. Immutable.
    pub created_at: String,
    /// ISO-8601 timestamp of the last mutation.
    pub updated_at: String,
    /// Optional link to external notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_link: Option<String>,
}

/// Caller-supplied fields for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewErrorInput {
    pub error_message: String,
    pub interpretation: String,
    pub status_dev: StatusDev,
    pub notes_link: Option<String>,
}

/// Trim leading and trailing whitespace. Internal whitespace and case are
/// left untouched. Used identically at creation and at de-duplication checks.
pub fn normalize_message(message: &str) -> &str {
    message.trim()
}

/// The key two messages are compared by when checking uniqueness.
pub fn dedup_key(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Enforce the status/confirmation coupling: a fix can only be confirmed
/// while the record is actually fixed. Violations are normalized, never
/// rejected. Callers must re-apply after any field change.
pub fn apply_invariants(mut record: ErrorRecord) -> ErrorRecord {
    if record.status_dev != StatusDev::Fixed && record.fix_confirmed_support {
        record.fix_confirmed_support = false;
    }
    record
}
