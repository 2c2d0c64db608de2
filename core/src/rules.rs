//! The rule engine: invariant-preserving create/update/delete over a
//! snapshot of the collection.
//!
//! Every operation is a pure function of its inputs and returns the next
//! collection; persisting and publishing the result is the collection
//! store's job. Validation failures are detected before any state change.

use thiserror::Error;

use crate::clock::Clock;
use crate::clock::IdSource;
use crate::model::DEFAULT_BROWSER;
use crate::model::ErrorRecord;
use crate::model::NewErrorInput;
use crate::model::Severity;
use crate::model::StatusDev;
use crate::model::apply_invariants;
use crate::model::dedup_key;
use crate::model::normalize_message;

/// Why a creation attempt was rejected. No state changes on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("error message is empty")]
    EmptyMessage,
    #[error("an error with message `{0}` is already tracked")]
    DuplicateMessage(String),
}

/// Partial fields for an update. `None` leaves the field untouched;
/// for the nullable fields, `Some(None)` clears the stored value.
/// `id` and `created_at` are immutable and therefore not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePatch {
    pub error_message: Option<String>,
    pub context: Option<String>,
    pub source_file: Option<String>,
    pub line: Option<Option<i64>>,
    pub column: Option<Option<i64>>,
    pub browser: Option<String>,
    pub severity: Option<Severity>,
    pub status_dev: Option<StatusDev>,
    pub assigned_dev: Option<String>,
    pub fix_confirmed_support: Option<bool>,
    pub notes_link: Option<Option<String>>,
}

/// Build and prepend a new record.
///
/// Rejects an empty message and, per the uniqueness rule, a message already
/// present in `current` under trimmed case-insensitive comparison.
/// Uniqueness is enforced only here, never on updates.
pub fn create(
    input: &NewErrorInput,
    current: &[ErrorRecord],
    clock: &dyn Clock,
    ids: &dyn IdSource,
) -> Result<(ErrorRecord, Vec<ErrorRecord>), ValidationError> {
    let message = normalize_message(&input.error_message);
    if message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    let key = dedup_key(message);
    if current
        .iter()
        .any(|record| dedup_key(&record.error_message) == key)
    {
        return Err(ValidationError::DuplicateMessage(message.to_string()));
    }

    let now = clock.now_iso8601();
    let notes_link = input
        .notes_link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string);
    let record = apply_invariants(ErrorRecord {
        id: ids.next_id(),
        error_message: message.to_string(),
        context: input.interpretation.trim().to_string(),
        source_file: String::new(),
        line: None,
        column: None,
        browser: DEFAULT_BROWSER.to_string(),
        severity: Severity::Medium,
        status_dev: input.status_dev,
        assigned_dev: String::new(),
        fix_confirmed_support: false,
        created_at: now.clone(),
        updated_at: now,
        notes_link,
    });

    let mut next = Vec::with_capacity(current.len() + 1);
    next.push(record.clone());
    next.extend_from_slice(current);
    Ok((record, next))
}

/// Merge `patch` over the record with `id`, refresh `updated_at`, and
/// re-apply invariants. The record keeps its position; an unknown id is a
/// silent no-op, since callers derive ids from the published collection.
pub fn update(
    id: &str,
    patch: &UpdatePatch,
    current: &[ErrorRecord],
    clock: &dyn Clock,
) -> Vec<ErrorRecord> {
    current
        .iter()
        .map(|record| {
            if record.id != id {
                return record.clone();
            }
            let mut next = record.clone();
            if let Some(message) = &patch.error_message {
                next.error_message = message.clone();
            }
            if let Some(context) = &patch.context {
                next.context = context.clone();
            }
            if let Some(source_file) = &patch.source_file {
                next.source_file = source_file.clone();
            }
            if let Some(line) = patch.line {
                next.line = line;
            }
            if let Some(column) = patch.column {
                next.column = column;
            }
            if let Some(browser) = &patch.browser {
                next.browser = browser.clone();
            }
            if let Some(severity) = patch.severity {
                next.severity = severity;
            }
            if let Some(status_dev) = patch.status_dev {
                next.status_dev = status_dev;
            }
            if let Some(assigned_dev) = &patch.assigned_dev {
                next.assigned_dev = assigned_dev.clone();
            }
            if let Some(confirmed) = patch.fix_confirmed_support {
                next.fix_confirmed_support = confirmed;
            }
            if let Some(notes_link) = &patch.notes_link {
                next.notes_link = notes_link.clone();
            }
            next.updated_at = clock.now_iso8601();
            apply_invariants(next)
        })
        .collect()
}

/// Remove the record with `id` if present; no-op otherwise.
pub fn delete(id: &str, current: &[ErrorRecord]) -> Vec<ErrorRecord> {
    current
        .iter()
        .filter(|record| record.id != id)
        .cloned()
        .collect()
}
