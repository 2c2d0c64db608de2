//! Copying a record out to the system clipboard.
//!
//! The clipboard is an external side-channel: failure is an ordinary value
//! for the presentation layer to surface as a soft indicator, never a
//! panic or an ambient swallow.

use thiserror::Error;

use crate::model::ErrorRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// One-line plain-text summary of a record, suitable for pasting into a
/// chat message or ticket.
pub fn record_summary(record: &ErrorRecord) -> String {
    let location = match (record.source_file.as_str(), record.line, record.column) {
        ("", _, _) => String::new(),
        (file, Some(line), Some(column)) => format!(" ({file}:{line}:{column})"),
        (file, Some(line), None) => format!(" ({file}:{line})"),
        (file, _, _) => format!(" ({file})"),
    };
    format!(
        "[{}] {}{location}",
        record.status_dev.label(),
        record.error_message
    )
}

/// Put the record summary on the system clipboard.
pub fn copy_to_clipboard(record: &ErrorRecord) -> Result<(), ExportError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(record_summary(record))?;
    Ok(())
}
