//! Derived views over the collection: search, status filtering, sorting,
//! and aggregate counts. Pure; never mutates or persists anything.

use crate::model::ErrorRecord;
use crate::model::StatusDev;

/// Which workflow states to keep in a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(StatusDev),
}

/// Display order of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Most recently updated first.
    #[default]
    Newest,
    /// Least recently updated first.
    Oldest,
    /// Open before in-progress before fixed before won't-fix; oldest
    /// creation first within each state.
    OldestOpenFirst,
}

/// Aggregate counts over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub open: usize,
    pub in_progress: usize,
    pub fixed: usize,
    pub confirmed: usize,
}

/// Compute the display view: search filter, then status filter, then a
/// stable sort. Timestamps are RFC3339 strings, so comparing them as
/// strings is chronological; ties keep their relative input order.
pub fn view(
    records: &[ErrorRecord],
    search: &str,
    filter: StatusFilter,
    sort: SortMode,
) -> Vec<ErrorRecord> {
    let needle = search.trim().to_lowercase();
    let mut items: Vec<ErrorRecord> = records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record.error_message.to_lowercase().contains(&needle)
                || record.context.to_lowercase().contains(&needle)
        })
        .filter(|record| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status_dev == status,
        })
        .cloned()
        .collect();

    match sort {
        SortMode::Newest => items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Oldest => items.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortMode::OldestOpenFirst => items.sort_by(|a, b| {
            a.status_dev
                .rank()
                .cmp(&b.status_dev.rank())
                .then_with(|| a.created_at.cmp(&b.created_at))
        }),
    }
    items
}

/// Predicate counts for the header display.
pub fn stats(records: &[ErrorRecord]) -> Stats {
    Stats {
        open: records
            .iter()
            .filter(|r| r.status_dev == StatusDev::Open)
            .count(),
        in_progress: records
            .iter()
            .filter(|r| r.status_dev == StatusDev::InProgress)
            .count(),
        fixed: records
            .iter()
            .filter(|r| r.status_dev == StatusDev::Fixed)
            .count(),
        confirmed: records.iter().filter(|r| r.fix_confirmed_support).count(),
    }
}
