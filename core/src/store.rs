//! The collection store: sole owner of the in-memory collection.
//!
//! Every mutation flows through the rule engine, is persisted, and is then
//! republished to observers. All other components only ever see snapshots.

use std::collections::HashSet;

use tracing::info;

use crate::clock::Clock;
use crate::clock::IdSource;
use crate::clock::SystemClock;
use crate::clock::UuidSource;
use crate::model::ErrorRecord;
use crate::model::NewErrorInput;
use crate::model::dedup_key;
use crate::query;
use crate::query::SortMode;
use crate::query::Stats;
use crate::query::StatusFilter;
use crate::rules;
use crate::rules::UpdatePatch;
use crate::rules::ValidationError;
use crate::storage;
use crate::storage::KvStore;

type Observer = Box<dyn Fn(&[ErrorRecord])>;

/// Owns the authoritative collection plus its collaborators.
pub struct ErrorStore {
    kv: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    records: Vec<ErrorRecord>,
    observers: Vec<Observer>,
}

impl ErrorStore {
    /// Load the persisted collection once and publish it.
    pub fn new(kv: Box<dyn KvStore>, clock: Box<dyn Clock>, ids: Box<dyn IdSource>) -> Self {
        let records = storage::load(kv.as_ref());
        info!("error tracker loaded {} records", records.len());
        Self {
            kv,
            clock,
            ids,
            records,
            observers: Vec::new(),
        }
    }

    /// Wire the system clock and random ids around `kv`.
    pub fn with_defaults(kv: Box<dyn KvStore>) -> Self {
        Self::new(kv, Box::new(SystemClock), Box::new(UuidSource))
    }

    /// Register a callback invoked with the new collection after every
    /// completed mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&[ErrorRecord]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The currently published collection.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Create a record. On validation failure nothing changes and nothing
    /// is notified.
    pub fn add_error(&mut self, input: &NewErrorInput) -> Result<ErrorRecord, ValidationError> {
        let (record, next) =
            rules::create(input, &self.records, self.clock.as_ref(), self.ids.as_ref())?;
        self.publish(next);
        Ok(record)
    }

    /// Apply a partial update. Unknown ids are silent no-ops.
    pub fn update_error(&mut self, id: &str, patch: &UpdatePatch) {
        let next = rules::update(id, patch, &self.records, self.clock.as_ref());
        self.publish(next);
    }

    /// Delete a record. Unknown ids are silent no-ops.
    pub fn delete_error(&mut self, id: &str) {
        let next = rules::delete(id, &self.records);
        self.publish(next);
    }

    /// Derived view for display. Never mutates held state.
    pub fn view(&self, search: &str, filter: StatusFilter, sort: SortMode) -> Vec<ErrorRecord> {
        query::view(&self.records, search, filter, sort)
    }

    /// Normalized message keys already in the collection, for
    /// duplicate-checking ahead of submission.
    pub fn existing_messages(&self) -> HashSet<String> {
        self.records
            .iter()
            .map(|record| dedup_key(&record.error_message))
            .collect()
    }

    /// Aggregate counts over the full collection.
    pub fn stats(&self) -> Stats {
        query::stats(&self.records)
    }

    fn publish(&mut self, next: Vec<ErrorRecord>) {
        storage::save(self.kv.as_mut(), &next);
        self.records = next;
        for observer in &self.observers {
            observer(&self.records);
        }
    }
}
