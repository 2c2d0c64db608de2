//! Record/status lifecycle engine for a browser-error tracker.
//!
//! The collection of tracked errors lives in a client-local key-value
//! store as one JSON blob. This crate owns the data model, the
//! invariant-preserving update rules, the derived display views, and the
//! persistence round-trip (including tolerant upgrades of older stored
//! shapes). Rendering and widgets are someone else's problem.

pub mod clock;
pub mod export;
pub mod migrate;
pub mod model;
pub mod query;
pub mod rules;
pub mod storage;
pub mod store;

pub use clock::Clock;
pub use clock::IdSource;
pub use clock::SystemClock;
pub use clock::UuidSource;
pub use export::ExportError;
pub use model::DEFAULT_BROWSER;
pub use model::ErrorRecord;
pub use model::NewErrorInput;
pub use model::Severity;
pub use model::StatusDev;
pub use query::SortMode;
pub use query::Stats;
pub use query::StatusFilter;
pub use rules::UpdatePatch;
pub use rules::ValidationError;
pub use storage::FileKvStore;
pub use storage::KvStore;
pub use storage::MemKvStore;
pub use storage::NullKvStore;
pub use storage::STORAGE_KEY;
pub use store::ErrorStore;
