//! Core domain logic for Journali.
//! This crate is the single source of truth for journal invariants; UI
//! layers call into the store and controller exposed here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use config::{ConfigError, JournalConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    body_preview, format_entry_date, validate_title, Entry, EntryId, EntryValidationError,
};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use store::clock::{Clock, ManualClock, SystemClock};
pub use store::entry_store::{
    sort_entries, CommitStatus, CreatedEntry, EntryStore, StoreEvent, StoreListener,
    SubscriptionId,
};
pub use view::controller::{EntryRow, JournalController};
pub use view::editor::{DismissOutcome, EditorDraft, EditorMode, ValidatedDraft};
pub use view::filter::{visible_entries, EntryFilter, ListState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
