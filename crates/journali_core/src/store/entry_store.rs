//! Entry store over a repository implementation.
//!
//! # Responsibility
//! - Provide load/create/update/toggle-bookmark/delete for callers.
//! - Write every mutation through to the repository synchronously.
//! - Broadcast [`StoreEvent`]s so derived views know they are stale.
//!
//! # Invariants
//! - `entries` is always sorted by `updated_at DESC, id ASC`.
//! - Issued timestamps are strictly increasing for the store lifetime.
//! - Unknown ids are a silent no-op (`CommitStatus::Skipped`), no event.
//! - A failed commit still applies the change in memory
//!   (`CommitStatus::Failed`) and still notifies.

use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use crate::store::clock::{Clock, SystemClock};
use log::{debug, info, warn};
use std::cmp::Reverse;

/// Callback invoked after each applied store mutation.
pub type StoreListener = Box<dyn FnMut(&StoreEvent)>;

/// Handle returned by [`EntryStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Change notification emitted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Collection was re-read from the repository.
    Reloaded { count: usize },
    Created(EntryId),
    Updated(EntryId),
    BookmarkToggled { id: EntryId, is_bookmarked: bool },
    Deleted(EntryId),
}

/// Outcome of the durable half of a mutation.
///
/// Callers are free to ignore it; it exists so failures are observable.
#[derive(Debug)]
pub enum CommitStatus {
    /// Change applied and persisted.
    Saved,
    /// Target id does not exist; nothing changed.
    Skipped,
    /// Change applied in memory but the repository write failed.
    Failed(RepoError),
}

impl CommitStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&RepoError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of [`EntryStore::create`].
#[derive(Debug)]
pub struct CreatedEntry {
    pub entry: Entry,
    pub commit: CommitStatus,
}

/// Authoritative entry collection with write-through persistence.
pub struct EntryStore<R: EntryRepository> {
    repo: R,
    clock: Box<dyn Clock>,
    entries: Vec<Entry>,
    last_stamp: i64,
    listeners: Vec<(SubscriptionId, StoreListener)>,
    next_subscription_id: u64,
}

impl<R: EntryRepository> EntryStore<R> {
    /// Opens a store on `repo` using the wall clock.
    pub fn open(repo: R) -> Self {
        Self::with_clock(repo, Box::new(SystemClock))
    }

    /// Opens a store on `repo` with a caller-provided clock.
    ///
    /// A repository read failure degrades to an empty collection.
    pub fn with_clock(repo: R, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            repo,
            clock,
            entries: Vec::new(),
            last_stamp: i64::MIN,
            listeners: Vec::new(),
            next_subscription_id: 0,
        };
        store.hydrate();
        store
    }

    /// Returns all entries, most recently touched first.
    pub fn load(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Borrowing variant of [`Self::load`].
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-reads the collection from the repository and notifies.
    ///
    /// Unsaved in-memory changes from failed commits are dropped.
    pub fn reload(&mut self) {
        self.hydrate();
        let count = self.entries.len();
        self.notify(&StoreEvent::Reloaded { count });
    }

    /// Creates and persists a new entry.
    ///
    /// The title is stored as given; validation is the caller's job
    /// (see [`crate::model::entry::validate_title`]).
    pub fn create(&mut self, title: &str, body: &str) -> CreatedEntry {
        let now = self.next_stamp();
        let entry = Entry::new(title, body, now);
        let commit = commit_status(self.repo.insert_entry(&entry), "create", entry.id);

        self.entries.insert(0, entry.clone());
        self.notify(&StoreEvent::Created(entry.id));
        CreatedEntry { entry, commit }
    }

    /// Overwrites title and body of an existing entry.
    pub fn update(&mut self, id: EntryId, title: &str, body: &str) -> CommitStatus {
        let Some(index) = self.position(id) else {
            return skipped("update", id);
        };

        let now = self.next_stamp();
        let entry = &mut self.entries[index];
        entry.edit(title, body, now);
        let commit = commit_status(self.repo.update_entry(entry), "update", id);

        self.promote(index);
        self.notify(&StoreEvent::Updated(id));
        commit
    }

    /// Flips the bookmark flag of an existing entry.
    pub fn toggle_bookmark(&mut self, id: EntryId) -> CommitStatus {
        let Some(index) = self.position(id) else {
            return skipped("toggle_bookmark", id);
        };

        let now = self.next_stamp();
        let entry = &mut self.entries[index];
        entry.toggle_bookmark(now);
        let is_bookmarked = entry.is_bookmarked;
        let commit = commit_status(self.repo.update_entry(entry), "toggle_bookmark", id);

        self.promote(index);
        self.notify(&StoreEvent::BookmarkToggled { id, is_bookmarked });
        commit
    }

    /// Permanently removes an entry.
    pub fn delete(&mut self, id: EntryId) -> CommitStatus {
        let Some(index) = self.position(id) else {
            return skipped("delete", id);
        };

        self.entries.remove(index);
        let commit = commit_status(self.repo.delete_entry(id), "delete", id);

        self.notify(&StoreEvent::Deleted(id));
        commit
    }

    /// Registers a listener for subsequent store events.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(current, _)| *current != id);
        self.listeners.len() != before
    }

    fn hydrate(&mut self) {
        self.entries = match self.repo.list_entries() {
            Ok(mut entries) => {
                sort_entries(&mut entries);
                info!(
                    "event=store_load module=store status=ok count={}",
                    entries.len()
                );
                entries
            }
            Err(err) => {
                warn!("event=store_load module=store status=degraded count=0 error={err}");
                Vec::new()
            }
        };

        if let Some(latest) = self.entries.iter().map(|entry| entry.updated_at).max() {
            self.last_stamp = self.last_stamp.max(latest);
        }
    }

    fn next_stamp(&mut self) -> i64 {
        let stamp = self.clock.now_ms().max(self.last_stamp.saturating_add(1));
        self.last_stamp = stamp;
        stamp
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    // The entry at `index` just received the newest stamp.
    fn promote(&mut self, index: usize) {
        self.entries[..=index].rotate_right(1);
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

/// Sorts entries into default display order: `updated_at DESC, id ASC`.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| (Reverse(entry.updated_at), entry.id));
}

fn commit_status(result: RepoResult<()>, operation: &'static str, id: EntryId) -> CommitStatus {
    match result {
        Ok(()) => {
            debug!("event=entry_{operation} module=store status=ok entry_id={id}");
            CommitStatus::Saved
        }
        Err(err) => {
            warn!("event=entry_{operation} module=store status=error entry_id={id} error={err}");
            CommitStatus::Failed(err)
        }
    }
}

fn skipped(operation: &'static str, id: EntryId) -> CommitStatus {
    debug!("event=entry_{operation} module=store status=skipped reason=not_found entry_id={id}");
    CommitStatus::Skipped
}

#[cfg(test)]
mod tests {
    use super::sort_entries;
    use crate::model::entry::Entry;
    use uuid::Uuid;

    #[test]
    fn sort_orders_by_updated_desc_then_id() {
        let low = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
        let high = Uuid::parse_str("00000000-0000-4000-8000-000000000002").unwrap();
        let mut entries = vec![
            Entry::with_id(high, "b", "", 10),
            Entry::with_id(low, "a", "", 10),
            Entry::new("c", "", 20),
        ];
        sort_entries(&mut entries);
        assert_eq!(entries[0].title, "c");
        assert_eq!(entries[1].id, low);
        assert_eq!(entries[2].id, high);
    }
}
