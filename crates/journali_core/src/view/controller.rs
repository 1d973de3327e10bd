//! View state controller: transient UI intent over an entry store.
//!
//! # Responsibility
//! - Hold search query, filter mode, pending delete and the open editor.
//! - Keep the visible list derived from the store's current contents.
//!
//! # Invariants
//! - The visible list is recomputed wholesale, never patched.
//! - Store events mark the derived list stale; every controller operation
//!   re-derives before returning, so reads never observe a stale list.
//! - A rejected save leaves editor and store untouched.

use crate::model::entry::{body_preview, validate_title, Entry, EntryId, EntryValidationError};
use crate::repo::entry_repo::EntryRepository;
use crate::store::entry_store::{CommitStatus, CreatedEntry, EntryStore, SubscriptionId};
use crate::view::editor::{DismissOutcome, EditorDraft, EditorMode};
use crate::view::filter::{visible_entries, EntryFilter, ListState};
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

const ROW_PREVIEW_CHARS: usize = 120;

/// Display projection of one visible entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: EntryId,
    pub title: String,
    /// `updated_at` as `dd/mm/yyyy`.
    pub date_label: String,
    pub body_preview: String,
    pub is_bookmarked: bool,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            date_label: entry.date_label(),
            body_preview: body_preview(&entry.body, ROW_PREVIEW_CHARS),
            is_bookmarked: entry.is_bookmarked,
        }
    }
}

/// Journal screen state bound to one entry store.
pub struct JournalController<R: EntryRepository> {
    store: EntryStore<R>,
    subscription: SubscriptionId,
    stale: Rc<Cell<bool>>,
    query: String,
    filter: EntryFilter,
    pending_delete_id: Option<EntryId>,
    editor: Option<EditorDraft>,
    visible: Vec<Entry>,
}

impl<R: EntryRepository> JournalController<R> {
    /// Binds a controller to an explicitly constructed store.
    pub fn new(mut store: EntryStore<R>) -> Self {
        let stale = Rc::new(Cell::new(false));
        let listener_flag = Rc::clone(&stale);
        let subscription = store.subscribe(move |_| listener_flag.set(true));

        let mut controller = Self {
            store,
            subscription,
            stale,
            query: String::new(),
            filter: EntryFilter::default(),
            pending_delete_id: None,
            editor: None,
            visible: Vec::new(),
        };
        controller.recompute();
        controller
    }

    /// Releases the store, detaching this controller's listener.
    pub fn into_store(mut self) -> EntryStore<R> {
        self.store.unsubscribe(self.subscription);
        self.store
    }

    pub fn store(&self) -> &EntryStore<R> {
        &self.store
    }

    /// Entries for the current query and filter, in store order.
    pub fn visible_entries(&self) -> &[Entry] {
        &self.visible
    }

    /// Row projections of [`Self::visible_entries`].
    pub fn rows(&self) -> Vec<EntryRow> {
        self.visible.iter().map(EntryRow::from).collect()
    }

    pub fn list_state(&self) -> ListState {
        ListState::from_counts(self.store.len(), self.visible.len())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn filter(&self) -> EntryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: EntryFilter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn toggle_filter(&mut self) {
        self.set_filter(self.filter.toggled());
    }

    /// Re-reads the store from persistence.
    pub fn reload(&mut self) {
        self.store.reload();
        self.refresh();
    }

    /// Validates and creates a new entry directly.
    ///
    /// # Errors
    /// - [`EntryValidationError::EmptyTitle`] when the trimmed title is empty;
    ///   nothing is created.
    pub fn create_entry(
        &mut self,
        title: &str,
        body: &str,
    ) -> Result<CreatedEntry, EntryValidationError> {
        let title = validate_title(title)?;
        let created = self.store.create(&title, body);
        self.refresh();
        Ok(created)
    }

    pub fn toggle_bookmark(&mut self, id: EntryId) -> CommitStatus {
        let commit = self.store.toggle_bookmark(id);
        self.refresh();
        commit
    }

    pub fn pending_delete_id(&self) -> Option<EntryId> {
        self.pending_delete_id
    }

    /// Stages `id` for deletion. Returns `false` for unknown ids.
    pub fn request_delete(&mut self, id: EntryId) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.pending_delete_id = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete_id = None;
    }

    /// Deletes the staged entry. Returns `None` when nothing was staged.
    pub fn confirm_delete(&mut self) -> Option<CommitStatus> {
        let id = self.pending_delete_id.take()?;
        let commit = self.store.delete(id);
        if self.pending_edit_id() == Some(id) {
            self.editor = None;
        }
        self.refresh();
        Some(commit)
    }

    /// Id of the entry currently open for editing.
    pub fn pending_edit_id(&self) -> Option<EntryId> {
        self.editor.as_ref().and_then(EditorDraft::editing_id)
    }

    pub fn editor(&self) -> Option<&EditorDraft> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorDraft> {
        self.editor.as_mut()
    }

    /// Opens an empty editor for a new entry.
    pub fn begin_compose(&mut self) {
        self.editor = Some(EditorDraft::compose());
    }

    /// Opens the editor on an existing entry. Returns `false` for unknown ids.
    pub fn begin_edit(&mut self, id: EntryId) -> bool {
        match self.store.get(id) {
            Some(entry) => {
                self.editor = Some(EditorDraft::edit(entry));
                true
            }
            None => false,
        }
    }

    /// Closes the editor without saving.
    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Asks the editor to close; unsaved edits raise the discard prompt
    /// instead. Returns `None` when no editor is open.
    pub fn dismiss_editor(&mut self) -> Option<DismissOutcome> {
        let outcome = self.editor.as_mut()?.request_dismiss();
        if outcome == DismissOutcome::Closed {
            self.editor = None;
        }
        Some(outcome)
    }

    /// Saves the open editor draft, creating or updating as its mode says.
    ///
    /// Returns `Ok(CommitStatus::Skipped)` when no editor is open.
    ///
    /// # Errors
    /// - [`EntryValidationError::EmptyTitle`]; the editor stays open with its
    ///   draft unchanged.
    pub fn save_editor(&mut self) -> Result<CommitStatus, EntryValidationError> {
        let Some(draft) = self.editor.as_ref() else {
            return Ok(CommitStatus::Skipped);
        };
        let mode = draft.mode();
        let validated = draft.validated().map_err(|err| {
            debug!("event=editor_save module=view status=rejected reason={err}");
            err
        })?;

        let commit = match mode {
            EditorMode::Create => self.store.create(&validated.title, &validated.body).commit,
            EditorMode::Edit(id) => self.store.update(id, &validated.title, &validated.body),
        };
        self.editor = None;
        self.refresh();
        Ok(commit)
    }

    /// Saves `title`/`body` into the entry open for editing.
    ///
    /// Returns `Ok(CommitStatus::Skipped)` when no entry is being edited.
    ///
    /// # Errors
    /// - [`EntryValidationError::EmptyTitle`]; state is left unchanged.
    pub fn save_edit(
        &mut self,
        title: &str,
        body: &str,
    ) -> Result<CommitStatus, EntryValidationError> {
        let Some(id) = self.pending_edit_id() else {
            return Ok(CommitStatus::Skipped);
        };
        let title = validate_title(title)?;
        let commit = self.store.update(id, &title, body);
        self.editor = None;
        self.refresh();
        Ok(commit)
    }

    fn refresh(&mut self) {
        if self.stale.replace(false) {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.visible = visible_entries(self.store.entries(), &self.query, self.filter);
    }
}
