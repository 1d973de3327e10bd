//! Editor draft state for composing or editing one entry.
//!
//! # Invariants
//! - `has_edited` becomes true on the first title/body change and stays true.
//! - The discard prompt is only raised for an edited draft.

use crate::model::entry::{validate_title, Entry, EntryId, EntryValidationError};

/// What the editor will do on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(EntryId),
}

/// Result of asking the editor to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// Nothing was edited; the editor may close.
    Closed,
    /// Unsaved changes exist; the discard prompt is now shown.
    ConfirmDiscard,
}

/// Title/body input validated for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub title: String,
    pub body: String,
}

/// In-progress editor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDraft {
    mode: EditorMode,
    title: String,
    body: String,
    has_edited: bool,
    discard_prompt: bool,
}

impl EditorDraft {
    /// Empty draft for a new entry.
    pub fn compose() -> Self {
        Self {
            mode: EditorMode::Create,
            title: String::new(),
            body: String::new(),
            has_edited: false,
            discard_prompt: false,
        }
    }

    /// Draft pre-filled from an existing entry.
    pub fn edit(entry: &Entry) -> Self {
        Self {
            mode: EditorMode::Edit(entry.id),
            title: entry.title.clone(),
            body: entry.body.clone(),
            has_edited: false,
            discard_prompt: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Id of the entry being edited, `None` when composing.
    pub fn editing_id(&self) -> Option<EntryId> {
        match self.mode {
            EditorMode::Create => None,
            EditorMode::Edit(id) => Some(id),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn has_edited(&self) -> bool {
        self.has_edited
    }

    pub fn is_discard_prompt_shown(&self) -> bool {
        self.discard_prompt
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.has_edited = true;
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.has_edited = true;
    }

    /// Whether save is currently allowed.
    pub fn can_save(&self) -> bool {
        validate_title(&self.title).is_ok()
    }

    /// Handles a close request.
    pub fn request_dismiss(&mut self) -> DismissOutcome {
        if self.has_edited {
            self.discard_prompt = true;
            DismissOutcome::ConfirmDiscard
        } else {
            DismissOutcome::Closed
        }
    }

    /// Hides the discard prompt and returns to editing.
    pub fn keep_editing(&mut self) {
        self.discard_prompt = false;
    }

    /// Applies title validation and returns the input to persist.
    pub fn validated(&self) -> Result<ValidatedDraft, EntryValidationError> {
        Ok(ValidatedDraft {
            title: validate_title(&self.title)?,
            body: self.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DismissOutcome, EditorDraft, EditorMode};
    use crate::model::entry::{Entry, EntryValidationError};

    #[test]
    fn untouched_draft_closes_without_prompt() {
        let mut draft = EditorDraft::compose();
        assert_eq!(draft.request_dismiss(), DismissOutcome::Closed);
        assert!(!draft.is_discard_prompt_shown());
    }

    #[test]
    fn edited_draft_asks_before_discarding() {
        let mut draft = EditorDraft::compose();
        draft.set_body("unsaved thoughts");
        assert_eq!(draft.request_dismiss(), DismissOutcome::ConfirmDiscard);
        assert!(draft.is_discard_prompt_shown());

        draft.keep_editing();
        assert!(!draft.is_discard_prompt_shown());
        assert!(draft.has_edited());
    }

    #[test]
    fn edit_draft_is_prefilled_and_tracks_id() {
        let entry = Entry::new("Trip", "Paris", 0);
        let draft = EditorDraft::edit(&entry);
        assert_eq!(draft.mode(), EditorMode::Edit(entry.id));
        assert_eq!(draft.editing_id(), Some(entry.id));
        assert_eq!(draft.title(), "Trip");
        assert_eq!(draft.body(), "Paris");
        assert!(!draft.has_edited());
    }

    #[test]
    fn validated_trims_title_and_keeps_body_verbatim() {
        let mut draft = EditorDraft::compose();
        draft.set_title("  Trip ");
        draft.set_body("  Paris\n");
        let validated = draft.validated().unwrap();
        assert_eq!(validated.title, "Trip");
        assert_eq!(validated.body, "  Paris\n");
    }

    #[test]
    fn blank_title_cannot_be_saved() {
        let mut draft = EditorDraft::compose();
        draft.set_title("   ");
        draft.set_body("body only");
        assert!(!draft.can_save());
        assert_eq!(draft.validated(), Err(EntryValidationError::EmptyTitle));
    }
}
