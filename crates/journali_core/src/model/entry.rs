//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the only persisted record of the journal.
//! - Own the title validation rule shared by every create/save path.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `updated_at >= created_at` for every valid entry.
//! - A title is accepted only when it is non-empty after trimming.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable identifier for every journal entry.
pub type EntryId = Uuid;

/// Validation errors for entry input and persisted entry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Title is empty after trimming surrounding whitespace.
    EmptyTitle,
    /// `updated_at` is earlier than `created_at`.
    UpdatedBeforeCreated { created_at: i64, updated_at: i64 },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title cannot be empty"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// A single journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub body: String,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    pub updated_at: i64,
    pub is_bookmarked: bool,
}

impl Entry {
    /// Creates a new, unbookmarked entry stamped with `now_ms`.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now_ms`.
    /// - The title is stored as given; callers validate it first.
    pub fn new(title: impl Into<String>, body: impl Into<String>, now_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4(), title, body, now_ms)
    }

    /// Creates an entry with a caller-provided id.
    pub fn with_id(
        id: EntryId,
        title: impl Into<String>,
        body: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            created_at: now_ms,
            updated_at: now_ms,
            is_bookmarked: false,
        }
    }

    /// Replaces title and body, refreshing `updated_at` in the same step.
    pub fn edit(&mut self, title: impl Into<String>, body: impl Into<String>, now_ms: i64) {
        self.title = title.into();
        self.body = body.into();
        self.touch(now_ms);
    }

    /// Flips the bookmark flag, refreshing `updated_at` in the same step.
    pub fn toggle_bookmark(&mut self, now_ms: i64) {
        self.is_bookmarked = !self.is_bookmarked;
        self.touch(now_ms);
    }

    /// Checks timestamp ordering of persisted state.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.updated_at < self.created_at {
            return Err(EntryValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Returns whether title or body contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }

    /// `updated_at` rendered as `dd/mm/yyyy`.
    pub fn date_label(&self) -> String {
        format_entry_date(self.updated_at)
    }

    // `updated_at` never moves backwards, even with a skewed clock.
    fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.updated_at);
    }
}

/// Applies the journal's single title rule and returns the trimmed title.
///
/// # Errors
/// - Returns [`EntryValidationError::EmptyTitle`] when the trimmed title is empty.
pub fn validate_title(title: &str) -> Result<String, EntryValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Formats epoch milliseconds as a UTC `dd/mm/yyyy` date label.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_entry_date(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|value| value.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Collapses whitespace runs and keeps the first `max_chars` characters.
pub fn body_preview(body: &str, max_chars: usize) -> String {
    let normalized = WHITESPACE_RE.replace_all(body, " ");
    let trimmed = normalized.trim();
    let mut preview = trimmed.chars().take(max_chars).collect::<String>();
    if trimmed.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::{body_preview, format_entry_date, validate_title, Entry, EntryValidationError};

    #[test]
    fn new_entry_has_equal_timestamps_and_no_bookmark() {
        let entry = Entry::new("Trip", "Paris", 1_000);
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.updated_at, 1_000);
        assert!(!entry.is_bookmarked);
    }

    #[test]
    fn edit_and_toggle_refresh_updated_at_only() {
        let mut entry = Entry::new("Trip", "Paris", 1_000);
        entry.edit("Trip 2", "Rome", 2_000);
        assert_eq!(entry.title, "Trip 2");
        assert_eq!(entry.updated_at, 2_000);
        entry.toggle_bookmark(3_000);
        assert!(entry.is_bookmarked);
        assert_eq!(entry.updated_at, 3_000);
        assert_eq!(entry.created_at, 1_000);
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut entry = Entry::new("Trip", "Paris", 5_000);
        entry.toggle_bookmark(4_000);
        assert_eq!(entry.updated_at, 5_000);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn validate_rejects_reversed_timestamps() {
        let mut entry = Entry::new("Trip", "Paris", 5_000);
        entry.updated_at = 1;
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::UpdatedBeforeCreated { .. })
        ));
    }

    #[test]
    fn validate_title_trims_and_rejects_blank() {
        assert_eq!(validate_title("  Work \n").unwrap(), "Work");
        assert_eq!(validate_title(" \t "), Err(EntryValidationError::EmptyTitle));
        assert_eq!(validate_title(""), Err(EntryValidationError::EmptyTitle));
    }

    #[test]
    fn date_label_uses_day_month_year() {
        // 2025-10-21T12:00:00Z
        assert_eq!(format_entry_date(1_761_048_000_000), "21/10/2025");
    }

    #[test]
    fn body_preview_collapses_whitespace_and_truncates() {
        assert_eq!(body_preview("a\n\n  b\tc", 10), "a b c");
        assert_eq!(body_preview("abcdefgh", 3), "abc...");
    }

    #[test]
    fn matches_lowercase_checks_title_and_body() {
        let entry = Entry::new("Trip", "PARIS in spring", 0);
        assert!(entry.matches_lowercase("paris"));
        assert!(entry.matches_lowercase("tri"));
        assert!(!entry.matches_lowercase("rome"));
    }
}
