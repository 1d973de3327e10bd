//! Pure derivation of the visible entry list.
//!
//! # Invariants
//! - Filtering is a subsequence operation: input order is preserved.
//! - Output depends only on `(entries, query, filter)`.

use crate::model::entry::Entry;
use serde::{Deserialize, Serialize};

/// Entry subset selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFilter {
    #[default]
    All,
    BookmarkedOnly,
}

impl EntryFilter {
    /// Returns the other filter mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::All => Self::BookmarkedOnly,
            Self::BookmarkedOnly => Self::All,
        }
    }

    pub fn admits(self, entry: &Entry) -> bool {
        match self {
            Self::All => true,
            Self::BookmarkedOnly => entry.is_bookmarked,
        }
    }
}

/// What the list area should show for a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// The journal has no entries at all.
    Empty,
    /// Entries exist but none pass the current query/filter.
    NoMatches,
    /// Number of visible entries.
    Showing(usize),
}

impl ListState {
    pub fn from_counts(total: usize, visible: usize) -> Self {
        match (total, visible) {
            (0, _) => Self::Empty,
            (_, 0) => Self::NoMatches,
            (_, visible) => Self::Showing(visible),
        }
    }
}

/// Returns the entries to display for `query` and `filter`.
///
/// `entries` is expected in store order (`updated_at DESC`). A query that is
/// blank after trimming matches everything; otherwise the query, lowercased
/// but otherwise verbatim, must occur in the lowercased title or body.
pub fn visible_entries(entries: &[Entry], query: &str, filter: EntryFilter) -> Vec<Entry> {
    let needle = normalize_query(query);
    entries
        .iter()
        .filter(|entry| filter.admits(entry))
        .filter(|entry| {
            needle
                .as_deref()
                .map_or(true, |needle| entry.matches_lowercase(needle))
        })
        .cloned()
        .collect()
}

fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{visible_entries, EntryFilter, ListState};
    use crate::model::entry::Entry;

    fn sample() -> Vec<Entry> {
        let mut work = Entry::new("Work", "deadline", 2);
        work.is_bookmarked = true;
        let trip = Entry::new("Trip", "Paris", 1);
        vec![work, trip]
    }

    #[test]
    fn blank_query_and_all_filter_keep_everything_in_order() {
        let entries = sample();
        let visible = visible_entries(&entries, "   ", EntryFilter::All);
        assert_eq!(visible, entries);
    }

    #[test]
    fn query_is_case_insensitive() {
        let entries = sample();
        let visible = visible_entries(&entries, "PaRiS", EntryFilter::All);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Trip");
    }

    #[test]
    fn surrounding_whitespace_is_part_of_a_non_blank_query() {
        let entries = sample();
        assert!(visible_entries(&entries, " paris ", EntryFilter::All).is_empty());
    }

    #[test]
    fn bookmark_filter_and_query_intersect() {
        let entries = sample();
        assert_eq!(
            visible_entries(&entries, "", EntryFilter::BookmarkedOnly).len(),
            1
        );
        assert!(visible_entries(&entries, "paris", EntryFilter::BookmarkedOnly).is_empty());
        assert_eq!(
            visible_entries(&entries, "dead", EntryFilter::BookmarkedOnly)[0].title,
            "Work"
        );
    }

    #[test]
    fn toggled_flips_between_modes() {
        assert_eq!(EntryFilter::default(), EntryFilter::All);
        assert_eq!(EntryFilter::All.toggled(), EntryFilter::BookmarkedOnly);
        assert_eq!(EntryFilter::BookmarkedOnly.toggled(), EntryFilter::All);
    }

    #[test]
    fn list_state_distinguishes_empty_from_no_matches() {
        assert_eq!(ListState::from_counts(0, 0), ListState::Empty);
        assert_eq!(ListState::from_counts(3, 0), ListState::NoMatches);
        assert_eq!(ListState::from_counts(3, 2), ListState::Showing(2));
    }
}
