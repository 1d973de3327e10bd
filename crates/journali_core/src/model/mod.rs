//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical entry record used by store and view layers.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Deletion is permanent; there are no tombstones.

pub mod entry;
