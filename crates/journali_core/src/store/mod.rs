//! Entry store: authoritative in-memory collection with write-through
//! persistence and change notification.
//!
//! # Responsibility
//! - Own the single consistent view of all entries.
//! - Issue timestamps and keep default ordering (`updated_at DESC`).
//! - Notify subscribers after every applied mutation.
//!
//! # Invariants
//! - Reads issued after a mutating call reflect that mutation.
//! - Not-found and persistence failures never surface as errors.

pub mod clock;
pub mod entry_store;
