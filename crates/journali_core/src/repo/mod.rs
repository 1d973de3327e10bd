//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable CRUD contract the entry store writes through.
//! - Isolate SQLite query details from store/view orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Entry::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; the store decides which of them to swallow.

pub mod entry_repo;
