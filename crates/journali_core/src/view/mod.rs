//! View state: filtering, editor drafts and the controller that ties them to
//! an entry store.
//!
//! # Responsibility
//! - Derive the visible list as a pure function of entries, query and filter.
//! - Model delete confirmation and edit/compose flows as explicit state.
//!
//! # Invariants
//! - View code never mutates entries directly; all writes go through the store.

pub mod controller;
pub mod editor;
pub mod filter;
