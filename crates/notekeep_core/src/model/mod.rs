//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical `Note` record and its edit inputs.
//! - Own validation rules shared by every persistence path.
//!
//! # Invariants
//! - Every note is identified by a stable, non-empty `NoteId`.
//! - `created_at <= updated_at` for every materialized note.

pub mod note;
