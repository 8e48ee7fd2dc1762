//! Caller-side use-case services.
//!
//! # Responsibility
//! - Hold the front-end's read-only copy of the collection.
//! - Merge repository results back into that copy after each mutation.

pub mod note_board;
