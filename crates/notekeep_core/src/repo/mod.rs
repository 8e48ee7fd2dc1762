//! Repository layer over the persisted note collection.
//!
//! # Responsibility
//! - Own every read-modify-write of the serialized note slot.
//! - Decode persisted payloads with per-record validation.
//!
//! # Invariants
//! - Only records passing `Note::validate()` are ever written.
//! - Expected failures (missing note, missing store, corrupt data) surface as
//!   ordinary return values, never as errors.

pub mod codec;
pub mod note_repo;
