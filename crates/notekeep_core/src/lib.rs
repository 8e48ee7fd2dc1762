//! Core domain logic for notekeep.
//! This crate is the single source of truth for note storage and views.

pub mod clock;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use id::{FallbackIdSource, IdGenerator, IdSource, IdSourceError, OsRandomIdSource};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::note::{Note, NoteDraft, NoteField, NoteId, NotePatch, NoteValidationError};
pub use repo::codec::{decode_notes, encode_notes, DecodeError, DecodedNotes};
pub use repo::note_repo::{NoteRepository, DEFAULT_STORAGE_KEY};
pub use service::note_board::{NoteBoard, SubmitOutcome};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use view::projector::{collate, project_notes, ParseSortKeyError, SortKey, ViewQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
