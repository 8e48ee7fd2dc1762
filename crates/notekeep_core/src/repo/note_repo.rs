//! Note repository over a single key-value slot.
//!
//! # Responsibility
//! - Provide load/save/create/update/delete/clear over the persisted array.
//! - Assign ids and timestamps on create; bump `updated_at` on update.
//!
//! # Invariants
//! - Every mutation is one synchronous read-modify-write of the whole slot.
//! - Store failures degrade to non-durable behavior for that call and are
//!   logged, never returned.
//! - A mutation whose read failed never writes, so an unreadable slot is
//!   never replaced by a partial collection.
//! - Generated ids never collide with an id already in the collection.

use crate::clock::{Clock, SystemClock};
use crate::id::IdGenerator;
use crate::model::note::{Note, NotePatch};
use crate::repo::codec::{decode_notes, encode_notes};
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Storage slot used by the original notes page.
pub const DEFAULT_STORAGE_KEY: &str = "qwik-notes-v1";

const MAX_ID_ATTEMPTS: usize = 8;

/// Sole writer of the persisted note collection.
pub struct NoteRepository<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    key: String,
    clock: C,
    ids: IdGenerator,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Creates a repository on the default key with system clock and ids.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, SystemClock, IdGenerator::new())
    }
}

impl<S: KeyValueStore, C: Clock> NoteRepository<S, C> {
    /// Creates a repository with injected clock and id generator.
    pub fn with_parts(store: S, clock: C, ids: IdGenerator) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            clock,
            ids,
        }
    }

    /// Overrides the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the collection in persisted order.
    ///
    /// Missing key, unreadable store and malformed payloads all yield an
    /// empty collection. Malformed individual records are dropped.
    pub fn load(&self) -> Vec<Note> {
        self.read().unwrap_or_default()
    }

    /// `None` when the store itself failed; a missing key is an empty `Some`.
    fn read(&self) -> Option<Vec<Note>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Some(Vec::new()),
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=degraded error_code=store_read_failed error={err}"
                );
                return None;
            }
        };

        match decode_notes(&raw) {
            Ok(decoded) => {
                if decoded.is_lossy() {
                    warn!(
                        "event=notes_load module=repo status=salvaged kept={} rejected={} duplicates={}",
                        decoded.notes.len(),
                        decoded.rejected,
                        decoded.duplicates
                    );
                } else {
                    debug!(
                        "event=notes_load module=repo status=ok count={}",
                        decoded.notes.len()
                    );
                }
                Some(decoded.notes)
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=degraded error_code=payload_malformed error={err}"
                );
                Some(Vec::new())
            }
        }
    }

    /// Replaces the whole persisted collection.
    ///
    /// Records failing validation, and repeated ids after the first, are not
    /// written. Store failures are logged and swallowed.
    pub fn save(&mut self, notes: &[Note]) {
        let mut seen = HashSet::with_capacity(notes.len());
        let mut valid = Vec::with_capacity(notes.len());
        for note in notes {
            if note.validate().is_ok() && seen.insert(note.id.as_str()) {
                valid.push(note.clone());
            }
        }
        let skipped = notes.len() - valid.len();
        if skipped > 0 {
            warn!("event=notes_save module=repo status=filtered skipped={skipped}");
        }

        self.write(&valid);
    }

    /// Creates a note, prepends it and persists the collection.
    ///
    /// The note is returned even when it could not be persisted. When the
    /// store cannot be read, nothing is written.
    pub fn create(&mut self, title: &str, content: &str) -> Note {
        let stored = self.read();
        let id = self.fresh_id(stored.as_deref().unwrap_or_default());
        let note = Note::new(id, title, content, self.clock.now_ms().max(0));
        let durable = match stored {
            Some(mut notes) => {
                notes.insert(0, note.clone());
                self.write(&notes)
            }
            None => false,
        };
        info!(
            "event=note_create module=repo status=ok note_id={} durable={durable}",
            note.id
        );
        note
    }

    /// Applies `patch` to the note with `id`.
    ///
    /// Returns `None`, leaving the collection untouched, when no note matches.
    pub fn update(&mut self, id: &str, patch: &NotePatch) -> Option<Note> {
        let mut notes = self.read()?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_update module=repo status=not_found note_id={id}");
            return None;
        };

        note.apply_patch(patch, self.clock.now_ms());
        let updated = note.clone();
        let durable = self.write(&notes);
        info!(
            "event=note_update module=repo status=ok note_id={} durable={durable}",
            updated.id
        );
        Some(updated)
    }

    /// Removes the note with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(mut notes) = self.read() else {
            return false;
        };
        let before = notes.len();
        notes.retain(|note| note.id != id);
        let removed = notes.len() != before;
        if removed {
            let durable = self.write(&notes);
            info!("event=note_delete module=repo status=ok note_id={id} durable={durable}");
        } else {
            debug!("event=note_delete module=repo status=not_found note_id={id}");
        }
        removed
    }

    /// Empties the collection in one write.
    pub fn clear(&mut self) {
        self.save(&[]);
        info!("event=notes_clear module=repo status=ok");
    }

    fn fresh_id(&mut self, notes: &[Note]) -> String {
        let taken: HashSet<&str> = notes.iter().map(|note| note.id.as_str()).collect();
        let mut candidate = self.ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            warn!("event=id_generate module=repo status=collision");
            candidate = self.ids.next_id();
        }
        // Exhausted retries: suffix until unique.
        let mut suffix = 1_u32;
        let base = candidate;
        let mut candidate = base.clone();
        while taken.contains(candidate.as_str()) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        candidate
    }

    fn write(&mut self, notes: &[Note]) -> bool {
        let payload = match encode_notes(notes) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    "event=notes_write module=repo status=degraded error_code=encode_failed error={err}"
                );
                return false;
            }
        };
        match self.store.set(&self.key, &payload) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=notes_write module=repo status=degraded error_code=store_write_failed error={err}"
                );
                false
            }
        }
    }
}
