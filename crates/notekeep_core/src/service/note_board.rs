//! Note board: the state a notes front-end keeps between user actions.
//!
//! # Responsibility
//! - Load the collection once, then keep a held copy in step with every
//!   repository mutation.
//! - Apply form rules before writing (blank drafts are never saved).
//! - Expose the projected list for display.
//!
//! # Invariants
//! - The held copy changes only after the repository reports the change.
//! - Created notes go to the front of the held copy; updates replace in place.

use crate::clock::Clock;
use crate::model::note::{Note, NoteDraft};
use crate::repo::note_repo::NoteRepository;
use crate::store::KeyValueStore;
use crate::view::projector::{project_notes, ViewQuery};
use log::debug;

/// Result of submitting the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was blank; nothing was written.
    Skipped,
    Created(Note),
    Updated(Note),
    /// Edit target no longer exists in storage.
    Missing,
}

/// Held note list plus the repository it mirrors.
pub struct NoteBoard<S: KeyValueStore, C: Clock> {
    repo: NoteRepository<S, C>,
    notes: Vec<Note>,
}

impl<S: KeyValueStore, C: Clock> NoteBoard<S, C> {
    /// Loads the persisted collection once.
    pub fn open(repo: NoteRepository<S, C>) -> Self {
        let notes = repo.load();
        debug!(
            "event=board_open module=service status=ok count={}",
            notes.len()
        );
        Self { repo, notes }
    }

    /// Held copy in raw persisted order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Filtered, sorted list for display.
    pub fn visible(&self, query: &ViewQuery) -> Vec<Note> {
        project_notes(&self.notes, query)
    }

    /// Saves a draft as a new note, or as an edit of `editing`.
    pub fn submit(&mut self, draft: NoteDraft, editing: Option<&str>) -> SubmitOutcome {
        if draft.is_blank() {
            debug!("event=board_submit module=service status=skipped reason=blank_draft");
            return SubmitOutcome::Skipped;
        }

        match editing {
            Some(id) => match self.repo.update(id, &draft.into_patch()) {
                Some(updated) => {
                    if let Some(held) = self.notes.iter_mut().find(|note| note.id == updated.id) {
                        *held = updated.clone();
                    }
                    SubmitOutcome::Updated(updated)
                }
                None => SubmitOutcome::Missing,
            },
            None => {
                let created = self.repo.create(&draft.title, &draft.content);
                self.notes.insert(0, created.clone());
                SubmitOutcome::Created(created)
            }
        }
    }

    /// Deletes one note. Returns whether storage reported a removal.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.repo.delete(id);
        if removed {
            self.notes.retain(|note| note.id != id);
        }
        removed
    }

    /// Empties storage and the held copy. Confirmation is the caller's job.
    pub fn clear_all(&mut self) {
        self.repo.clear();
        self.notes.clear();
    }

    /// Re-reads storage into the held copy.
    pub fn reload(&mut self) {
        self.notes = self.repo.load();
    }

    pub fn repository(&self) -> &NoteRepository<S, C> {
        &self.repo
    }

    pub fn into_repository(self) -> NoteRepository<S, C> {
        self.repo
    }
}
