mod common;

use common::{memory_repo, ManualClock, SharedStore};
use notekeep_core::{
    IdGenerator, NoteBoard, NoteDraft, NoteRepository, SortKey, SubmitOutcome, ViewQuery,
};

#[test]
fn open_loads_persisted_notes_once() {
    let clock = ManualClock::at(1);
    let mut repo = memory_repo(&clock);
    repo.create("persisted", "");

    let board = NoteBoard::open(repo);
    assert_eq!(board.notes().len(), 1);
    assert_eq!(board.notes()[0].title, "persisted");
}

#[test]
fn blank_draft_is_skipped_without_writing() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));

    let outcome = board.submit(NoteDraft::new("   ", "\n"), None);
    assert_eq!(outcome, SubmitOutcome::Skipped);
    assert!(board.is_empty());
    assert!(board.repository().load().is_empty());
}

#[test]
fn created_notes_are_prepended_to_held_copy() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));

    board.submit(NoteDraft::new("first", ""), None);
    clock.set(2);
    let outcome = board.submit(NoteDraft::new("", "only content"), None);
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected created outcome, got {outcome:?}");
    };
    assert_eq!(created.display_title(), "Untitled");

    assert_eq!(board.notes()[0].id, created.id);
    assert_eq!(board.notes(), board.repository().load().as_slice());
}

#[test]
fn edit_replaces_note_in_place() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));
    let SubmitOutcome::Created(older) = board.submit(NoteDraft::new("older", "a"), None) else {
        panic!("expected created outcome");
    };
    board.submit(NoteDraft::new("newer", "b"), None);

    clock.set(10);
    let outcome = board.submit(NoteDraft::new(" older v2 ", " a2 "), Some(&older.id));
    let SubmitOutcome::Updated(updated) = outcome else {
        panic!("expected updated outcome, got {outcome:?}");
    };
    assert_eq!(updated.title, "older v2");
    assert_eq!(updated.content, "a2");
    assert_eq!(updated.updated_at, 10);

    assert_eq!(board.notes()[1], updated);
    assert_eq!(board.get(&older.id), Some(&updated));
}

#[test]
fn editing_vanished_note_reports_missing() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));

    let outcome = board.submit(NoteDraft::new("ghost", ""), Some("gone"));
    assert_eq!(outcome, SubmitOutcome::Missing);
    assert!(board.is_empty());
}

#[test]
fn remove_updates_held_copy_only_on_success() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));
    let SubmitOutcome::Created(note) = board.submit(NoteDraft::new("bye", ""), None) else {
        panic!("expected created outcome");
    };

    assert!(!board.remove("unknown"));
    assert_eq!(board.notes().len(), 1);

    assert!(board.remove(&note.id));
    assert!(board.is_empty());
    assert!(board.repository().load().is_empty());
}

#[test]
fn clear_all_empties_storage_and_held_copy() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));
    board.submit(NoteDraft::new("a", ""), None);
    board.submit(NoteDraft::new("b", ""), None);

    board.clear_all();
    assert!(board.is_empty());
    assert!(board.repository().load().is_empty());
}

#[test]
fn visible_projects_held_copy() {
    let clock = ManualClock::at(1);
    let mut board = NoteBoard::open(memory_repo(&clock));
    board.submit(NoteDraft::new("Groceries", "milk"), None);
    clock.set(2);
    board.submit(NoteDraft::new("Todo", "buy milk"), None);
    clock.set(3);
    board.submit(NoteDraft::new("Ideas", "novel"), None);

    let milk = board.visible(&ViewQuery::new("milk", SortKey::Title));
    let titles: Vec<&str> = milk.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, vec!["Groceries", "Todo"]);
}

#[test]
fn reload_picks_up_external_writes() {
    let clock = ManualClock::at(1);
    let store = SharedStore::default();
    let mut board = NoteBoard::open(NoteRepository::with_parts(
        store.clone(),
        &clock,
        IdGenerator::new(),
    ));
    board.submit(NoteDraft::new("kept", ""), None);

    let mut other = NoteRepository::with_parts(store, &clock, IdGenerator::new());
    clock.set(2);
    let external = other.create("written elsewhere", "");

    assert_eq!(board.notes().len(), 1);
    assert!(board.get(&external.id).is_none());

    board.reload();
    assert_eq!(board.notes().len(), 2);
    assert_eq!(board.notes()[0].id, external.id);
}
