use notekeep_core::{Note, NoteField, NotePatch, NoteValidationError};

#[test]
fn new_note_trims_and_sets_equal_timestamps() {
    let note = Note::new("n1", "  hello ", "\nworld\t", 42);
    assert_eq!(note.title, "hello");
    assert_eq!(note.content, "world");
    assert_eq!(note.created_at, 42);
    assert_eq!(note.updated_at, 42);
    assert!(note.validate().is_ok());
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let note = Note::new("11111111-2222-4333-8444-555555555555", "Title", "Body", 1_700_000_000_000);

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "Title");
    assert_eq!(json["content"], "Body");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_000_000_i64);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn deserialize_rejects_reversed_timestamps() {
    let value = serde_json::json!({
        "id": "n1",
        "title": "t",
        "content": "c",
        "createdAt": 200,
        "updatedAt": 100
    });

    let err = serde_json::from_value::<Note>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("updatedAt (100) must be >= createdAt (200)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_missing_fields() {
    let value = serde_json::json!({ "id": "n1", "title": "t", "content": "c" });
    assert!(serde_json::from_value::<Note>(value).is_err());
}

#[test]
fn validate_rejects_untrimmed_text_and_empty_id() {
    let mut note = Note::new("n1", "t", "c", 1);
    note.content = " padded".to_string();
    assert_eq!(
        note.validate().unwrap_err(),
        NoteValidationError::UntrimmedField {
            field: NoteField::Content
        }
    );

    let blank_id = Note::new("  ", "t", "c", 1);
    assert_eq!(blank_id.validate().unwrap_err(), NoteValidationError::EmptyId);
}

#[test]
fn validate_rejects_negative_timestamps() {
    let note = Note::new("n1", "t", "c", -5);
    assert_eq!(
        note.validate().unwrap_err(),
        NoteValidationError::NegativeTimestamp {
            field: NoteField::CreatedAt,
            value: -5
        }
    );
}

#[test]
fn apply_patch_only_touches_provided_fields() {
    let mut note = Note::new("n1", "title", "content", 10);
    note.apply_patch(&NotePatch::content("  fresh  "), 20);

    assert_eq!(note.id, "n1");
    assert_eq!(note.title, "title");
    assert_eq!(note.content, "fresh");
    assert_eq!(note.created_at, 10);
    assert_eq!(note.updated_at, 20);
    assert!(NotePatch::default().is_empty());
}

#[test]
fn display_title_falls_back_to_untitled() {
    let untitled = Note::new("n1", "   ", "body", 1);
    assert_eq!(untitled.display_title(), "Untitled");
    let titled = Note::new("n2", "Plan", "", 1);
    assert_eq!(titled.display_title(), "Plan");
}
