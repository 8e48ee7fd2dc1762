//! JSON codec for the persisted note array.
//!
//! # Responsibility
//! - Decode a raw payload into valid notes, record by record.
//! - Encode a note slice into the persisted array shape.
//!
//! # Invariants
//! - Decoding never fails because of one bad record; bad records are
//!   dropped and counted.
//! - Duplicate ids keep their first occurrence.

use crate::model::note::Note;
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload-level decode failure.
#[derive(Debug)]
pub enum DecodeError {
    /// Payload is not valid JSON.
    Json(serde_json::Error),
    /// Payload is valid JSON but not an array.
    NotAnArray,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid notes payload: {err}"),
            Self::NotAnArray => write!(f, "notes payload is not a JSON array"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Decoded collection plus salvage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedNotes {
    /// Valid notes in persisted order.
    pub notes: Vec<Note>,
    /// Records rejected for shape or invariant violations.
    pub rejected: usize,
    /// Records dropped because their id was already seen.
    pub duplicates: usize,
}

impl DecodedNotes {
    /// Returns whether any record was dropped.
    pub fn is_lossy(&self) -> bool {
        self.rejected > 0 || self.duplicates > 0
    }
}

/// Decodes a persisted payload, validating each record independently.
pub fn decode_notes(raw: &str) -> Result<DecodedNotes, DecodeError> {
    let Value::Array(records) = serde_json::from_str::<Value>(raw)? else {
        return Err(DecodeError::NotAnArray);
    };

    let mut decoded = DecodedNotes::default();
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Note>(record) {
            Ok(note) => {
                if seen.insert(note.id.clone()) {
                    decoded.notes.push(note);
                } else {
                    decoded.duplicates += 1;
                }
            }
            Err(_) => decoded.rejected += 1,
        }
    }
    Ok(decoded)
}

/// Encodes notes into the persisted array shape.
pub fn encode_notes(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, encode_notes, DecodeError};
    use crate::model::note::Note;

    #[test]
    fn encode_uses_camel_case_wire_fields() {
        let note = Note::new("n1", "Title", "Body", 100);
        let json: serde_json::Value =
            serde_json::from_str(&encode_notes(&[note]).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "n1");
        assert_eq!(json[0]["createdAt"], 100);
        assert_eq!(json[0]["updatedAt"], 100);
        assert!(json[0].get("created_at").is_none());
    }

    #[test]
    fn decode_rejects_object_payload() {
        let err = decode_notes(r#"{"id":"n1"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = decode_notes("[{").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn decode_salvages_valid_records_and_counts_the_rest() {
        let raw = r#"[
            {"id":"a","title":"A","content":"","createdAt":1,"updatedAt":2},
            {"id":"b","title":"B","content":""},
            {"id":"c","title":" padded ","content":"","createdAt":1,"updatedAt":1},
            {"id":"d","title":"D","content":"","createdAt":5,"updatedAt":4},
            "not a record",
            {"id":"a","title":"again","content":"","createdAt":3,"updatedAt":3}
        ]"#;
        let decoded = decode_notes(raw).unwrap();
        assert_eq!(decoded.notes.len(), 1);
        assert_eq!(decoded.notes[0].id, "a");
        assert_eq!(decoded.rejected, 4);
        assert_eq!(decoded.duplicates, 1);
        assert!(decoded.is_lossy());
    }

    #[test]
    fn decode_tolerates_extra_fields() {
        let raw = r#"[{"id":"a","title":"","content":"x","createdAt":1,"updatedAt":1,"pinned":true}]"#;
        let decoded = decode_notes(raw).unwrap();
        assert_eq!(decoded.notes.len(), 1);
        assert!(!decoded.is_lossy());
    }
}
