//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical persisted note record and its wire shape.
//! - Provide patch/draft inputs for update and form flows.
//!
//! # Invariants
//! - `id` is assigned once at creation and never rewritten.
//! - `title` and `content` never carry leading/trailing whitespace.
//! - `created_at <= updated_at`, both non-negative epoch milliseconds.
//! - Deserialization runs `Note::validate()`, so an invalid record can never
//!   be materialized from JSON.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one note.
///
/// Opaque to callers: either a UUID string or a fallback `id-` token.
pub type NoteId = String;

/// Title shown for notes saved without one.
pub const UNTITLED_LABEL: &str = "Untitled";

/// Field name used in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
}

impl NoteField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

/// Validation error for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `id` is empty or whitespace only.
    EmptyId,
    /// Text field carries leading or trailing whitespace.
    UntrimmedField { field: NoteField },
    /// Timestamp is before the unix epoch.
    NegativeTimestamp { field: NoteField, value: i64 },
    /// `updated_at` is earlier than `created_at`.
    InvalidTimestamps { created_at: i64, updated_at: i64 },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be empty"),
            Self::UntrimmedField { field } => {
                write!(f, "{} must not have surrounding whitespace", field.as_str())
            }
            Self::NegativeTimestamp { field, value } => {
                write!(f, "{} ({value}) must not be negative", field.as_str())
            }
            Self::InvalidTimestamps {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({updated_at}) must be >= createdAt ({created_at})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NoteRecord", rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every successful update.
    pub updated_at: i64,
}

/// Unvalidated wire shape used as the deserialization source.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    id: NoteId,
    title: String,
    content: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<NoteRecord> for Note {
    type Error = NoteValidationError;

    fn try_from(value: NoteRecord) -> Result<Self, Self::Error> {
        let note = Self {
            id: value.id,
            title: value.title,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        };
        note.validate()?;
        Ok(note)
    }
}

impl Note {
    /// Builds a fresh note with trimmed text and `created_at == updated_at`.
    pub fn new(id: impl Into<NoteId>, title: &str, content: &str, now_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Checks every record invariant.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.title.trim() != self.title {
            return Err(NoteValidationError::UntrimmedField {
                field: NoteField::Title,
            });
        }
        if self.content.trim() != self.content {
            return Err(NoteValidationError::UntrimmedField {
                field: NoteField::Content,
            });
        }
        if self.created_at < 0 {
            return Err(NoteValidationError::NegativeTimestamp {
                field: NoteField::CreatedAt,
                value: self.created_at,
            });
        }
        if self.updated_at < 0 {
            return Err(NoteValidationError::NegativeTimestamp {
                field: NoteField::UpdatedAt,
                value: self.updated_at,
            });
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::InvalidTimestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Applies a partial edit and bumps `updated_at`.
    ///
    /// `updated_at` always moves strictly forward, even when `now_ms` falls
    /// within the same millisecond or behind the previous value.
    pub fn apply_patch(&mut self, patch: &NotePatch, now_ms: i64) {
        if let Some(title) = patch.title.as_deref() {
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content.as_deref() {
            self.content = content.trim().to_string();
        }
        self.updated_at = now_ms.max(self.updated_at.saturating_add(1));
    }

    /// Title for display, falling back to [`UNTITLED_LABEL`].
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_LABEL
        } else {
            self.title.as_str()
        }
    }
}

/// Partial update input. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            content: None,
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(value.into()),
        }
    }

    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Create/edit form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// A draft is blank when both fields trim to empty.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Converts the draft into a patch that replaces both fields.
    pub fn into_patch(self) -> NotePatch {
        NotePatch {
            title: Some(self.title),
            content: Some(self.content),
        }
    }
}
