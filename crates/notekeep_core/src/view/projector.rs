//! Search filter and sort projection.
//!
//! # Invariants
//! - Empty (or whitespace-only) search text keeps every note.
//! - Time-based keys sort most recent first; `title` sorts ascending.
//! - Sorting is stable, so ties keep their input order.
//! - Titles collate with the Unicode root collation: accents and case only
//!   break ties between otherwise equal titles.

use crate::model::note::Note;
use icu_collator::{Collator, CollatorOptions};
use log::warn;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    Updated,
    /// Most recently created first.
    Created,
    /// Ascending title collation.
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Created => "created",
            Self::Title => "title",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort key string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(pub String);

impl Display for ParseSortKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort key `{}`; expected updated|created|title",
            self.0
        )
    }
}

impl Error for ParseSortKeyError {}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "updated" => Ok(Self::Updated),
            "created" => Ok(Self::Created),
            "title" => Ok(Self::Title),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

/// Projection inputs besides the collection itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Raw search text as typed.
    pub search: String,
    pub sort: SortKey,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }
}

/// Filters and sorts `notes` for display.
pub fn project_notes(notes: &[Note], query: &ViewQuery) -> Vec<Note> {
    let needle = query.search.trim().to_lowercase();
    let mut visible: Vec<Note> = notes
        .iter()
        .filter(|note| matches_search(note, &needle))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Updated => visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::Created => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => {
            let collator = TitleCollator::new();
            visible.sort_by(|a, b| collator.compare(&a.title, &b.title));
        }
    }
    visible
}

/// `needle` must already be trimmed and lowercased.
fn matches_search(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

/// Compares two titles the way [`SortKey::Title`] orders them.
///
/// `"apple" < "Éclair" < "Zoo"`; `"resume" < "Resume" < "résumé"`.
pub fn collate(left: &str, right: &str) -> Ordering {
    TitleCollator::new().compare(left, right)
}

/// Root-locale collator, built once per projection.
struct TitleCollator {
    collator: Option<Collator>,
}

impl TitleCollator {
    fn new() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(err) => {
                warn!("event=title_collator module=view status=degraded error={err}");
                Self { collator: None }
            }
        }
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(left, right),
            None => folded_compare(left, right),
        }
    }
}

/// Case-folded order with lowercase first on ties.
fn folded_compare(left: &str, right: &str) -> Ordering {
    let folded = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        left.chars()
            .map(|c| (c.is_uppercase(), c))
            .cmp(right.chars().map(|c| (c.is_uppercase(), c)))
    })
}
