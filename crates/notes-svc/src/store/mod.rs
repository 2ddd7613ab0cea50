//! Persistence of sealed notes.
//!
//! The store treats `content` as an opaque string: it never parses, indexes or
//! logs it. Identifiers and timestamps are assigned here at creation.
//!
//! # Module invariants
//!
//! - **No crypto dependencies.** Nothing in this module imports `crate::crypto`.

pub mod memory;

pub use memory::MemoryNoteStore;

use chrono::{DateTime, Utc};
use common::protocol::NoteView;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by a [`NoteStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to read or write.
    #[error("note store backend failure: {0}")]
    Backend(String),
}

/// A note as supplied by the caller, before the store assigns id and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// Optional title, stored in the clear.
    pub title: Option<String>,
    /// Sealed body.
    pub content: String,
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Optional title, stored in the clear.
    pub title: Option<String>,
    /// Sealed body.
    pub content: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        NoteView {
            id: note.id,
            title: note.title,
            content: note.content,
            date: note.date,
        }
    }
}

/// Create, list and fetch sealed notes.
#[cfg_attr(test, mockall::automock)]
pub trait NoteStore: Send + Sync {
    /// Persist `note`, returning it with its assigned id and timestamp.
    fn create(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Every stored note, oldest first.
    fn list(&self) -> Result<Vec<Note>, StoreError>;

    /// The note with `id`, if any.
    fn get(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Number of stored notes, without copying them.
    fn count(&self) -> Result<usize, StoreError>;
}
