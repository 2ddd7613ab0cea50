//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::CipherCodec;
use crate::store::{MemoryNoteStore, NoteStore};

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying anything expensive.
#[derive(Clone)]
pub struct AppState {
    /// Seals and opens note bodies.
    pub codec: Arc<CipherCodec>,
    /// Where sealed notes live.
    pub store: Arc<dyn NoteStore>,
}

impl AppState {
    /// Create a new [`AppState`] from a codec and a store.
    pub fn new(codec: CipherCodec, store: Arc<dyn NoteStore>) -> Self {
        Self {
            codec: Arc::new(codec),
            store,
        }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with the default codec and an empty in-memory store.
    fn default() -> Self {
        Self::new(CipherCodec::default(), Arc::new(MemoryNoteStore::new()))
    }
}
