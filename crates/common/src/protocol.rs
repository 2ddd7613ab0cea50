//! Request and response types for the notes HTTP API.
//!
//! Every type is serialised as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// Request body for `POST /notes`.
///
/// `password` is optional at the wire level so the handler can reject its
/// absence with a descriptive 400 instead of a generic deserialisation error.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Optional human-readable title, stored in the clear.
    #[serde(default)]
    pub title: Option<String>,
    /// Plaintext body to seal.
    #[serde(default)]
    pub content: String,
    /// Password the body is sealed with.
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for `POST /notes/:id`.
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenNoteRequest {
    /// Password the body was sealed with.
    #[serde(default)]
    pub password: Option<String>,
}

/// A stored note as returned by `POST /notes` and `GET /notes`.
///
/// `content` is the sealed string, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Title as supplied at creation.
    pub title: Option<String>,
    /// Sealed body.
    pub content: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

/// Successful response body for `POST /notes/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenNoteResponse {
    /// Title as supplied at creation.
    pub title: Option<String>,
    /// Decrypted body.
    pub content: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

// Passwords and plaintext must not leak through `{:?}` in logs.
impl std::fmt::Debug for CreateNoteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateNoteRequest")
            .field("title", &self.title)
            .field("content", &"[REDACTED]")
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl std::fmt::Debug for OpenNoteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenNoteRequest")
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Scheme new notes are sealed with (`"cbc"` or `"aead-v1"`).
    pub seal_scheme: String,
    /// Number of notes currently stored.
    pub notes_stored: usize,
}
