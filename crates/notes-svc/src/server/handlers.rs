//! Axum request handlers for all service endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    CreateNoteRequest, HealthResponse, NoteView, OpenNoteRequest, OpenNoteResponse,
};
use common::ServiceError;
use tracing::{error, info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::state::AppState;
use crate::crypto::{CipherError, KEY_LEN};
use crate::store::NewNote;

const MSG_PASSWORD_REQUIRED: &str = "Password is required";
const MSG_SAVE_FAILED: &str = "Error saving note";
const MSG_LIST_FAILED: &str = "Error retrieving notes";
const MSG_OPEN_FAILED: &str = "Error retrieving note";
const MSG_NOT_FOUND: &str = "Note not found";

/// `POST /notes` — seal the content with the supplied password and store it.
///
/// Responds `201 Created` with the stored note; its `content` is the sealed
/// string.
pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Response {
    let password = match required_password(req.password) {
        Ok(p) => p,
        Err(e) => return error_response(e),
    };
    let content = Zeroizing::new(req.content);

    // Sealing is CPU-bound (Argon2 under `aead-v1`); keep it off the reactor.
    let codec = Arc::clone(&state.codec);
    let sealed = tokio::task::spawn_blocking(move || {
        codec.seal(content.as_bytes(), password.as_bytes())
    })
    .await;

    let sealed = match sealed {
        Ok(Ok(s)) => s,
        Ok(Err(CipherError::InvalidKeyLength(_))) => {
            return error_response(ServiceError::BadRequest(format!(
                "Password must be exactly {KEY_LEN} bytes"
            )));
        }
        Ok(Err(e)) => {
            error!(error = %e, "sealing note failed");
            return error_response(ServiceError::EncryptionFailure(MSG_SAVE_FAILED.into()));
        }
        Err(e) => {
            error!(error = %e, "sealing task failed");
            return error_response(ServiceError::Internal(MSG_SAVE_FAILED.into()));
        }
    };

    let new_note = NewNote {
        title: req.title,
        content: sealed,
    };
    match state.store.create(new_note) {
        Ok(note) => {
            info!(note_id = %note.id, "note created");
            (StatusCode::CREATED, Json(NoteView::from(note))).into_response()
        }
        Err(e) => {
            error!(error = %e, "storing note failed");
            error_response(ServiceError::Internal(MSG_SAVE_FAILED.into()))
        }
    }
}

/// `GET /notes` — list every stored note without opening any of them.
pub async fn list_notes(State(state): State<AppState>) -> Response {
    match state.store.list() {
        Ok(notes) => {
            let views: Vec<NoteView> = notes.into_iter().map(NoteView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => {
            error!(error = %e, "listing notes failed");
            error_response(ServiceError::Internal(MSG_LIST_FAILED.into()))
        }
    }
}

/// `POST /notes/:id` — open a stored note with the supplied password.
///
/// Every open failure (malformed string, wrong key length, bad padding, failed
/// authentication) yields the same `500` so responses reveal nothing about
/// whether the password was close.
pub async fn open_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<OpenNoteRequest>,
) -> Response {
    let password = match required_password(req.password) {
        Ok(p) => p,
        Err(e) => return error_response(e),
    };

    let Ok(id) = Uuid::parse_str(&id) else {
        return error_response(ServiceError::NotFound(MSG_NOT_FOUND.into()));
    };

    let note = match state.store.get(id) {
        Ok(Some(n)) => n,
        Ok(None) => return error_response(ServiceError::NotFound(MSG_NOT_FOUND.into())),
        Err(e) => {
            error!(note_id = %id, error = %e, "fetching note failed");
            return error_response(ServiceError::Internal(MSG_OPEN_FAILED.into()));
        }
    };

    let codec = Arc::clone(&state.codec);
    let sealed = note.content;
    let opened =
        tokio::task::spawn_blocking(move || codec.open(&sealed, password.as_bytes())).await;

    let plaintext = match opened {
        Ok(Ok(p)) => p,
        Ok(Err(e)) => {
            warn!(note_id = %id, error = %e, "opening note failed");
            return error_response(ServiceError::EncryptionFailure(MSG_OPEN_FAILED.into()));
        }
        Err(e) => {
            error!(note_id = %id, error = %e, "opening task failed");
            return error_response(ServiceError::Internal(MSG_OPEN_FAILED.into()));
        }
    };

    let body = OpenNoteResponse {
        title: note.title,
        content: String::from_utf8_lossy(&plaintext).into_owned(),
        date: note.date,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the store answers, `503 Service Unavailable` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let seal_scheme = state.codec.scheme().as_str().to_owned();
    let (status_code, status_str, notes_stored) = match state.store.count() {
        Ok(n) => (StatusCode::OK, "ok", n),
        Err(e) => {
            warn!(error = %e, "health check could not reach note store");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", 0)
        }
    };

    let body = HealthResponse {
        status: status_str.into(),
        seal_scheme,
        notes_stored,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> Response {
    error_response(ServiceError::NotFound(
        "the requested resource does not exist".into(),
    ))
}

fn required_password(password: Option<String>) -> Result<Zeroizing<String>, ServiceError> {
    match password {
        Some(p) if !p.is_empty() => Ok(Zeroizing::new(p)),
        _ => Err(ServiceError::BadRequest(MSG_PASSWORD_REQUIRED.into())),
    }
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_response())).into_response()
}
