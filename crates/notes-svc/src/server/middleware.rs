//! Axum middleware settings applied to the router.
//!
//! Includes request tracing, timeout enforcement, body size limits, and
//! response compression.

use std::time::Duration;

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
