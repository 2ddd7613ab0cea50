//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No passwords, plaintext or key material** may appear in any span
//!   attribute or log field. Note ids, scheme names and lengths are fine.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   overrides it when set.

pub mod init;

pub use init::init_telemetry;
