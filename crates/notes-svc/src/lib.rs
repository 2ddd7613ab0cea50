//! Password-sealed notes: the [`crypto::CipherCodec`], a note store, and the
//! HTTP layer that ties them together.

pub mod config;
pub mod crypto;
pub mod server;
pub mod store;
pub mod telemetry;
