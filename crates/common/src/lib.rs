//! Common types, protocol definitions, and errors shared across `sealed-notes` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
