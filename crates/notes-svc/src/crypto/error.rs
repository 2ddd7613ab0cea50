//! Failure kinds shared by every sealing scheme.

use thiserror::Error;

use super::compat::KEY_LEN;

/// Errors produced by the cipher layer.
///
/// No variant ever carries plaintext, password or key bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The password is the wrong length to be used directly as an AES-256 key.
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The sealed string does not follow the `<hex iv>:<hex ciphertext>` format.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(&'static str),

    /// Decryption produced bytes whose PKCS#7 padding does not validate.
    #[error("invalid padding")]
    PaddingInvalid,

    /// The OS CSPRNG could not supply random bytes.
    #[error("randomness unavailable")]
    RandomnessUnavailable,

    /// Key derivation or AEAD encryption failed while sealing with the `v1` scheme.
    #[error("aead operation failed")]
    AeadFailure,

    /// A `v1` sealed string failed to parse or authenticate.
    #[error("invalid ciphertext or key")]
    InvalidCiphertextOrKey,
}
