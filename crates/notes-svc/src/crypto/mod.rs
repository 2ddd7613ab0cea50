//! Password-based sealing of note bodies.
//!
//! This module is free of HTTP and storage dependencies. [`CipherCodec`] is
//! the entry point; the scheme modules hold the primitives.
//!
//! # Schemes
//!
//! - [`Scheme::Cbc`] (default): AES-256-CBC keyed directly by the 32-byte
//!   password, sealed as `<hex iv>:<hex ciphertext>`. No integrity protection.
//! - [`Scheme::AeadV1`]: Argon2id-derived key, AES-256-GCM-SIV, sealed as
//!   `v1.<salt>.<nonce>.<ciphertext+tag>`.
//!
//! The configured scheme only governs sealing. Opening accepts both formats,
//! so existing notes stay readable after the scheme is switched.

pub mod aead;
pub mod compat;
pub mod error;
pub mod random;

use std::str::FromStr;

use zeroize::Zeroizing;

pub use compat::KEY_LEN;
pub use error::CipherError;
pub use random::{OsRandom, RandomSource};

/// Which format [`CipherCodec::seal`] produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    /// `<hex iv>:<hex ciphertext>`, AES-256-CBC with the password as key.
    #[default]
    Cbc,
    /// `v1.` authenticated format.
    AeadV1,
}

impl Scheme {
    /// The configuration name of this scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Cbc => "cbc",
            Scheme::AeadV1 => "aead-v1",
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cbc" => Ok(Scheme::Cbc),
            "aead-v1" => Ok(Scheme::AeadV1),
            other => Err(format!("unknown seal scheme: {other}")),
        }
    }
}

/// Stateless sealer/opener for note bodies.
///
/// Holds only the configured [`Scheme`] and a [`RandomSource`]; every call is
/// independent and safe to make from many tasks at once.
#[derive(Debug, Clone)]
pub struct CipherCodec<R = OsRandom> {
    scheme: Scheme,
    rng: R,
}

impl CipherCodec {
    /// Create a codec backed by the OS CSPRNG.
    pub fn new(scheme: Scheme) -> Self {
        Self::with_source(scheme, OsRandom)
    }
}

impl Default for CipherCodec {
    fn default() -> Self {
        Self::new(Scheme::default())
    }
}

impl<R: RandomSource> CipherCodec<R> {
    /// Create a codec drawing IVs, salts and nonces from `rng`.
    pub fn with_source(scheme: Scheme, rng: R) -> Self {
        Self { scheme, rng }
    }

    /// The scheme used by [`seal`](Self::seal).
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Seal `plaintext` with `password` into a storable string.
    ///
    /// # Errors
    ///
    /// - [`CipherError::InvalidKeyLength`] (CBC only) if `password` is not
    ///   [`KEY_LEN`] bytes.
    /// - [`CipherError::RandomnessUnavailable`] if the random source fails.
    /// - [`CipherError::AeadFailure`] (`v1` only) on key derivation failure.
    pub fn seal(&self, plaintext: &[u8], password: &[u8]) -> Result<String, CipherError> {
        match self.scheme {
            Scheme::Cbc => compat::seal(plaintext, password, &self.rng),
            Scheme::AeadV1 => aead::seal(plaintext, password, &self.rng),
        }
    }

    /// Open a string produced by [`seal`](Self::seal) under either scheme.
    ///
    /// # Errors
    ///
    /// CBC strings fail with [`CipherError::InvalidKeyLength`],
    /// [`CipherError::MalformedCiphertext`] or [`CipherError::PaddingInvalid`];
    /// `v1` strings fail with [`CipherError::InvalidCiphertextOrKey`].
    pub fn open(&self, sealed: &str, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        if aead::is_v1(sealed) {
            aead::open(sealed, password)
        } else {
            compat::open(sealed, password)
        }
    }
}
