//! Authenticated `v1` sealing: Argon2id key derivation + AES-256-GCM-SIV.
//!
//! Unlike the compatible CBC scheme this accepts passwords of any length and
//! detects tampering. Every open failure collapses into
//! [`CipherError::InvalidCiphertextOrKey`], so callers cannot tell a wrong
//! password from a corrupted string.
//!
//! # Wire format
//!
//! ```text
//! v1.<base64url(salt)>.<base64url(nonce)>.<base64url(ciphertext+tag)>
//! ```
//!
//! `.` never occurs in the compatible hex format, so the prefix alone decides
//! which scheme a stored string belongs to.

use std::{fmt, str::FromStr};

use aes_gcm_siv::{
    aead::{Aead, KeyInit},
    Aes256GcmSiv, Key, Nonce,
};
use argon2::Argon2;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use zeroize::Zeroizing;

use super::compat::KEY_LEN;
use super::error::CipherError;
use super::random::RandomSource;

/// Prefix that appears at the start of every `v1` sealed string.
pub const VERSION_PREFIX: &str = "v1";

/// Byte length of the per-note Argon2 salt.
pub const SALT_LEN: usize = 16;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// A parsed `v1` sealed note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedNoteV1 {
    /// Argon2 salt bytes.
    pub salt: [u8; SALT_LEN],
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for SealedNoteV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.salt),
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for SealedNoteV1 {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, '.').collect();
        if parts.len() != 4 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidCiphertextOrKey);
        }
        Ok(Self {
            salt: decode_fixed(parts[1])?,
            nonce: decode_fixed(parts[2])?,
            ciphertext: URL_SAFE_NO_PAD
                .decode(parts[3])
                .map_err(|_| CipherError::InvalidCiphertextOrKey)?,
        })
    }
}

/// Returns `true` if `sealed` carries the `v1.` prefix.
pub fn is_v1(sealed: &str) -> bool {
    sealed
        .strip_prefix(VERSION_PREFIX)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// Seal `plaintext` under a key derived from `password`.
///
/// A fresh salt and nonce are drawn from `rng` on every call.
///
/// # Errors
///
/// Returns [`CipherError::RandomnessUnavailable`] if `rng` fails and
/// [`CipherError::AeadFailure`] if key derivation or encryption fails.
pub fn seal<R>(plaintext: &[u8], password: &[u8], rng: &R) -> Result<String, CipherError>
where
    R: RandomSource + ?Sized,
{
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill(&mut salt)?;
    rng.fill(&mut nonce)?;

    let cipher = build_cipher(password, &salt).map_err(|_| CipherError::AeadFailure)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(SealedNoteV1 {
        salt,
        nonce,
        ciphertext,
    }
    .to_string())
}

/// Parse, authenticate and decrypt a `v1` sealed string.
///
/// # Errors
///
/// Returns [`CipherError::InvalidCiphertextOrKey`] on any failure.
pub fn open(sealed: &str, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let note: SealedNoteV1 = sealed.parse()?;
    let cipher =
        build_cipher(password, &note.salt).map_err(|_| CipherError::InvalidCiphertextOrKey)?;
    cipher
        .decrypt(Nonce::from_slice(&note.nonce), note.ciphertext.as_ref())
        .map(Zeroizing::new)
        .map_err(|_| CipherError::InvalidCiphertextOrKey)
}

fn build_cipher(password: &[u8], salt: &[u8]) -> Result<Aes256GcmSiv, argon2::Error> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    Argon2::default().hash_password_into(password, salt, &mut key[..])?;
    Ok(Aes256GcmSiv::new(Key::<Aes256GcmSiv>::from_slice(&key[..])))
}

fn decode_fixed<const N: usize>(segment: &str) -> Result<[u8; N], CipherError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| CipherError::InvalidCiphertextOrKey)?;
    bytes
        .try_into()
        .map_err(|_| CipherError::InvalidCiphertextOrKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::{MockRandomSource, OsRandom};

    #[test]
    fn round_trip_with_any_password_length() {
        for password in [&b""[..], &b"pw"[..], &b"correct horse battery staple"[..]] {
            let sealed = seal(b"123-45-6789", password, &OsRandom).unwrap();
            assert!(sealed.starts_with("v1."));
            assert_eq!(&open(&sealed, password).unwrap()[..], b"123-45-6789");
        }
    }

    #[test]
    fn empty_plaintext_round_trip() {
        let sealed = seal(b"", b"pw", &OsRandom).unwrap();
        assert!(open(&sealed, b"pw").unwrap().is_empty());
    }

    #[test]
    fn wrong_password_fails_opaquely() {
        let sealed = seal(b"secret", b"right", &OsRandom).unwrap();
        assert_eq!(
            open(&sealed, b"wrong").unwrap_err(),
            CipherError::InvalidCiphertextOrKey
        );
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let sealed = seal(b"tamper me", b"pw", &OsRandom).unwrap();
        let mut note: SealedNoteV1 = sealed.parse().unwrap();
        note.ciphertext[0] ^= 0xFF;
        assert_eq!(
            open(&note.to_string(), b"pw").unwrap_err(),
            CipherError::InvalidCiphertextOrKey
        );
    }

    #[test]
    fn from_str_rejects_bad_prefix() {
        assert!("v2.abc.def.ghi".parse::<SealedNoteV1>().is_err());
    }

    #[test]
    fn from_str_rejects_too_few_parts() {
        assert!("v1.abc.def".parse::<SealedNoteV1>().is_err());
    }

    #[test]
    fn from_str_rejects_bad_base64() {
        assert!("v1.!!!.abc.def".parse::<SealedNoteV1>().is_err());
    }

    #[test]
    fn from_str_rejects_wrong_nonce_length() {
        let s = format!(
            "v1.{}.{}.{}",
            URL_SAFE_NO_PAD.encode([0u8; SALT_LEN]),
            URL_SAFE_NO_PAD.encode([0u8; 4]),
            URL_SAFE_NO_PAD.encode([0u8; 32]),
        );
        assert!(s.parse::<SealedNoteV1>().is_err());
    }

    #[test]
    fn prefix_detection() {
        assert!(is_v1("v1.a.b.c"));
        assert!(!is_v1("v1"));
        assert!(!is_v1("v10.a.b.c"));
        assert!(!is_v1("00112233:445566"));
    }

    #[test]
    fn seal_reports_missing_randomness() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill()
            .returning(|_| Err(CipherError::RandomnessUnavailable));
        assert_eq!(
            seal(b"x", b"pw", &rng),
            Err(CipherError::RandomnessUnavailable)
        );
    }
}
