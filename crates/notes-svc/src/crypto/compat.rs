//! AES-256-CBC sealing with PKCS#7 padding and a hex wire format.
//!
//! The password bytes are used directly as the AES-256 key, so they must be
//! exactly [`KEY_LEN`] bytes long. There is no authentication tag: a wrong
//! password or corrupted ciphertext is only caught when the padding fails to
//! validate, and occasionally not at all.
//!
//! # Wire format
//!
//! ```text
//! <lowercase-hex(iv)>:<lowercase-hex(ciphertext)>
//! ```
//!
//! The IV segment is always 32 hex characters; the ciphertext segment is a
//! non-zero multiple of 32 hex characters.

use std::{fmt, str::FromStr};

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use super::error::CipherError;
use super::random::RandomSource;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the CBC initialisation vector.
pub const IV_LEN: usize = 16;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Separator between the IV and ciphertext segments.
pub const SEPARATOR: char = ':';

/// A parsed, CBC-sealed note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedNote {
    /// Raw IV bytes.
    pub iv: [u8; IV_LEN],
    /// Raw padded ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for SealedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.iv),
            SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for SealedNote {
    type Err = CipherError;

    /// Parse `<hex iv>:<hex ciphertext>`.
    ///
    /// Only the first `:` separates the segments; anything after it is taken
    /// as ciphertext hex, so a second `:` makes that segment invalid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iv_hex, ct_hex) = s
            .split_once(SEPARATOR)
            .ok_or(CipherError::MalformedCiphertext("missing ':' separator"))?;
        if iv_hex.is_empty() {
            return Err(CipherError::MalformedCiphertext("empty IV segment"));
        }

        let mut iv = [0u8; IV_LEN];
        hex::decode_to_slice(iv_hex, &mut iv)
            .map_err(|_| CipherError::MalformedCiphertext("IV is not 16 hex-encoded bytes"))?;

        let ciphertext = hex::decode(ct_hex)
            .map_err(|_| CipherError::MalformedCiphertext("ciphertext is not valid hex"))?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CipherError::MalformedCiphertext(
                "ciphertext is not a whole number of blocks",
            ));
        }

        Ok(Self { iv, ciphertext })
    }
}

/// Encrypt `plaintext` under `key` with a caller-chosen IV.
///
/// Deterministic: the same inputs always produce the same [`SealedNote`].
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn encrypt_with_iv(
    plaintext: &[u8],
    key: &[u8],
    iv: [u8; IV_LEN],
) -> Result<SealedNote, CipherError> {
    check_key(key)?;
    let ciphertext = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok(SealedNote { iv, ciphertext })
}

/// Seal `plaintext` with a fresh random IV and return the wire string.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] before drawing any randomness if
/// `key` is not [`KEY_LEN`] bytes, and [`CipherError::RandomnessUnavailable`]
/// if `rng` fails.
pub fn seal<R>(plaintext: &[u8], key: &[u8], rng: &R) -> Result<String, CipherError>
where
    R: RandomSource + ?Sized,
{
    check_key(key)?;
    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)?;
    encrypt_with_iv(plaintext, key, iv).map(|sealed| sealed.to_string())
}

/// Parse and decrypt a wire string produced by [`seal`].
///
/// # Errors
///
/// - [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes
///   (checked before the string is looked at).
/// - [`CipherError::MalformedCiphertext`] if the string violates the wire format.
/// - [`CipherError::PaddingInvalid`] if the decrypted padding does not validate.
pub fn open(sealed: &str, key: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    check_key(key)?;
    let note: SealedNote = sealed.parse()?;
    decrypt(&note, key)
}

/// Decrypt an already-parsed [`SealedNote`].
///
/// # Errors
///
/// See [`open`].
pub fn decrypt(note: &SealedNote, key: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    check_key(key)?;
    Aes256CbcDec::new_from_slices(key, &note.iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .decrypt_padded_vec_mut::<Pkcs7>(&note.ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CipherError::PaddingInvalid)
}

fn check_key(key: &[u8]) -> Result<(), CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    Ok(())
}
