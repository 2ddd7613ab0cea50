//! Source of the random bytes used for IVs, salts and nonces.

use aes_gcm_siv::aead::{rand_core::RngCore, OsRng};

use super::error::CipherError;

/// Fills buffers with cryptographically secure random bytes.
///
/// Implementations must be callable concurrently without external locking.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `buf` completely, or fail with [`CipherError::RandomnessUnavailable`].
    fn fill(&self, buf: &mut [u8]) -> Result<(), CipherError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CipherError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|_| CipherError::RandomnessUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_whole_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill(&mut a).unwrap();
        OsRandom.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn os_random_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let mut buf = [0u8; 16];
                    OsRandom.fill(&mut buf).map(|_| buf)
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_ok());
        }
    }
}
