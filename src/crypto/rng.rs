use crate::error::{PbkdfError, Result};

/// A source of cryptographically secure random bytes.
///
/// Implementations are shared between threads, so they must tolerate
/// concurrent calls.
pub trait SecureRandomSource: Send + Sync {
    /// Fills `buf` completely or fails.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf)
            .map_err(|e| PbkdfError::RandomSource(format!("OS random generator unavailable: {e}")))
    }
}

/// Draws `len` fresh random bytes from `rng`.
pub fn random_bytes<R: SecureRandomSource + ?Sized>(rng: &R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf)?;
    Ok(buf)
}
