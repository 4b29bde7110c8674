//! Password based key derivation engines.
//!
//! Both engines share the [`KeyDerivation`] contract so callers can pick one
//! at runtime through [`Algorithm`].

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::HashAlgorithm;
use crate::error::{PbkdfError, Result};

pub mod pbkdf1;
pub mod pbkdf2;

/// Derived key bytes, wiped on drop.
pub type DerivedKey = Zeroizing<Vec<u8>>;

/// A key derivation function over a caller supplied hash.
pub trait KeyDerivation {
    /// Short lowercase name, used in logs.
    fn name(&self) -> &'static str;

    /// Longest key, in bytes, this engine can derive with `hash`.
    fn max_key_len(&self, hash: HashAlgorithm) -> u64;

    /// Derives exactly `key_len` bytes from `password` and `salt`.
    ///
    /// # Errors
    ///
    /// Returns [`PbkdfError::KeyTooLong`] if `key_len` exceeds
    /// [`max_key_len`](Self::max_key_len) and [`PbkdfError::InvalidParameter`]
    /// if `iterations` is zero.
    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u64,
        key_len: usize,
    ) -> Result<DerivedKey>;
}

/// PBKDF1 (RFC 8018, section 5.1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf1;

/// PBKDF2 (RFC 8018, section 5.2) with an unkeyed hash PRF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2;

impl KeyDerivation for Pbkdf1 {
    fn name(&self) -> &'static str {
        "pbkdf1"
    }

    fn max_key_len(&self, hash: HashAlgorithm) -> u64 {
        pbkdf1::max_key_len(hash)
    }

    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u64,
        key_len: usize,
    ) -> Result<DerivedKey> {
        pbkdf1::derive(hash, password, salt, iterations, key_len)
    }
}

impl KeyDerivation for Pbkdf2 {
    fn name(&self) -> &'static str {
        "pbkdf2"
    }

    fn max_key_len(&self, hash: HashAlgorithm) -> u64 {
        pbkdf2::max_key_len(hash)
    }

    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u64,
        key_len: usize,
    ) -> Result<DerivedKey> {
        pbkdf2::derive(hash, password, salt, iterations, key_len)
    }
}

/// Engine selector, e.g. loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Pbkdf1,
    #[default]
    Pbkdf2,
}

impl KeyDerivation for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::Pbkdf1 => Pbkdf1.name(),
            Algorithm::Pbkdf2 => Pbkdf2.name(),
        }
    }

    fn max_key_len(&self, hash: HashAlgorithm) -> u64 {
        match self {
            Algorithm::Pbkdf1 => Pbkdf1.max_key_len(hash),
            Algorithm::Pbkdf2 => Pbkdf2.max_key_len(hash),
        }
    }

    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u64,
        key_len: usize,
    ) -> Result<DerivedKey> {
        match self {
            Algorithm::Pbkdf1 => Pbkdf1.derive(hash, password, salt, iterations, key_len),
            Algorithm::Pbkdf2 => Pbkdf2.derive(hash, password, salt, iterations, key_len),
        }
    }
}

/// Shared argument checks, key length first.
pub(crate) fn check_params(max_key_len: u64, iterations: u64, key_len: usize) -> Result<()> {
    if key_len as u64 > max_key_len {
        return Err(PbkdfError::KeyTooLong {
            requested: key_len,
            max: max_key_len,
        });
    }

    if iterations == 0 {
        return Err(PbkdfError::InvalidParameter(
            "iteration count must be greater than zero".into(),
        ));
    }

    Ok(())
}
