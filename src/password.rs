//! Salted password records: encode once, verify many times.

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::crypto::{HashAlgorithm, OsRandom, SecureRandomSource, random_bytes};
use crate::error::{PbkdfError, Result};
use crate::format;
use crate::kdf::{KeyDerivation, Pbkdf1, Pbkdf2};

/// Encodes `password` with a fresh salt from the OS generator.
///
/// Returns `base64(salt):iterations:base64(key)`.
pub fn encode_password<K: KeyDerivation + ?Sized>(
    kdf: &K,
    hash: HashAlgorithm,
    password: &str,
    salt_len: usize,
    iterations: u64,
    key_len: usize,
) -> Result<String> {
    encode_password_with(kdf, &OsRandom, hash, password, salt_len, iterations, key_len)
}

/// Like [`encode_password`], drawing the salt from `rng`.
///
/// # Errors
///
/// Returns [`PbkdfError::InvalidParameter`] for a zero `key_len`, since such a
/// record could never be verified, [`PbkdfError::RandomSource`] if no salt
/// could be drawn, or the derivation error for out of range parameters.
pub fn encode_password_with<K, R>(
    kdf: &K,
    rng: &R,
    hash: HashAlgorithm,
    password: &str,
    salt_len: usize,
    iterations: u64,
    key_len: usize,
) -> Result<String>
where
    K: KeyDerivation + ?Sized,
    R: SecureRandomSource + ?Sized,
{
    debug!(
        kdf = kdf.name(),
        %hash,
        salt_len,
        iterations,
        key_len,
        "encoding password"
    );

    if key_len == 0 {
        return Err(PbkdfError::InvalidParameter(
            "key length must be greater than zero".into(),
        ));
    }

    let salt = random_bytes(rng, salt_len)?;
    let key = kdf.derive(hash, password.as_bytes(), &salt, iterations, key_len)?;

    Ok(format::serialize(&salt, iterations, &key))
}

/// Checks `password` against a stored `record`.
///
/// A wrong password yields `Ok(false)`.
///
/// # Errors
///
/// Returns [`PbkdfError::Format`] for a malformed record and the derivation
/// error if the stored parameters are unusable.
pub fn verify_password<K: KeyDerivation + ?Sized>(
    kdf: &K,
    hash: HashAlgorithm,
    password: &str,
    record: &str,
) -> Result<bool> {
    let record = format::parse(record).inspect_err(|e| warn!(error = %e, "rejecting record"))?;

    if record.key().is_empty() {
        return Err(PbkdfError::InvalidParameter("stored key is empty".into()));
    }

    debug!(
        kdf = kdf.name(),
        %hash,
        iterations = record.iterations(),
        key_len = record.key().len(),
        "verifying password"
    );

    let candidate = kdf.derive(
        hash,
        password.as_bytes(),
        record.salt(),
        record.iterations(),
        record.key().len(),
    )?;

    Ok(candidate.len() == record.key().len() && bool::from(candidate.ct_eq(record.key())))
}

pub fn encode_password_pbkdf1(
    hash: HashAlgorithm,
    password: &str,
    salt_len: usize,
    iterations: u64,
    key_len: usize,
) -> Result<String> {
    encode_password(&Pbkdf1, hash, password, salt_len, iterations, key_len)
}

pub fn encode_password_pbkdf2(
    hash: HashAlgorithm,
    password: &str,
    salt_len: usize,
    iterations: u64,
    key_len: usize,
) -> Result<String> {
    encode_password(&Pbkdf2, hash, password, salt_len, iterations, key_len)
}

pub fn verify_password_pbkdf1(hash: HashAlgorithm, password: &str, record: &str) -> Result<bool> {
    verify_password(&Pbkdf1, hash, password, record)
}

pub fn verify_password_pbkdf2(hash: HashAlgorithm, password: &str, record: &str) -> Result<bool> {
    verify_password(&Pbkdf2, hash, password, record)
}
