//! Random values drawn from a [`SecureRandomSource`].

use zeroize::Zeroizing;

use crate::codec::{Endian, decode_uint};
use crate::crypto::SecureRandomSource;
use crate::error::{PbkdfError, Result};

/// Characters used for generated passwords unless configured otherwise.
pub const DEFAULT_CHARSET: &str = "!@#$%&*()-_+=[]{}^~?/:;<>.,\
abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn next_u64<R: SecureRandomSource + ?Sized>(rng: &R) -> Result<u64> {
    let mut buf = [0u8; 8];
    rng.fill(&mut buf)?;
    Ok(decode_uint(&buf, Endian::Big))
}

/// Uniform integer in `min..=max`.
///
/// # Errors
///
/// Fails if `min > max` or the random source fails.
pub fn random_in_range<R: SecureRandomSource + ?Sized>(rng: &R, min: u64, max: u64) -> Result<u64> {
    if min > max {
        return Err(PbkdfError::InvalidParameter(format!(
            "range minimum {min} is greater than maximum {max}"
        )));
    }

    let span = max - min;
    if span == u64::MAX {
        return next_u64(rng);
    }

    let range = span + 1;
    // reject the top partial bucket to avoid modulo bias
    let limit = u64::MAX - (u64::MAX % range + 1) % range;

    loop {
        let raw = next_u64(rng)?;
        if raw <= limit {
            return Ok(min + raw % range);
        }
    }
}

/// Random password of `min_len..=max_len` characters taken from `charset`.
///
/// # Errors
///
/// Fails if `max_len < min_len`, `charset` is empty, or the random source
/// fails.
pub fn random_password<R: SecureRandomSource + ?Sized>(
    rng: &R,
    min_len: usize,
    max_len: usize,
    charset: &str,
) -> Result<Zeroizing<String>> {
    if max_len < min_len {
        return Err(PbkdfError::InvalidParameter(
            "maximum password length is smaller than minimum".into(),
        ));
    }

    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(PbkdfError::InvalidParameter(
            "password character set is empty".into(),
        ));
    }

    let len = random_in_range(rng, min_len as u64, max_len as u64)? as usize;
    let last = chars.len() as u64 - 1;

    let mut password = Zeroizing::new(String::with_capacity(len));
    for _ in 0..len {
        let idx = random_in_range(rng, 0, last)? as usize;
        password.push(chars[idx]);
    }

    Ok(password)
}
