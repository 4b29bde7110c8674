//! Text encoding of stored password records.
//!
//! Record format:
//! ```text
//! base64(SALT) ":" ITERATIONS ":" base64(KEY)
//! ```
//! Standard alphabet with padding, iteration count in decimal.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{PbkdfError, Result};

/// Field separator.
pub const SEPARATOR: char = ':';
/// Number of separated fields in a record.
pub const FIELD_COUNT: usize = 3;

/// A parsed password record.
///
/// Ranges are not checked here; the derivation engine rejects unusable
/// iteration counts or key lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    salt: Vec<u8>,
    iterations: u64,
    key: Vec<u8>,
}

impl CredentialRecord {
    pub fn new(salt: Vec<u8>, iterations: u64, key: Vec<u8>) -> Self {
        Self {
            salt,
            iterations,
            key,
        }
    }

    /// Returns the salt the key was derived with.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the iteration count.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Returns the stored derived key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(&self.salt, self.iterations, &self.key))
    }
}

impl FromStr for CredentialRecord {
    type Err = PbkdfError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Encodes a record as text.
pub fn serialize(salt: &[u8], iterations: u64, key: &[u8]) -> String {
    format!(
        "{}{SEPARATOR}{iterations}{SEPARATOR}{}",
        STANDARD.encode(salt),
        STANDARD.encode(key)
    )
}

/// Parses a record produced by [`serialize`].
///
/// # Errors
///
/// Returns [`PbkdfError::Format`] if:
/// - the text does not have exactly three fields
/// - the salt or key field is not valid base64
/// - the iteration count is not a decimal integer
pub fn parse(text: &str) -> Result<CredentialRecord> {
    let fields: Vec<&str> = text.split(SEPARATOR).collect();

    let &[salt, iterations, key] = fields.as_slice() else {
        return Err(PbkdfError::Format(format!(
            "expected {FIELD_COUNT} '{SEPARATOR}' separated fields, found {}",
            fields.len()
        )));
    };

    let salt = STANDARD
        .decode(salt)
        .map_err(|e| PbkdfError::Format(format!("invalid salt encoding: {e}")))?;

    let iterations = iterations
        .parse::<u64>()
        .map_err(|e| PbkdfError::Format(format!("invalid iteration count: {e}")))?;

    let key = STANDARD
        .decode(key)
        .map_err(|e| PbkdfError::Format(format!("invalid key encoding: {e}")))?;

    Ok(CredentialRecord::new(salt, iterations, key))
}
