mod codec;
mod config;
mod crypto;
mod error;
mod format;
mod generate;
mod kdf;
mod password;

pub use crate::codec::{Endian, decode_uint, encode_uint};
pub use crate::config::{Params, default_config_path};
pub use crate::crypto::{HashAlgorithm, OsRandom, SecureRandomSource, random_bytes};
pub use crate::error::{PbkdfError, Result};
pub use crate::format::{CredentialRecord, parse as parse_record, serialize as serialize_record};
pub use crate::generate::{DEFAULT_CHARSET, random_in_range, random_password};
pub use crate::kdf::{Algorithm, DerivedKey, KeyDerivation, Pbkdf1, Pbkdf2};
pub use crate::password::{
    encode_password, encode_password_pbkdf1, encode_password_pbkdf2, encode_password_with,
    verify_password, verify_password_pbkdf1, verify_password_pbkdf2,
};

use std::sync::Arc;

use zeroize::Zeroizing;

/// Encodes and verifies password records with a fixed set of [`Params`].
#[derive(Clone)]
pub struct PasswordEncoder {
    params: Params,
    rng: Arc<dyn SecureRandomSource>,
}

impl PasswordEncoder {
    /// Uses the OS random generator for salts.
    pub fn new(params: Params) -> anyhow::Result<Self> {
        Self::with_random_source(params, OsRandom)
    }

    pub fn with_random_source<R>(params: Params, rng: R) -> anyhow::Result<Self>
    where
        R: SecureRandomSource + 'static,
    {
        params.validate()?;
        Ok(Self {
            params,
            rng: Arc::new(rng),
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Produces a new record for `password` with a fresh salt.
    pub fn encode(&self, password: &str) -> Result<String> {
        encode_password_with(
            &self.params.algorithm(),
            self.rng.as_ref(),
            self.params.hash(),
            password,
            self.params.salt_len(),
            self.params.iterations(),
            self.params.key_len(),
        )
    }

    /// Checks `password` against `record`. A mismatch is `Ok(false)`.
    pub fn verify(&self, password: &str, record: &str) -> Result<bool> {
        verify_password(
            &self.params.algorithm(),
            self.params.hash(),
            password,
            record,
        )
    }

    /// Random password from the configured character set.
    pub fn generate_password(&self, min_len: usize, max_len: usize) -> Result<Zeroizing<String>> {
        random_password(self.rng.as_ref(), min_len, max_len, self.params.charset())
    }
}
