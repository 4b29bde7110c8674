//! Encoding parameters and their JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::crypto::HashAlgorithm;
use crate::generate::DEFAULT_CHARSET;
use crate::kdf::{Algorithm, KeyDerivation};

/// Everything needed to encode a new password record.
///
/// Verification only needs `algorithm` and `hash`; salt, iteration count
/// and key length are read back from the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    algorithm: Algorithm,
    hash: HashAlgorithm,
    salt_len: usize,
    iterations: u64,
    key_len: usize,
    charset: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Pbkdf2,
            hash: HashAlgorithm::Sha512,
            // 128 bit salt
            salt_len: 16,
            iterations: 10_000,
            key_len: 64,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl Params {
    pub fn new(
        algorithm: Algorithm,
        hash: HashAlgorithm,
        salt_len: usize,
        iterations: u64,
        key_len: usize,
    ) -> Result<Self> {
        let params = Self {
            algorithm,
            hash,
            salt_len,
            iterations,
            key_len,
            charset: DEFAULT_CHARSET.to_string(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Replaces the character set used for generated passwords.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Result<Self> {
        self.charset = charset.into();
        self.validate()?;
        Ok(self)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            bail!("iteration count must be >= 1");
        }
        if self.salt_len < 1 {
            bail!("salt length must be >= 1");
        }
        if self.key_len < 1 {
            bail!("key length must be >= 1");
        }

        let max = self.algorithm.max_key_len(self.hash);
        if self.key_len as u64 > max {
            bail!(
                "{} with {} derives at most {max} bytes, {} requested",
                self.algorithm.name(),
                self.hash,
                self.key_len
            );
        }

        if self.charset.is_empty() {
            bail!("password character set must not be empty");
        }
        Ok(())
    }

    /// Parses and validates parameters from JSON. Missing fields take their
    /// default value.
    pub fn from_json(s: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(s).context("json parse")?;
        params.validate().context("invalid parameters")?;
        Ok(params)
    }

    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("read config: {}", p.as_ref().display()))?;
        Self::from_json(&s).with_context(|| format!("load config: {}", p.as_ref().display()))
    }

    /// Loads the platform config file, or the defaults if there is none.
    pub fn load_or_default() -> Result<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("", "", "pbkeys").context("could not determine platform directories")?;

    Ok(project_dirs.config_dir().join("pbkeys.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let params = Params::default();
        params.validate().unwrap();

        assert_eq!(params.algorithm(), Algorithm::Pbkdf2);
        assert_eq!(params.hash(), HashAlgorithm::Sha512);
        assert_eq!(params.salt_len(), 16);
        assert_eq!(params.iterations(), 10_000);
        assert_eq!(params.key_len(), 64);
        assert_eq!(params.charset(), DEFAULT_CHARSET);
    }

    #[test]
    fn invalid_params_fail() {
        assert!(Params::new(Algorithm::Pbkdf2, HashAlgorithm::Sha1, 16, 0, 20).is_err());
        assert!(Params::new(Algorithm::Pbkdf2, HashAlgorithm::Sha1, 0, 1, 20).is_err());
        assert!(Params::new(Algorithm::Pbkdf2, HashAlgorithm::Sha1, 16, 1, 0).is_err());
        assert!(Params::new(Algorithm::Pbkdf1, HashAlgorithm::Sha1, 16, 1, 21).is_err());
        assert!(Params::new(Algorithm::Pbkdf1, HashAlgorithm::Sha1, 16, 1, 20).is_ok());
        assert!(Params::default().with_charset("").is_err());
    }

    #[test]
    fn json_fills_missing_fields() {
        let params = Params::from_json(r#"{"algorithm":"pbkdf1","hash":"sha256","key_len":32}"#)
            .unwrap();

        assert_eq!(params.algorithm(), Algorithm::Pbkdf1);
        assert_eq!(params.hash(), HashAlgorithm::Sha256);
        assert_eq!(params.key_len(), 32);
        assert_eq!(params.salt_len(), 16);
        assert_eq!(params.iterations(), 10_000);
    }

    #[test]
    fn json_rejects_unknown_fields_and_bad_values() {
        assert!(Params::from_json(r#"{"rounds":5}"#).is_err());
        assert!(Params::from_json(r#"{"hash":"md5"}"#).is_err());
        // PBKDF1 with the default 64 byte key needs a 64 byte hash
        assert!(Params::from_json(r#"{"algorithm":"pbkdf1","hash":"sha1"}"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbkeys.json");

        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"iterations": 2048, "charset": "xyz"}}"#).unwrap();
        drop(file);

        let params = Params::load(&path).unwrap();
        assert_eq!(params.iterations(), 2048);
        assert_eq!(params.charset(), "xyz");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Params::load(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }

    #[test]
    fn json_roundtrip() {
        let params = Params::new(Algorithm::Pbkdf1, HashAlgorithm::Sha384, 8, 3, 48).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(Params::from_json(&json).unwrap(), params);
    }

    #[test]
    fn default_config_path_names_json_file() {
        // no home directory in some sandboxes
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("pbkeys.json"), "{}", path.display());
            assert!(path.parent().is_some_and(|dir| !dir.as_os_str().is_empty()));
        }
    }

    #[test]
    fn load_or_default_without_file_gives_defaults() {
        let Ok(path) = default_config_path() else {
            return;
        };
        if !path.exists() {
            assert_eq!(Params::load_or_default().unwrap(), Params::default());
        }
    }
}
