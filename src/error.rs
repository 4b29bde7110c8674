use thiserror::Error;

/// Result type for key derivation and record operations.
pub type Result<T> = std::result::Result<T, PbkdfError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PbkdfError {
    /// A derivation or generator argument is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested key is longer than the algorithm can produce.
    #[error("derived key too long: requested {requested} bytes, at most {max} allowed")]
    KeyTooLong { requested: usize, max: u64 },

    /// The stored credential record is malformed.
    #[error("malformed password record: {0}")]
    Format(String),

    /// The secure random generator failed.
    #[error("random source unavailable: {0}")]
    RandomSource(String),
}
