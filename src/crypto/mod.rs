//! Primitives consumed by the key derivation engines.
//!
//! Provides the hash function selection and the secure random source.

pub mod hash;
pub mod rng;

pub use hash::HashAlgorithm;
pub use rng::{OsRandom, SecureRandomSource, random_bytes};

/// Width of the PBKDF2 block index (4 bytes).
pub const BLOCK_INDEX_LEN: usize = 4;
/// Largest PBKDF2 block index, `2^32 - 1`.
pub const MAX_BLOCKS: u64 = u32::MAX as u64;
