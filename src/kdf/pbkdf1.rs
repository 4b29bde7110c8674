//! PBKDF1: a single chain of hashes over `password || salt`.
//!
//! ```text
//! T_1 = Hash(P || S)
//! T_i = Hash(T_{i-1})      for i = 2..c
//! DK  = T_c[..dkLen]
//! ```

use zeroize::Zeroizing;

use super::{DerivedKey, check_params};
use crate::crypto::HashAlgorithm;
use crate::error::Result;

/// A single hash block is all PBKDF1 can produce.
pub fn max_key_len(hash: HashAlgorithm) -> u64 {
    hash.output_size() as u64
}

pub fn derive(
    hash: HashAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u64,
    key_len: usize,
) -> Result<DerivedKey> {
    check_params(max_key_len(hash), iterations, key_len)?;

    let mut ctx = hash.new_context();
    ctx.update(password);
    ctx.update(salt);
    let mut t = Zeroizing::new(ctx.finalize_reset().into_vec());

    for _ in 1..iterations {
        ctx.update(&t);
        t = Zeroizing::new(ctx.finalize_reset().into_vec());
    }

    t.truncate(key_len);
    Ok(t)
}
