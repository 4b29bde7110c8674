//! PBKDF2 with the hash itself as PRF.
//!
//! ```text
//! U_1  = Hash(P || S || INT(i))
//! U_j  = Hash(P || U_{j-1})            for j = 2..c
//! F(i) = U_1 ^ U_2 ^ ... ^ U_c
//! DK   = F(1) || ... || F(l)[..r]
//! ```
//!
//! The PRF is `Hash(P || x)` rather than `HMAC(P, x)`, so RFC 8018 test
//! vectors do not apply. Stored records depend on this exact construction.

use sha2::digest::DynDigest;
use zeroize::Zeroizing;

use super::{DerivedKey, check_params};
use crate::codec::{Endian, encode_uint};
use crate::crypto::{BLOCK_INDEX_LEN, HashAlgorithm, MAX_BLOCKS};
use crate::error::Result;

/// Byte order of `INT(i)`: most significant byte first.
pub const BLOCK_INDEX_ENDIAN: Endian = Endian::Big;

/// `(2^32 - 1) * hLen`.
pub fn max_key_len(hash: HashAlgorithm) -> u64 {
    MAX_BLOCKS * hash.output_size() as u64
}

pub fn derive(
    hash: HashAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u64,
    key_len: usize,
) -> Result<DerivedKey> {
    check_params(max_key_len(hash), iterations, key_len)?;

    let h_len = hash.output_size();
    let blocks = key_len.div_ceil(h_len) as u64;

    let mut key = Zeroizing::new(Vec::with_capacity(key_len));
    let mut ctx = hash.new_context();

    for index in 1..=blocks {
        let f = block(ctx.as_mut(), password, salt, iterations, index);
        // last block may be partial
        let take = (key_len - key.len()).min(h_len);
        key.extend_from_slice(&f[..take]);
    }

    Ok(key)
}

/// Computes `F(index)`. Leaves `ctx` reset.
fn block(
    ctx: &mut dyn DynDigest,
    password: &[u8],
    salt: &[u8],
    iterations: u64,
    index: u64,
) -> Zeroizing<Vec<u8>> {
    ctx.update(password);
    ctx.update(salt);
    ctx.update(&encode_uint(index, BLOCK_INDEX_LEN, BLOCK_INDEX_ENDIAN));

    let mut u = Zeroizing::new(ctx.finalize_reset().into_vec());
    let mut acc = u.clone();

    for _ in 1..iterations {
        ctx.update(password);
        ctx.update(&u);
        u = Zeroizing::new(ctx.finalize_reset().into_vec());

        acc.iter_mut().zip(u.iter()).for_each(|(a, b)| *a ^= b);
    }

    acc
}
