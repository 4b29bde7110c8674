//! Fixed-width unsigned integer <-> byte conversions.

/// Byte order used when encoding integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Encodes the low `width` bytes of `value`.
///
/// Widths above 8 are padded with zero bytes on the most significant side.
pub fn encode_uint(value: u64, width: usize, endian: Endian) -> Vec<u8> {
    let mut buf = vec![0u8; width];
    let le = value.to_le_bytes();

    for (i, b) in le.iter().take(width).enumerate() {
        match endian {
            Endian::Little => buf[i] = *b,
            Endian::Big => buf[width - 1 - i] = *b,
        }
    }

    buf
}

/// Decodes an unsigned integer from `bytes`.
///
/// Only the 8 least significant bytes contribute to the result.
pub fn decode_uint(bytes: &[u8], endian: Endian) -> u64 {
    let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);

    match endian {
        Endian::Big => bytes.iter().fold(0, fold),
        Endian::Little => bytes.iter().rev().fold(0, fold),
    }
}
