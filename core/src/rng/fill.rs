//! Byte filling from any 64-bit generator

use super::UnsafeRng;

/// Fill `buf` with random bytes drawn from `rng`
///
/// Bytes are written in little-endian 8-byte chunks, one draw per chunk.
/// A trailing partial chunk consumes one more draw and keeps only its
/// low-order bytes, so exactly `ceil(buf.len() / 8)` draws are made.
/// An empty buffer makes no draws.
///
/// # Example
/// ```
/// use fastpar_core::{fill_bytes, Xoshiro256StarStar};
///
/// let mut rng = Xoshiro256StarStar::new(7);
/// let mut buf = [0u8; 12];
/// fill_bytes(&mut rng, &mut buf);
/// ```
pub fn fill_bytes<'a, R>(rng: &mut R, buf: &'a mut [u8]) -> &'a mut [u8]
where
    R: UnsafeRng + ?Sized,
{
    let mut chunks = buf.chunks_exact_mut(8);
    for chunk in &mut chunks {
        chunk.copy_from_slice(&rng.next_u64().to_le_bytes());
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let word = rng.next_u64().to_le_bytes();
        let len = tail.len();
        tail.copy_from_slice(&word[..len]);
    }

    buf
}
