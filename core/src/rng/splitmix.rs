//! SplitMix64 seed expansion
//!
//! Turns a possibly-zero or low-entropy seed into well distributed 64-bit
//! words. Callers expand a single seed by feeding `seed + 0`, `seed + 1`, ...

/// Golden-ratio increment added before mixing
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_2: u64 = 0x94D0_49BB_1331_11EB;

/// Pure SplitMix64 finalizer
///
/// # Example
/// ```
/// use fastpar_core::splitmix64;
///
/// assert_eq!(splitmix64(0), 0xe220_a839_7b1d_cdaf);
/// assert_eq!(splitmix64(7), splitmix64(7));
/// ```
#[inline]
pub fn splitmix64(index: u64) -> u64 {
    let mut z = index.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(MIX_1);
    z = (z ^ (z >> 27)).wrapping_mul(MIX_2);
    z ^ (z >> 31)
}
