//! PCG32 (XSH-RR 64/32) generators
//!
//! 64 bits of state, 32 bits of output per step. [`Pcg32x2`] runs two
//! independent streams side by side to produce 64-bit values.

use super::splitmix::splitmix64;
use super::{SeedableUnsafeRng, UnsafeRng};

const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Thread-unsafe PCG32 generator
///
/// # Example
/// ```
/// use fastpar_core::Pcg32;
///
/// let mut rng = Pcg32::default();
/// rng.set_state(42, 54);
/// assert_eq!(rng.next_u32(), 0xa15c_02b7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    pub fn new(seed: i64) -> Self {
        Self::from_seed_i64(seed)
    }

    /// Initialize from a starting state and a stream selector
    pub fn set_state(&mut self, initstate: u64, initseq: u64) {
        self.state = 0;
        self.inc = (initseq << 1) | 1;
        self.next_u32();
        self.state = self.state.wrapping_add(initstate);
        self.next_u32();
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(PCG_MULTIPLIER).wrapping_add(self.inc);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        let mut rng = Self { state: 0, inc: 1 };
        rng.set_state(0, 0);
        rng
    }
}

impl UnsafeRng for Pcg32 {
    /// Two 32-bit steps, first one in the high half
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }
}

impl SeedableUnsafeRng for Pcg32 {
    fn seed(&mut self, seed: i64) {
        let base = seed as u64;
        self.set_state(splitmix64(base), splitmix64(base.wrapping_add(1)));
    }
}

/// Two interleaved PCG32 streams producing 64-bit output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pcg32x2 {
    hi: Pcg32,
    lo: Pcg32,
}

impl Pcg32x2 {
    pub fn new(seed: i64) -> Self {
        Self::from_seed_i64(seed)
    }

    /// Initialize both streams; the stream selectors are forced apart
    pub fn set_state(&mut self, seed1: u64, seq1: u64, seed2: u64, mut seq2: u64) {
        let mask = u64::MAX >> 1;
        // The top bit is discarded by `(seq << 1) | 1`, so compare without it
        if seq1 & mask == seq2 & mask {
            seq2 = !seq2;
        }
        self.hi.set_state(seed1, seq1);
        self.lo.set_state(seed2, seq2);
    }
}

impl UnsafeRng for Pcg32x2 {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (u64::from(self.hi.next_u32()) << 32) | u64::from(self.lo.next_u32())
    }
}

impl SeedableUnsafeRng for Pcg32x2 {
    fn seed(&mut self, seed: i64) {
        let base = seed as u64;
        self.set_state(
            splitmix64(base),
            splitmix64(base.wrapping_add(1)),
            splitmix64(base.wrapping_add(2)),
            splitmix64(base.wrapping_add(3)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_streams_are_separated() {
        let mut a = Pcg32x2::default();
        a.set_state(1, 5, 1, 5);
        assert_ne!(a.hi.inc, a.lo.inc);
    }

    #[test]
    fn test_streams_differing_only_in_top_bit_are_separated() {
        let mut a = Pcg32x2::default();
        a.set_state(1, 5, 1, 5 | (1 << 63));
        assert_ne!(a.hi.inc, a.lo.inc);
    }
}
