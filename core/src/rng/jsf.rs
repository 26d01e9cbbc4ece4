//! Bob Jenkins' small fast 64-bit generator (JSF64)

use super::{SeedableUnsafeRng, UnsafeRng};

const JSF_SEED_A: u64 = 0xf1ea_5eed;
/// Outputs discarded after seeding to decorrelate `b`, `c` and `d`
const WARMUP_ROUNDS: usize = 20;

/// Thread-unsafe JSF64 generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jsf64 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Jsf64 {
    pub fn new(seed: i64) -> Self {
        Self::from_seed_i64(seed)
    }
}

impl Default for Jsf64 {
    fn default() -> Self {
        let mut rng = Self { a: 0, b: 0, c: 0, d: 0 };
        rng.seed(0);
        rng
    }
}

impl UnsafeRng for Jsf64 {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let e = self.a.wrapping_sub(self.b.rotate_left(7));
        self.a = self.b ^ self.c.rotate_left(13);
        self.b = self.c.wrapping_add(self.d.rotate_left(37));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

impl SeedableUnsafeRng for Jsf64 {
    fn seed(&mut self, seed: i64) {
        let seed = seed as u64;
        self.a = JSF_SEED_A;
        self.b = seed;
        self.c = seed;
        self.d = seed;
        for _ in 0..WARMUP_ROUNDS {
            self.next_u64();
        }
    }
}
