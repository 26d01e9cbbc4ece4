//! Fast non-cryptographic random number generation
//!
//! Two families of types live here:
//!
//! - **Exclusive generators** ([`Xoshiro256StarStar`], [`Pcg32`], [`Pcg32x2`],
//!   [`Jsf64`]) implement [`UnsafeRng`]. Drawing takes `&mut self`, so the
//!   borrow checker rules out two threads sharing one instance.
//! - **Shared wrapper** ([`PoolRng`]) owns a pool of exclusive generators and
//!   hands one out per call. It is `Send + Sync` and draws through `&self`.
//!
//! CRITICAL: None of these generators are suitable for cryptographic use.

mod fill;
mod jsf;
mod pcg;
mod pool;
mod seed;
mod splitmix;
mod xoshiro;

pub use fill::fill_bytes;
pub use jsf::Jsf64;
pub use pcg::{Pcg32, Pcg32x2};
pub use pool::{PoolRng, RngError};
pub use seed::{SeedSource, SplitMixSeedSource, ThreadRngSeedSource};
pub use splitmix::splitmix64;
pub use xoshiro::Xoshiro256StarStar;

/// A thread-unsafe source of 64-bit pseudorandom values
///
/// Implementors mutate internal state on every draw and provide no
/// synchronization. Exclusive access is enforced by `&mut self`.
pub trait UnsafeRng {
    /// Advance the generator and return the next 64-bit value
    fn next_u64(&mut self) -> u64;
}

/// A generator whose state can be (re)initialized from a single seed
pub trait SeedableUnsafeRng: UnsafeRng {
    /// Reinitialize the full internal state from `seed`
    fn seed(&mut self, seed: i64);

    /// Construct a generator and seed it in one step
    fn from_seed_i64(seed: i64) -> Self
    where
        Self: Default + Sized,
    {
        let mut rng = Self::default();
        rng.seed(seed);
        rng
    }
}

impl<R: UnsafeRng + ?Sized> UnsafeRng for &mut R {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

impl<R: UnsafeRng + ?Sized> UnsafeRng for Box<R> {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
