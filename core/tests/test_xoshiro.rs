//! Tests for the xoshiro256** generator and SplitMix64 seeding
//!
//! CRITICAL: Output must match the published reference sequence bit for bit.

use fastpar_core::{splitmix64, SeedableUnsafeRng, UnsafeRng, Xoshiro256StarStar};
use proptest::prelude::*;

const REFERENCE_STATE: [u64; 4] = [
    0x01d353e5f3993bb0,
    0x7b9c0df6cb193b20,
    0xfdfcaa91110765b6,
    0xd2db341f10bb232e,
];

#[test]
fn test_reference_sequence() {
    let mut rng = Xoshiro256StarStar::from_state(REFERENCE_STATE);

    // The reference output is published as a little-endian byte dump
    // starting "dd 51 b2 b7 d9 30 3a 37 eb d9 63 66 a6 70 fd 50"
    let first = rng.next_u64();
    let second = rng.next_u64();
    assert_eq!(first, 0x373a30d9b7b251dd);
    assert_eq!(second, 0x50fd70a66663d9eb);
    assert_eq!(first.swap_bytes(), 0xdd51b2b7d9303a37);
    assert_eq!(second.swap_bytes(), 0xebd96366a670fd50);

    assert_eq!(rng.next_u64(), 0x35c021211f29e726);
    assert_eq!(rng.next_u64(), 0xd341b177032dc136);
}

#[test]
fn test_seeded_sequence_is_stable() {
    let mut rng = Xoshiro256StarStar::new(0);
    assert_eq!(rng.next_u64(), 0x65094a0ab526fa3a);
    assert_eq!(rng.next_u64(), 0x14790c77058b9213);
    assert_eq!(rng.next_u64(), 0x545e14c068d2cdfc);

    let mut rng = Xoshiro256StarStar::new(1);
    assert_eq!(rng.next_u64(), 0x40bc05834d211f4a);
    assert_eq!(rng.next_u64(), 0x53a0d5e80dc45f64);
}

#[test]
fn test_same_seed_same_sequence() {
    let mut rng1 = Xoshiro256StarStar::new(12345);
    let mut rng2 = Xoshiro256StarStar::from_seed_i64(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next_u64(), rng2.next_u64(), "RNG not deterministic!");
    }
}

#[test]
fn test_different_seeds_different_sequences() {
    let mut rng1 = Xoshiro256StarStar::new(12345);
    let mut rng2 = Xoshiro256StarStar::new(54321);
    assert_ne!(rng1.next_u64(), rng2.next_u64());
}

#[test]
fn test_trait_object_draws_match_inherent() {
    let mut direct = Xoshiro256StarStar::new(8);
    let mut boxed: Box<dyn UnsafeRng> = Box::new(Xoshiro256StarStar::new(8));

    for _ in 0..16 {
        assert_eq!(direct.next_u64(), boxed.next_u64());
    }
}

#[test]
fn test_rand_core_interop() {
    use rand::Rng;

    let mut rng = Xoshiro256StarStar::new(5);
    for _ in 0..1000 {
        let x: u8 = rng.gen_range(10..20);
        assert!((10..20).contains(&x));
    }
}

#[test]
fn test_state_roundtrips_through_serde() {
    let mut rng = Xoshiro256StarStar::new(77);
    rng.next_u64();

    let json = serde_json::to_string(&rng).unwrap();
    let mut restored: Xoshiro256StarStar = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.next_u64(), rng.next_u64());
}

proptest! {
    #[test]
    fn prop_seed_never_leaves_zero_word(seed in any::<i64>()) {
        let rng = Xoshiro256StarStar::new(seed);
        prop_assert!(rng.state().iter().all(|&w| w != 0));
    }

    #[test]
    fn prop_seed_words_are_splitmix_outputs(seed in any::<i64>()) {
        // No SplitMix64 output is zero for these seeds in practice, so the
        // four words come from consecutive indices
        let base = seed as u64;
        let expected: Vec<u64> = (0..4).map(|i| splitmix64(base.wrapping_add(i))).collect();
        prop_assume!(expected.iter().all(|&w| w != 0));
        prop_assert_eq!(Xoshiro256StarStar::new(seed).state().to_vec(), expected);
    }
}
