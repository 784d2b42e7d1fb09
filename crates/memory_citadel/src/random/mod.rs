//! Seeded pseudo-random source used by the building generator.
//!
//! [`SeededRandomSource`] is a fixed-parameter 64-bit linear congruential
//! generator (Knuth's MMIX constants). Its output only depends on the seed and
//! the sequence of calls, so every platform replays the same stream.
use std::convert::Infallible;

use rand::TryRng;

use crate::error::{Error, Result};

pub mod seed;

pub use seed::{seed_for_identifier, seed_from_bytes, seed_from_slice};

/// LCG multiplier (Knuth, MMIX).
pub const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// LCG increment (Knuth, MMIX).
pub const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Deterministic pseudo-random stream seeded from a single `u64`.
///
/// Each instance is independent; generating a building creates its own source
/// and drops it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandomSource {
    state: u64,
}

impl SeededRandomSource {
    /// Create a source whose first draw is the first step after `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        // Low bits of a power-of-two LCG have short periods; only the high half is used.
        (self.state >> 32) as u32
    }

    /// Draw an integer in `[0, upper_exclusive)`.
    ///
    /// Returns [`Error::InvalidInput`] when the bound is zero.
    pub fn next_bounded_int(&mut self, upper_exclusive: u32) -> Result<u32> {
        if upper_exclusive == 0 {
            return Err(Error::InvalidInput(
                "upper bound must be greater than zero".into(),
            ));
        }
        Ok(self.bounded(upper_exclusive))
    }

    /// Draw an integer in `[0, bound)` with exactly one step.
    ///
    /// Uses a widening multiply instead of rejection so the number of steps per
    /// draw is fixed. Callers guarantee `bound > 0`.
    #[inline]
    pub(crate) fn bounded(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bound must be > 0");
        ((self.step() as u64 * bound as u64) >> 32) as u32
    }

    /// Draw a float in `[0, 1)`.
    #[inline]
    pub fn next_uniform_float(&mut self) -> f64 {
        self.step() as f64 / 4_294_967_296.0
    }
}

/// Exposes the stream through `rand`'s traits; `Rng` follows from the blanket impl.
impl TryRng for SeededRandomSource {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> std::result::Result<u32, Infallible> {
        Ok(self.step())
    }

    fn try_next_u64(&mut self) -> std::result::Result<u64, Infallible> {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        Ok((hi << 32) | lo)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Infallible> {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn same_seed_replays_same_stream() {
        let mut a = SeededRandomSource::new(42);
        let mut b = SeededRandomSource::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandomSource::new(42);
        let mut b = SeededRandomSource::new(43);
        let sa: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let sb: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn first_steps_match_reference_values() {
        let mut rng = SeededRandomSource::new(0);
        assert_eq!(rng.next_u32(), 0x1405_7B7E);
        assert_eq!(rng.state(), LCG_INCREMENT);
        let mut rng = SeededRandomSource::new(1);
        assert_eq!(rng.next_u32(), 0x6C57_6FAC);
    }

    #[test]
    fn zero_bound_is_rejected() {
        let mut rng = SeededRandomSource::new(7);
        let before = rng.state();
        assert!(matches!(
            rng.next_bounded_int(0),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(rng.state(), before, "a rejected draw must not advance the stream");
    }

    #[test]
    fn bounded_ints_stay_in_range() {
        let mut rng = SeededRandomSource::new(12345);
        for bound in [1u32, 2, 3, 7, 100, u32::MAX] {
            for _ in 0..500 {
                let v = rng.next_bounded_int(bound).unwrap();
                assert!(v < bound, "{v} not below {bound}");
            }
        }
    }

    #[test]
    fn bounded_ints_cover_small_ranges() {
        let mut rng = SeededRandomSource::new(99);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[rng.next_bounded_int(3).unwrap() as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn uniform_floats_in_unit_range() {
        let mut rng = SeededRandomSource::new(2025);
        let mut sum = 0.0;
        let n = 10_000;
        for _ in 0..n {
            let v = rng.next_uniform_float();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
            sum += v;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.05, "mean {mean} far from 0.5");
    }

    #[test]
    fn each_draw_advances_exactly_one_step() {
        let mut a = SeededRandomSource::new(5);
        let mut b = SeededRandomSource::new(5);
        a.next_bounded_int(3).unwrap();
        b.next_uniform_float();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn usable_wherever_a_rand_generator_is_expected() {
        fn first_word<R: Rng>(rng: &mut R) -> u32 {
            rng.next_u32()
        }
        let mut source = SeededRandomSource::new(0);
        assert_eq!(first_word(&mut source), 0x1405_7B7E);
    }

    #[test]
    fn next_u64_joins_two_steps_high_first() {
        let mut a = SeededRandomSource::new(3);
        let mut b = SeededRandomSource::new(3);
        let hi = b.next_u32() as u64;
        let lo = b.next_u32() as u64;
        assert_eq!(a.next_u64(), (hi << 32) | lo);
    }

    #[test]
    fn fill_bytes_handles_partial_chunks() {
        let mut a = SeededRandomSource::new(11);
        let mut b = SeededRandomSource::new(11);
        let mut buf = [0u8; 6];
        a.fill_bytes(&mut buf);
        let first = b.next_u32().to_le_bytes();
        let second = b.next_u32().to_le_bytes();
        assert_eq!(&buf[..4], &first);
        assert_eq!(&buf[4..], &second[..2]);
    }
}
