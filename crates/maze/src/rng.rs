//! Randomness source used to choose among unvisited neighbors.

use rand::{Rng, RngCore, SeedableRng};

/// Uniform choice over a non-empty candidate set.
///
/// Every [`RngCore`] is a source, so the generator accepts any `rand`
/// generator as well as [`SplitMix64`].
pub trait RandomSource {
    /// Uniform index in `0..len`.
    ///
    /// Panics when `len == 0`: callers guarantee a non-empty candidate set.
    fn pick_index(&mut self, len: usize) -> usize;

    /// One element of `candidates`, chosen uniformly.
    fn pick<'a, T>(&mut self, candidates: &'a [T]) -> &'a T {
        let i = self.pick_index(candidates.len());
        &candidates[i]
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick from an empty candidate set");
        self.gen_range(0..len)
    }
}

/// Splitmix64 generator: small, fast and reproducible across platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RngCore for SplitMix64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// The seed is the initial state, so `seed_from_u64(s) == new(s)`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
