//! Hazard layout randomness.
//!
//! A `BoardConfig` with a `seed` must lay out the same board on every run
//! and every target, so layouts go through a `SmallRng` seeded from a `u64`.
//! Without a seed the generator is drawn from `getrandom`, which on wasm32
//! reads the browser's crypto source.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Picks hazard cells for [`place_hazards_random`](crate::board::place_hazards_random).
pub struct BoardRng {
    inner: SmallRng,
}

impl BoardRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Replayable layouts: the same seed always yields the same picks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    /// Pick `k` distinct items from `pool` uniformly (partial Fisher-Yates).
    /// `pool` is reordered; the picks end up in `pool[..k]`.
    pub fn choose_distinct<T: Copy>(&mut self, pool: &mut [T], k: usize) -> Vec<T> {
        let k = k.min(pool.len());
        for i in 0..k {
            let j = self.inner.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool[..k].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = BoardRng::from_seed(2024).choose_distinct(&mut cells(81), 10);
        let b = BoardRng::new(Some(2024)).choose_distinct(&mut cells(81), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_picks_are_distinct_pool_members() {
        let mut rng = BoardRng::from_seed(7);
        let mut pool = cells(20);
        let mut picked = rng.choose_distinct(&mut pool, 8);
        assert_eq!(&pool[..8], picked.as_slice());
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 8);
        assert!(picked.iter().all(|&v| v < 20));
    }

    #[test]
    fn test_pool_stays_a_permutation() {
        let mut rng = BoardRng::from_seed(3);
        let mut pool = cells(30);
        rng.choose_distinct(&mut pool, 12);
        pool.sort_unstable();
        assert_eq!(pool, cells(30));
    }

    #[test]
    fn test_choose_more_than_pool() {
        let mut rng = BoardRng::from_seed(7);
        let mut pool = [1, 2, 3];
        assert_eq!(rng.choose_distinct(&mut pool, 10).len(), 3);
        assert!(rng.choose_distinct(&mut [0u8; 0], 2).is_empty());
    }
}
