//! Deterministic random number generation for encounters.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical encounters
//! - **Serializable**: O(1) state capture and restore via the ChaCha word position
//! - **Single source**: shuffles, targeting, intents and summons all draw from here
//!
//! ```
//! use longwar_combat::core::CombatRng;
//!
//! let mut a = CombatRng::new(42);
//! let mut b = CombatRng::new(42);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG threaded through a combat session.
///
/// Serializes as its `CombatRngState`, so a session snapshot carries the
/// exact stream position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "CombatRngState", from = "CombatRngState")]
pub struct CombatRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl CombatRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "Cannot pick an index from an empty range");
        self.inner.gen_range(0..len)
    }

    /// Uniform float in `[0, 1)`.
    pub fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let idx = self.gen_index(slice.len());
        slice.get(idx)
    }

    /// Choose an index with weighted probability.
    ///
    /// Rolls uniformly in `[0, total)`, subtracts weights in list order and
    /// returns the first index that brings the remainder to zero or below.
    /// Falls back to index 0 if rounding leaves a positive remainder.
    ///
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let mut roll = self.gen_unit() * total as f64;

        for (i, &weight) in weights.iter().enumerate() {
            if weight == 0 {
                continue;
            }
            roll -= f64::from(weight);
            if roll <= 0.0 {
                return Some(i);
            }
        }

        Some(0)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> CombatRngState {
        CombatRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &CombatRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<CombatRng> for CombatRngState {
    fn from(rng: CombatRng) -> Self {
        rng.state()
    }
}

impl From<CombatRngState> for CombatRng {
    fn from(state: CombatRngState) -> Self {
        CombatRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_order(seed: u64) -> Vec<u32> {
        let mut rng = CombatRng::new(seed);
        let mut deck: Vec<u32> = (100..120).collect();
        rng.shuffle(&mut deck);
        deck
    }

    #[test]
    fn test_seed_fixes_deck_order() {
        let first = deck_order(42);

        assert_eq!(first, deck_order(42));
        assert_ne!(first, deck_order(43));

        let mut sorted = first;
        sorted.sort_unstable();
        assert_eq!(sorted, (100..120).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_target() {
        let mut rng = CombatRng::new(42);
        let living = [3u32, 5, 8];

        for _ in 0..20 {
            assert!(living.contains(rng.choose(&living).unwrap()));
        }
        assert!(rng.choose::<u32>(&[]).is_none());
    }

    #[test]
    fn test_gen_unit_range() {
        let mut rng = CombatRng::new(3);
        for _ in 0..1_000 {
            let roll = rng.gen_unit();
            assert!((0.0..1.0).contains(&roll));
        }
        assert_eq!(CombatRng::new(3).gen_unit(), CombatRng::new(3).gen_unit());
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = CombatRng::new(42);

        // Zero-weight abilities are never picked.
        for _ in 0..20 {
            assert_eq!(rng.choose_weighted(&[0, 30, 0]), Some(1));
        }

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0, 0]), None);
    }

    #[test]
    fn test_choose_weighted_converges() {
        let mut rng = CombatRng::new(7);
        let mut hits = [0u32; 2];

        for _ in 0..10_000 {
            let idx = rng.choose_weighted(&[60, 40]).unwrap();
            hits[idx] += 1;
        }

        let first = f64::from(hits[0]) / 10_000.0;
        assert!((first - 0.6).abs() < 0.03, "60/40 split drifted to {first}");
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = CombatRng::new(42);
        let mut deck: Vec<u32> = (0..30).collect();
        rng.shuffle(&mut deck);

        let saved = rng.state();
        let mut live = deck.clone();
        rng.shuffle(&mut live);

        let mut restored = CombatRng::from_state(&saved);
        restored.shuffle(&mut deck);

        assert_eq!(live, deck);
    }

    #[test]
    fn test_serde_preserves_position() {
        let mut rng = CombatRng::new(9);
        rng.gen_index(10);

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: CombatRng = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.seed(), 9);
        assert_eq!(rng.gen_index(1000), restored.gen_index(1000));
    }
}
