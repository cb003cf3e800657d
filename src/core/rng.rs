//! Deterministic random number generation for shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Serializable**: O(1) state capture and restore, so a resumed game
//!   reshuffles exactly as the original would have
//!
//! ```
//! use solitaire_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut x: Vec<u8> = (0..52).collect();
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used for deck shuffles.
///
/// Uses ChaCha8 for speed while keeping a serializable stream position.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many shuffles have been performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u8> {
        let mut order: Vec<u8> = (0..52).collect();
        rng.shuffle(&mut order);
        order
    }

    #[test]
    fn test_seeded_deals_repeat() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..5 {
            assert_eq!(shuffled(&mut a), shuffled(&mut b));
        }
    }

    #[test]
    fn test_seeds_differ() {
        assert_ne!(shuffled(&mut GameRng::new(1)), shuffled(&mut GameRng::new(2)));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut order = shuffled(&mut rng);
        assert_ne!(order, (0..52).collect::<Vec<u8>>());

        order.sort_unstable();
        assert_eq!(order, (0..52).collect::<Vec<u8>>());
    }

    #[test]
    fn test_state_resumes_stream() {
        let mut rng = GameRng::new(7);
        shuffled(&mut rng);
        shuffled(&mut rng);

        let state = rng.state();
        let mut resumed = GameRng::from_state(&state);
        assert_eq!(shuffled(&mut resumed), shuffled(&mut rng));
        assert_eq!(resumed.seed(), 7);
    }

    #[test]
    fn test_state_json() {
        let mut rng = GameRng::new(3);
        shuffled(&mut rng);

        let json = serde_json::to_string(&rng.state()).unwrap();
        let state: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, rng.state());
        assert!(state.word_pos > 0);
    }
}
