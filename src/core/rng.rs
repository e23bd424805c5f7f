//! Deterministic random number generation.
//!
//! All randomness in a game (deck shuffles, the first-player coin flip) goes
//! through one `GameRng`, so a seed fully determines a game given the same
//! caller actions.
//!
//! ```
//! use konivrer_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let (mut left, mut right) = ([1, 2, 3, 4, 5], [1, 2, 3, 4, 5]);
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//!
//! // A saved position replays the same flips.
//! let saved = a.state();
//! let next = a.coin_flip();
//! assert_eq!(GameRng::from_state(&saved).coin_flip(), next);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 generator whose position can be saved in a snapshot.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    /// Fair coin; used to pick the first player when none is configured.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState { seed: self.seed, word_pos: self.inner.get_word_pos() }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self { inner, seed: state.seed }
    }
}

/// Serializable RNG position, stored in game snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
