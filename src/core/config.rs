//! Game configuration.
//!
//! `GameOptions` carries every tunable rule constant. It deserializes from
//! partial documents (missing fields take their defaults), so a host can
//! keep options in JSON or any other serde format.
//!
//! ```
//! use konivrer_engine::core::{GameOptions, LifeLossRule};
//!
//! let options = GameOptions::default()
//!     .with_seed(99)
//!     .with_max_field_size(3)
//!     .with_life_loss_rule(LifeLossRule::ExcessDiscarded);
//!
//! assert_eq!(options.starting_life_cards, 4);
//! assert!(options.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerId;

/// What happens when damage reaches a player whose life stack is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossRule {
    /// Any point of damage that finds the stack empty loses the game.
    #[default]
    DamageOnEmptyStack,
    /// Excess damage is discarded. Players only lose by deck-out or concession.
    ExcessDiscarded,
}

/// Rule constants for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub starting_hand_size: usize,
    pub starting_life_cards: usize,
    pub max_azoth_per_turn: u32,
    pub max_field_size: usize,
    /// Enforced at Refresh by discarding the newest cards.
    pub max_hand_size: usize,
    /// Minimum deck size, flag excluded.
    pub min_deck_size: usize,
    pub enable_burst_cards: bool,
    pub enable_flag_cards: bool,
    pub enable_tribute_system: bool,
    pub life_loss_rule: LifeLossRule,
    /// Seed for shuffles and the first-player choice.
    pub seed: u64,
    /// When false, decks keep the order they were submitted in.
    pub shuffle_decks: bool,
    /// Forces the first player instead of choosing at random.
    pub first_player: Option<PlayerId>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            starting_life_cards: 4,
            max_azoth_per_turn: 1,
            max_field_size: 5,
            max_hand_size: 7,
            min_deck_size: 40,
            enable_burst_cards: true,
            enable_flag_cards: true,
            enable_tribute_system: true,
            life_loss_rule: LifeLossRule::DamageOnEmptyStack,
            seed: 0,
            shuffle_decks: true,
            first_player: None,
        }
    }
}

impl GameOptions {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_starting_life_cards(mut self, count: usize) -> Self {
        self.starting_life_cards = count;
        self
    }

    #[must_use]
    pub fn with_max_azoth_per_turn(mut self, max: u32) -> Self {
        self.max_azoth_per_turn = max;
        self
    }

    #[must_use]
    pub fn with_max_field_size(mut self, max: usize) -> Self {
        self.max_field_size = max;
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, max: usize) -> Self {
        self.max_hand_size = max;
        self
    }

    #[must_use]
    pub fn with_min_deck_size(mut self, min: usize) -> Self {
        self.min_deck_size = min;
        self
    }

    #[must_use]
    pub fn with_bursts(mut self, enabled: bool) -> Self {
        self.enable_burst_cards = enabled;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, enabled: bool) -> Self {
        self.enable_flag_cards = enabled;
        self
    }

    #[must_use]
    pub fn with_tribute(mut self, enabled: bool) -> Self {
        self.enable_tribute_system = enabled;
        self
    }

    #[must_use]
    pub fn with_life_loss_rule(mut self, rule: LifeLossRule) -> Self {
        self.life_loss_rule = rule;
        self
    }

    /// Keep submitted deck order. Useful for scripted games and tests.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    /// Reject option combinations no game could be played under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_field_size == 0 {
            return Err(ConfigError::InvalidOption {
                field: "max_field_size",
                reason: "must be at least 1".into(),
            });
        }
        if self.max_hand_size < self.starting_hand_size {
            return Err(ConfigError::InvalidOption {
                field: "max_hand_size",
                reason: format!(
                    "{} is smaller than the starting hand of {}",
                    self.max_hand_size, self.starting_hand_size
                ),
            });
        }
        if self.min_deck_size < self.starting_hand_size + self.starting_life_cards {
            return Err(ConfigError::InvalidOption {
                field: "min_deck_size",
                reason: "decks could not deal life cards and an opening hand".into(),
            });
        }
        if let Some(player) = self.first_player {
            if !player.is_valid() {
                return Err(ConfigError::InvalidOption {
                    field: "first_player",
                    reason: format!("{player} is not a seat"),
                });
            }
        }
        Ok(())
    }
}
