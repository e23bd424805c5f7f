//! Entity identification.
//!
//! Every physical card in a game and both players have a unique `EntityId`.
//!
//! ## ID Layout
//!
//! - `0` and `1`: the two players
//! - `2..`: cards, allocated in deck order when the game is initialized
//!
//! Player entities exist so that explicit effect targets can name either a
//! card or a player with the same type.
//!
//! ```
//! use konivrer_engine::core::{EntityId, PlayerId};
//!
//! let opponent = EntityId::player(PlayerId::new(1));
//! assert_eq!(opponent.as_player(), Some(PlayerId::new(1)));
//!
//! let card = EntityId(10);
//! assert!(!card.is_player());
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};

/// Unique identifier for a player or a physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First id handed out to cards.
    pub const FIRST_CARD: u32 = PLAYER_COUNT as u32;

    /// Entity id standing for a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// Whether this id refers to a player rather than a card.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 < Self::FIRST_CARD
    }

    /// The player this id stands for, if any.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        if self.is_player() {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<PlayerId> for EntityId {
    fn from(id: PlayerId) -> Self {
        Self::player(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_player() {
            Some(player) => write!(f, "{player}"),
            None => write!(f, "Card#{}", self.0),
        }
    }
}
