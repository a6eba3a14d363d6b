//! Dragon types and card identity.
//!
//! The deck holds 30 cards, six of each of the five dragon types.
//! Cards are created once at deck-build time and never destroyed as
//! objects: "destruction" moves a card to the discard pile.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// The five elemental dragon types. Closed enumeration; all rule
/// tables match exhaustively over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragonType {
    Fire,
    Water,
    Earth,
    Wood,
    Metal,
}

impl DragonType {
    /// All five types, in deck-build order.
    pub const ALL: [DragonType; 5] = [
        DragonType::Fire,
        DragonType::Water,
        DragonType::Earth,
        DragonType::Wood,
        DragonType::Metal,
    ];

    /// Number of dragon types.
    pub const COUNT: usize = 5;
}

impl std::fmt::Display for DragonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DragonType::Fire => "fire",
            DragonType::Water => "water",
            DragonType::Earth => "earth",
            DragonType::Wood => "wood",
            DragonType::Metal => "metal",
        };
        write!(f, "{name}")
    }
}

/// Unique card identifier, assigned sequentially at deck-build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card {}", self.0)
    }
}

/// A single card: identity, dragon type, and owner.
///
/// Immutable except for `owner`, which is `None` while the card sits
/// in the deck or a hand and is set when the card is placed on a flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity, stable for the whole game.
    pub id: CardId,

    /// Elemental type.
    pub dragon: DragonType,

    /// Owning side while on a flow; `None` in deck/hand/discard.
    pub owner: Option<PlayerId>,
}

impl Card {
    /// Create an unowned card.
    #[must_use]
    pub const fn new(id: CardId, dragon: DragonType) -> Self {
        Self {
            id,
            dragon,
            owner: None,
        }
    }
}
