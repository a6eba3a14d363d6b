//! Inbound action representation.
//!
//! One variant per player operation, each carrying only the minimal
//! parameters the engine needs. All variants are closed sum types so
//! every dispatch site matches exhaustively.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, DragonType, PlayerId};

/// A player action submitted to [`apply`](crate::engine::apply).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Pick who moves first. Only legal for the designated chooser in
    /// the choose-starter phase.
    ChooseStarter { first: PlayerId },

    /// Place a hand card onto an open own-flow column.
    Summon { card: CardId, column: u8 },

    /// Attack the enemy card in the same column.
    Attack { column: u8 },

    /// Draw the top deck card.
    Draw,

    /// Gain 1 ore.
    GainOre,

    /// Spend ore on one of the five sub-abilities.
    SpendOre(OreAbility),

    /// End the turn (hand cap, block sweep, win check, turn flip).
    EndTurn,

    /// Resolve the pending harmonization event with the given target.
    AcceptHarmonization { target: HarmonizationTarget },

    /// Decline the pending harmonization event.
    SkipHarmonization,
}

/// The five ore-funded sub-abilities with their fixed costs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OreAbility {
    /// Relocate an own card between two own columns. Cost 1.
    Move { from: u8, to: u8 },

    /// Move an own flow card back to hand. Cost 1.
    Return { column: u8 },

    /// Attack across an arbitrary column pair. Cost 2.
    Conflict { from: u8, to: u8 },

    /// Re-queue a harmonization event for an already-harmonized own
    /// card. Cost 3.
    Reharmonize { column: u8 },

    /// Scan the deck for the first card of a type. Cost 4; void (no
    /// budget, no ore) on a miss.
    Search {
        dragon: DragonType,
        place: SearchPlacement,
    },
}

impl OreAbility {
    /// Fixed ore cost of this ability.
    #[must_use]
    pub const fn ore_cost(&self) -> u32 {
        match self {
            OreAbility::Move { .. } | OreAbility::Return { .. } => 1,
            OreAbility::Conflict { .. } => 2,
            OreAbility::Reharmonize { .. } => 3,
            OreAbility::Search { .. } => 4,
        }
    }
}

/// Where a found Search card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPlacement {
    /// Into the acting player's hand.
    Hand,
    /// Onto an open own-flow column, triggering harmonization checks.
    Flow { column: u8 },
}

/// Target parameters for accepting a harmonization event.
///
/// Wood and metal abilities are targetless; fire and earth name an
/// enemy column; water names two occupied positions to swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmonizationTarget {
    /// No target needed (wood draw, metal ore).
    None,
    /// Enemy column, relative to the event owner (fire destroy, earth
    /// block).
    EnemyColumn { column: u8 },
    /// Two occupied flow positions to exchange (water).
    Swap { a: SwapRef, b: SwapRef },
}

/// One endpoint of a water swap: a side plus a column on that side's
/// flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRef {
    pub side: PlayerId,
    pub column: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ore_costs() {
        assert_eq!(OreAbility::Move { from: 0, to: 1 }.ore_cost(), 1);
        assert_eq!(OreAbility::Return { column: 0 }.ore_cost(), 1);
        assert_eq!(OreAbility::Conflict { from: 0, to: 4 }.ore_cost(), 2);
        assert_eq!(OreAbility::Reharmonize { column: 2 }.ore_cost(), 3);
        assert_eq!(
            OreAbility::Search {
                dragon: DragonType::Fire,
                place: SearchPlacement::Hand
            }
            .ore_cost(),
            4
        );
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::SpendOre(OreAbility::Search {
            dragon: DragonType::Metal,
            place: SearchPlacement::Flow { column: 3 },
        });

        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
