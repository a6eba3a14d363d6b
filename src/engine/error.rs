//! Typed rejection outcomes for engine operations.
//!
//! Every rejection is returned to the caller; the engine never mutates
//! state on a rejected action. A deck-search miss is a void outcome,
//! not an error, and does not appear here.

use thiserror::Error;

use super::budget::ActionCategory;
use crate::core::{CardId, PlayerId};

/// Rejection reasons for engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The action is not legal in the current game phase.
    #[error("action is not legal in the current phase")]
    WrongPhase,

    /// The actor is not allowed to act right now (not the turn owner,
    /// not the designated chooser, or not the pending event's owner).
    #[error("{0} cannot act right now")]
    NotYourTurn(PlayerId),

    /// Category cap or global action pool reached.
    #[error("{category} budget exhausted")]
    BudgetExhausted { category: ActionCategory },

    /// Not enough ore for the chosen ability.
    #[error("need {needed} ore, have {have}")]
    InsufficientOre { needed: u32, have: u32 },

    /// Occupied/blocked/out-of-range column, card not present or not
    /// owned, combat-table mismatch, or bad swap endpoints.
    #[error("illegal target: {0}")]
    IllegalTarget(&'static str),

    /// A pending harmonization blocks every action except accept/skip.
    #[error("a harmonization decision is pending")]
    HarmonizationPending,

    /// Accept/skip with nothing pending.
    #[error("no harmonization is pending")]
    NoPendingHarmonization,

    /// A card marked harmonized-this-turn reached resolution again
    /// outside Reharmonize. Indicates a rule-table inconsistency, so
    /// it is fatal to the operation rather than silently ignored.
    #[error("{card} already harmonized this turn")]
    CascadeInvariantViolation { card: CardId },
}
