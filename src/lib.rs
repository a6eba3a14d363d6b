//! # dragonflow
//!
//! Authoritative rule engine for Dragonflow, a two-player turn-based
//! card game played on two parallel five-slot rows ("flows").
//!
//! ## Design Principles
//!
//! 1. **Pure state transitions**: every operation is
//!    `apply(&GameState, actor, &Action) -> Result<GameState, RuleError>`.
//!    The input state is never mutated; rejections never leak a
//!    partially applied value.
//!
//! 2. **Closed rule data**: dragon types, the combat wheel, the
//!    harmonization cycle, and ore ability costs are fixed tables with
//!    exhaustive matches at every dispatch site.
//!
//! 3. **Synchronous cascades**: harmonization chains drain through an
//!    explicit FIFO queue inside the engine. Presentation delays are
//!    the renderer's concern, never a precondition for a state
//!    transition.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: state uses `im` collections for
//!   O(1) cloning, so the value-in/value-out engine stays cheap.
//!
//! - **Peer replication**: the acting peer computes the next state and
//!   ships it whole via [`snapshot`]; the remote peer adopts it
//!   verbatim.
//!
//! ## Modules
//!
//! - `core`: players, cards, RNG, the composed `GameState`
//! - `board`: flows and flow positions
//! - `rules`: combat wheel and harmonization tables
//! - `engine`: action validation, budgets, errors, turn lifecycle
//! - `cascade`: harmonization events, queue, and resolution
//! - `snapshot`: bincode wire form for the transport layer

pub mod board;
pub mod cascade;
pub mod core;
pub mod engine;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, DragonType, GamePhase, GameRng, GameRngState, GameState, PerPlayer, PlayerId,
    COPIES_PER_TYPE, DECK_SIZE, HAND_LIMIT,
};

pub use crate::board::{Flow, FlowPosition, FLOW_SIZE};

pub use crate::rules::{defeats, harmonized_by, priority_rank, HARMONIZATION_PRIORITY};

pub use crate::engine::{
    apply, Action, ActionBudget, ActionCategory, HarmonizationTarget, OreAbility, RuleError,
    SearchPlacement, SwapRef, ACTIONS_PER_TURN, CATEGORY_CAP,
};

pub use crate::cascade::{qualifier_holds, CascadeState, HarmonizationEvent};
