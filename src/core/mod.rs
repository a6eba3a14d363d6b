//! Core types: players, cards, RNG, and the composed game state.

mod card;
mod player;
mod rng;
mod state;

pub use card::{Card, CardId, DragonType};
pub use player::{PerPlayer, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState, COPIES_PER_TYPE, DECK_SIZE, HAND_LIMIT};
