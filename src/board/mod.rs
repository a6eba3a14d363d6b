//! Board model: flows and flow positions.
//!
//! Hands, the deck, the discard pile, and the ore counters are plain
//! persistent collections composed directly into
//! [`GameState`](crate::core::GameState).

mod flow;

pub use flow::{Flow, FlowPosition, FLOW_SIZE};
