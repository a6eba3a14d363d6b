//! Full-state snapshots for the transport collaborator.
//!
//! After each mutation the acting peer ships the complete `GameState`
//! to the other peer, which adopts it verbatim (last-writer-wins, no
//! merge). The snapshot is a flat bincode value with no cyclic
//! references; the RNG travels inside it so a restored state continues
//! the same shuffle sequence.
//!
//! `decode` performs no rule revalidation of the incoming state. That
//! trust assumption is inherited from the peer-authoritative design;
//! see DESIGN.md.

use crate::core::GameState;

/// Encode a state into its wire form.
pub fn encode(state: &GameState) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(state)
}

/// Decode a state from its wire form.
pub fn decode(bytes: &[u8]) -> Result<GameState, bincode::Error> {
    bincode::deserialize(bytes)
}
