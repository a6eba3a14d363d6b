//! Harmonization events and the cascade queue.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::{CardId, DragonType, PlayerId};

/// A harmonization trigger awaiting resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonizationEvent {
    /// The harmonized card.
    pub card: CardId,

    /// Its dragon type at queue time (used for priority ordering and
    /// staleness checks).
    pub dragon: DragonType,

    /// The side whose flow the card sits on; this player decides
    /// accept/skip.
    pub owner: PlayerId,

    /// The column the card occupied when the trigger fired.
    pub column: u8,

    /// Set only by the Reharmonize ore ability; bypasses the
    /// harmonized-this-turn check for this one event.
    pub via_reharmonize: bool,
}

/// FIFO cascade queue plus the single pending slot.
///
/// The pending event blocks every action except accept/skip until its
/// owner decides. Queued events pop into the pending slot one at a
/// time; events whose card has moved away since queue time are stale
/// and dropped on pop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeState {
    /// Triggers waiting behind the pending slot, in resolution order.
    pub queue: VecDeque<HarmonizationEvent>,

    /// The event awaiting its owner's accept/skip decision.
    pub pending: Option<HarmonizationEvent>,
}

impl CascadeState {
    /// Empty cascade state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is queued or pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.pending.is_none()
    }

    /// Whether an event for this card is already queued or pending.
    #[must_use]
    pub fn contains_card(&self, card: CardId) -> bool {
        self.pending.iter().any(|e| e.card == card)
            || self.queue.iter().any(|e| e.card == card)
    }

    /// Drop everything. Used when the game ends mid-cascade and on
    /// turn flip.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(card: u8) -> HarmonizationEvent {
        HarmonizationEvent {
            card: CardId::new(card),
            dragon: DragonType::Fire,
            owner: PlayerId::new(0),
            column: 0,
            via_reharmonize: false,
        }
    }

    #[test]
    fn test_idle_and_contains() {
        let mut cascade = CascadeState::new();
        assert!(cascade.is_idle());
        assert!(!cascade.contains_card(CardId::new(1)));

        cascade.pending = Some(event(1));
        cascade.queue.push_back(event(2));

        assert!(!cascade.is_idle());
        assert!(cascade.contains_card(CardId::new(1)));
        assert!(cascade.contains_card(CardId::new(2)));
        assert!(!cascade.contains_card(CardId::new(3)));
    }

    #[test]
    fn test_clear() {
        let mut cascade = CascadeState::new();
        cascade.pending = Some(event(1));
        cascade.queue.push_back(event(2));

        cascade.clear();
        assert!(cascade.is_idle());
    }

    #[test]
    fn test_serialization() {
        let mut cascade = CascadeState::new();
        cascade.queue.push_back(event(5));

        let json = serde_json::to_string(&cascade).unwrap();
        let deserialized: CascadeState = serde_json::from_str(&json).unwrap();
        assert_eq!(cascade, deserialized);
    }
}
