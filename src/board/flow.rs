//! Flows: the two parallel five-slot rows cards are played on.
//!
//! Pure data with structural queries only; all rule logic lives in the
//! `engine` and `cascade` modules.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardId, DragonType};

/// Number of positions in a flow.
pub const FLOW_SIZE: usize = 5;

/// One slot of a flow: an optional occupying card plus an optional
/// block token.
///
/// A position is never simultaneously occupied and blocked: a block is
/// only ever placed on an empty slot, and placing into a blocked slot
/// is rejected by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPosition {
    /// Column index, 0-4.
    pub column: u8,

    /// Occupying card, if any.
    pub card: Option<Card>,

    /// Id of the Earth card sourcing a block on this slot, if any.
    pub blocked_by: Option<CardId>,
}

impl FlowPosition {
    /// Create an empty, unblocked position.
    #[must_use]
    pub const fn empty(column: u8) -> Self {
        Self {
            column,
            card: None,
            blocked_by: None,
        }
    }

    /// Whether a card occupies this position.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.card.is_some()
    }

    /// Whether this position carries a block token.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }

    /// Whether a card may be placed here (empty and unblocked).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.card.is_none() && self.blocked_by.is_none()
    }
}

/// A player's row of exactly five ordered positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    positions: [FlowPosition; FLOW_SIZE],
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    /// Create an empty flow.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: std::array::from_fn(|i| FlowPosition::empty(i as u8)),
        }
    }

    /// Get a position by column, `None` if out of range.
    #[must_use]
    pub fn position(&self, column: usize) -> Option<&FlowPosition> {
        self.positions.get(column)
    }

    /// Get the card at a column, `None` if empty or out of range.
    #[must_use]
    pub fn card_at(&self, column: usize) -> Option<&Card> {
        self.positions.get(column).and_then(|p| p.card.as_ref())
    }

    /// Place a card at a column. The caller has already validated that
    /// the position is open.
    pub fn place(&mut self, column: usize, card: Card) {
        debug_assert!(self.positions[column].is_open());
        self.positions[column].card = Some(card);
    }

    /// Remove and return the card at a column.
    pub fn take_card(&mut self, column: usize) -> Option<Card> {
        self.positions.get_mut(column).and_then(|p| p.card.take())
    }

    /// Iterate over (column, card) for occupied positions.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.card.as_ref().map(|c| (i, c)))
    }

    /// Number of occupied positions.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_occupied()).count()
    }

    /// Whether this flow holds at least one card of every dragon type.
    /// This is the win condition.
    #[must_use]
    pub fn has_all_types(&self) -> bool {
        let mut seen = [false; DragonType::COUNT];
        for (_, card) in self.occupied() {
            let idx = DragonType::ALL
                .iter()
                .position(|t| *t == card.dragon)
                .unwrap_or(0);
            seen[idx] = true;
        }
        seen.iter().all(|&s| s)
    }

    /// Place a block token sourced by the given Earth card.
    pub fn block(&mut self, column: usize, source: CardId) {
        debug_assert!(self.positions[column].is_open());
        self.positions[column].blocked_by = Some(source);
    }

    /// Clear every block sourced by a card id that fails the given
    /// validity predicate. Used by the block-validation sweep.
    pub fn retain_blocks(&mut self, valid: impl Fn(CardId) -> bool) {
        for pos in &mut self.positions {
            if let Some(source) = pos.blocked_by {
                if !valid(source) {
                    pos.blocked_by = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardId, DragonType};

    fn card(id: u8, dragon: DragonType) -> Card {
        Card::new(CardId::new(id), dragon)
    }

    #[test]
    fn test_new_flow_is_open() {
        let flow = Flow::new();
        for col in 0..FLOW_SIZE {
            assert!(flow.position(col).unwrap().is_open());
        }
        assert!(flow.position(FLOW_SIZE).is_none());
    }

    #[test]
    fn test_place_and_take() {
        let mut flow = Flow::new();
        flow.place(2, card(1, DragonType::Fire));

        assert!(flow.position(2).unwrap().is_occupied());
        assert_eq!(flow.card_at(2).unwrap().id, CardId::new(1));
        assert_eq!(flow.occupied_count(), 1);

        let taken = flow.take_card(2).unwrap();
        assert_eq!(taken.id, CardId::new(1));
        assert!(flow.position(2).unwrap().is_open());
    }

    #[test]
    fn test_blocked_position_is_not_open() {
        let mut flow = Flow::new();
        flow.block(3, CardId::new(9));

        assert!(flow.position(3).unwrap().is_blocked());
        assert!(!flow.position(3).unwrap().is_open());
        assert!(!flow.position(3).unwrap().is_occupied());
    }

    #[test]
    fn test_retain_blocks() {
        let mut flow = Flow::new();
        flow.block(0, CardId::new(1));
        flow.block(4, CardId::new(2));

        flow.retain_blocks(|source| source == CardId::new(2));

        assert!(!flow.position(0).unwrap().is_blocked());
        assert!(flow.position(4).unwrap().is_blocked());
    }

    #[test]
    fn test_has_all_types() {
        let mut flow = Flow::new();
        flow.place(0, card(0, DragonType::Fire));
        flow.place(1, card(1, DragonType::Water));
        flow.place(2, card(2, DragonType::Earth));
        flow.place(3, card(3, DragonType::Wood));
        assert!(!flow.has_all_types());

        flow.place(4, card(4, DragonType::Metal));
        assert!(flow.has_all_types());
    }

    #[test]
    fn test_duplicate_types_do_not_win() {
        let mut flow = Flow::new();
        for col in 0..FLOW_SIZE {
            flow.place(col, card(col as u8, DragonType::Fire));
        }
        assert!(!flow.has_all_types());
    }
}
