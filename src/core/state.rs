//! The composed game state.
//!
//! `GameState` is a flat, serializable value: two flows, two hands,
//! deck, discard pile, ore counters, action budget, cascade queue,
//! harmonized-this-turn set, phase, turn owner, winner, and the RNG.
//! Persistent `im` collections keep cloning cheap, and every engine
//! operation works on a clone of the previous value, so the engine is
//! a pure function from state to state.
//!
//! Card conservation: the 30 card identities are partitioned across
//! deck + both hands + both flows + discard at all times.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, DragonType};
use super::player::{PerPlayer, PlayerId};
use super::rng::GameRng;
use crate::board::Flow;
use crate::cascade::CascadeState;
use crate::engine::ActionBudget;

/// Cards in the deck at build time.
pub const DECK_SIZE: usize = 30;

/// Copies of each dragon type in the deck.
pub const COPIES_PER_TYPE: usize = 6;

/// Hand cap, enforced at end of turn only.
pub const HAND_LIMIT: usize = 5;

/// The phase machine: choose-starter, playing, game over (terminal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the randomly designated chooser to pick who moves
    /// first.
    ChooseStarter { chooser: PlayerId },
    /// Normal play.
    Playing,
    /// Terminal; `winner` is set.
    GameOver,
}

/// Complete, authoritative game state.
///
/// All fields are public: the board model is pure data, and fixtures
/// in tests build states directly. Mutation goes through
/// [`apply`](crate::engine::apply), which clones first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase.
    pub phase: GamePhase,

    /// Turn owner. Meaningless until the starter is chosen.
    pub turn: PlayerId,

    /// Winning side once the phase is `GameOver`.
    pub winner: Option<PlayerId>,

    /// The two five-slot rows.
    pub flows: PerPlayer<Flow>,

    /// The two hands.
    pub hands: PerPlayer<Vector<Card>>,

    /// Face-down deck; the top is the front.
    pub deck: Vector<Card>,

    /// Destroyed and drawn-through cards.
    pub discard: Vector<Card>,

    /// Per-player ore, non-negative by construction.
    pub ore: PerPlayer<u32>,

    /// The acting player's per-turn budget.
    pub budget: ActionBudget,

    /// Cards that already resolved a harmonization this turn.
    pub harmonized_this_turn: ImHashSet<CardId>,

    /// Cascade queue and pending slot.
    pub cascade: CascadeState,

    /// Deterministic RNG (shuffles, starter-choice coin flip).
    pub rng: GameRng,
}

impl GameState {
    /// Create a fresh game in the choose-starter phase.
    ///
    /// Builds and shuffles the 30-card deck and randomly designates
    /// the chooser.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let deck = Self::build_deck(&mut rng);
        let chooser = PlayerId::new(rng.gen_range_usize(0..2) as u8);

        Self {
            phase: GamePhase::ChooseStarter { chooser },
            turn: chooser,
            winner: None,
            flows: PerPlayer::with_default(),
            hands: PerPlayer::with_default(),
            deck,
            discard: Vector::new(),
            ore: PerPlayer::with_value(0),
            budget: ActionBudget::new(),
            harmonized_this_turn: ImHashSet::new(),
            cascade: CascadeState::new(),
            rng,
        }
    }

    /// Build and shuffle the 30-card deck (6 of each type).
    fn build_deck(rng: &mut GameRng) -> Vector<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        let mut next_id = 0u8;
        for dragon in DragonType::ALL {
            for _ in 0..COPIES_PER_TYPE {
                cards.push(Card::new(CardId::new(next_id), dragon));
                next_id += 1;
            }
        }
        rng.shuffle(&mut cards);
        cards.into_iter().collect()
    }

    // === Structural queries ===

    /// A player's flow.
    #[must_use]
    pub fn flow(&self, player: PlayerId) -> &Flow {
        &self.flows[player]
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    /// Position of a card in a player's hand.
    #[must_use]
    pub fn hand_index(&self, player: PlayerId, card: CardId) -> Option<usize> {
        self.hands[player].iter().position(|c| c.id == card)
    }

    /// Total card identities across all zones. Always 30 for states
    /// produced by the engine.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let on_flows: usize = PlayerId::both()
            .iter()
            .map(|&p| self.flows[p].occupied_count())
            .sum();
        let in_hands: usize = PlayerId::both()
            .iter()
            .map(|&p| self.hands[p].len())
            .sum();
        self.deck.len() + self.discard.len() + on_flows + in_hands
    }

    // === Deck operations ===

    /// Draw the top deck card into a player's hand, reshuffling the
    /// discard pile into the deck first if the deck is empty.
    ///
    /// Returns the drawn card's id, or `None` if both piles are empty.
    pub fn draw_into_hand(&mut self, player: PlayerId) -> Option<CardId> {
        if self.deck.is_empty() {
            self.reshuffle_discard_into_deck();
        }
        let card = self.deck.pop_front()?;
        let id = card.id;
        self.hands[player].push_back(card);
        Some(id)
    }

    /// Shuffle the discard pile into the deck (deck cards keep playing
    /// along; the combined pile is shuffled as a whole).
    pub fn reshuffle_discard_into_deck(&mut self) {
        if self.discard.is_empty() {
            return;
        }
        let mut cards: Vec<Card> = self.deck.iter().copied().collect();
        for card in self.discard.iter() {
            let mut card = *card;
            card.owner = None;
            cards.push(card);
        }
        self.discard.clear();
        self.rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }

    /// Move a card to the discard pile, clearing its owner.
    pub fn discard_card(&mut self, mut card: Card) {
        card.owner = None;
        self.discard.push_back(card);
    }
}
