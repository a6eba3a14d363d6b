//! Action engine integration tests: budgets, combat, ore abilities,
//! and the turn lifecycle.

use dragonflow::{
    apply, Action, ActionCategory, Card, CardId, DragonType, GamePhase, GameState,
    HarmonizationTarget, OreAbility, PlayerId, RuleError, SearchPlacement, ACTIONS_PER_TURN,
    DECK_SIZE,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

/// A state in the playing phase with `turn` to act.
fn playing_state(seed: u64, turn: PlayerId) -> GameState {
    let mut state = GameState::new(seed);
    state.phase = GamePhase::Playing;
    state.turn = turn;
    state
}

/// Pull the first deck card of a type out of the deck.
fn take_from_deck(state: &mut GameState, dragon: DragonType) -> Card {
    let idx = state
        .deck
        .iter()
        .position(|c| c.dragon == dragon)
        .expect("deck holds six of each type");
    state.deck.remove(idx)
}

/// Move a deck card of the given type into a player's hand.
fn to_hand(state: &mut GameState, player: PlayerId, dragon: DragonType) -> CardId {
    let card = take_from_deck(state, dragon);
    let id = card.id;
    state.hands[player].push_back(card);
    id
}

/// Place a deck card of the given type directly onto a flow.
fn place(state: &mut GameState, player: PlayerId, column: usize, dragon: DragonType) -> CardId {
    let mut card = take_from_deck(state, dragon);
    card.owner = Some(player);
    let id = card.id;
    state.flows[player].place(column, card);
    id
}

#[test]
fn test_choose_starter_flow() {
    let state = GameState::new(42);
    let GamePhase::ChooseStarter { chooser } = state.phase else {
        panic!("new game must await starter choice");
    };

    // Only the chooser may pick.
    let err = apply(
        &state,
        chooser.opponent(),
        &Action::ChooseStarter { first: P0 },
    )
    .unwrap_err();
    assert_eq!(err, RuleError::NotYourTurn(chooser.opponent()));

    // Nothing else is legal before the choice.
    let err = apply(&state, chooser, &Action::Draw).unwrap_err();
    assert_eq!(err, RuleError::WrongPhase);

    let next = apply(&state, chooser, &Action::ChooseStarter { first: P1 }).unwrap();
    assert_eq!(next.phase, GamePhase::Playing);
    assert_eq!(next.turn, P1);
    assert_eq!(next.budget.actions_remaining(), ACTIONS_PER_TURN);
}

#[test]
fn test_sample_scenario_wood_then_metal() {
    let mut state = playing_state(42, P0);
    let wood = to_hand(&mut state, P0, DragonType::Wood);

    // Summon the wood card at column 2: no neighbor, no harmonization.
    let state = apply(
        &state,
        P0,
        &Action::Summon {
            card: wood,
            column: 2,
        },
    )
    .unwrap();

    assert_eq!(state.budget.category_used(ActionCategory::Summon), 1);
    assert_eq!(state.budget.actions_remaining(), 2);
    assert!(state.cascade.is_idle());
    assert_eq!(state.flows[P0].card_at(2).unwrap().id, wood);
    assert_eq!(state.flows[P0].card_at(2).unwrap().owner, Some(P0));

    // Metal at column 1 harmonizes the wood at column 2.
    let mut state = state;
    let metal = to_hand(&mut state, P0, DragonType::Metal);
    let state = apply(
        &state,
        P0,
        &Action::Summon {
            card: metal,
            column: 1,
        },
    )
    .unwrap();

    let pending = state.cascade.pending.expect("wood harmonization pending");
    assert_eq!(pending.card, wood);
    assert_eq!(pending.dragon, DragonType::Wood);
    assert_eq!(pending.owner, P0);
    assert_eq!(pending.column, 2);
    assert!(state.cascade.queue.is_empty());
}

#[test]
fn test_summon_rejections() {
    let mut state = playing_state(42, P0);
    let wood = to_hand(&mut state, P0, DragonType::Wood);
    place(&mut state, P0, 3, DragonType::Fire);

    // Occupied column.
    let err = apply(
        &state,
        P0,
        &Action::Summon {
            card: wood,
            column: 3,
        },
    )
    .unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("position occupied or blocked"));

    // Out of range.
    let err = apply(
        &state,
        P0,
        &Action::Summon {
            card: wood,
            column: 5,
        },
    )
    .unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("column out of range"));

    // Card not in hand.
    let err = apply(
        &state,
        P0,
        &Action::Summon {
            card: CardId::new(200),
            column: 0,
        },
    )
    .unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("card not in hand"));

    // Blocked column.
    state.flows[P0].block(0, CardId::new(99));
    let err = apply(
        &state,
        P0,
        &Action::Summon {
            card: wood,
            column: 0,
        },
    )
    .unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("position occupied or blocked"));
}

#[test]
fn test_attack_combat_legality() {
    let mut state = playing_state(42, P0);
    place(&mut state, P0, 2, DragonType::Water);
    let fire = place(&mut state, P1, 2, DragonType::Fire);
    place(&mut state, P0, 3, DragonType::Water);
    place(&mut state, P1, 3, DragonType::Earth);

    // Water defeats fire.
    let next = apply(&state, P0, &Action::Attack { column: 2 }).unwrap();
    assert!(next.flows[P1].card_at(2).is_none());
    assert!(next.discard.iter().any(|c| c.id == fire));
    assert!(next.discard.iter().all(|c| c.owner.is_none()));
    assert_eq!(next.budget.category_used(ActionCategory::Attack), 1);

    // Water does not defeat earth; both cards untouched.
    let err = apply(&state, P0, &Action::Attack { column: 3 }).unwrap_err();
    assert_eq!(
        err,
        RuleError::IllegalTarget("attacker does not defeat that type")
    );
    assert!(state.flows[P0].card_at(3).is_some());
    assert!(state.flows[P1].card_at(3).is_some());
}

#[test]
fn test_attack_requires_both_cards() {
    let mut state = playing_state(42, P0);
    place(&mut state, P0, 0, DragonType::Water);

    let err = apply(&state, P0, &Action::Attack { column: 0 }).unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("no enemy card at column"));

    let err = apply(&state, P0, &Action::Attack { column: 1 }).unwrap_err();
    assert_eq!(err, RuleError::IllegalTarget("no attacking card at column"));
}

#[test]
fn test_draw_consumes_budget_only_on_success() {
    let state = playing_state(42, P0);

    let next = apply(&state, P0, &Action::Draw).unwrap();
    assert_eq!(next.hand(P0).len(), 1);
    assert_eq!(next.budget.category_used(ActionCategory::Draw), 1);
    assert_eq!(next.budget.actions_remaining(), 2);

    // Empty deck and discard: the draw is a no-op without budget.
    let mut empty = playing_state(42, P0);
    empty.deck.clear();
    let next = apply(&empty, P0, &Action::Draw).unwrap();
    assert_eq!(next.hand(P0).len(), 0);
    assert_eq!(next.budget.category_used(ActionCategory::Draw), 0);
    assert_eq!(next.budget.actions_remaining(), ACTIONS_PER_TURN);
    assert_eq!(next.turn, P0);
}

#[test]
fn test_draw_reshuffles_exhausted_deck() {
    let mut state = playing_state(42, P0);
    while let Some(card) = state.deck.pop_front() {
        state.discard_card(card);
    }

    let next = apply(&state, P0, &Action::Draw).unwrap();
    assert_eq!(next.hand(P0).len(), 1);
    assert!(next.discard.is_empty());
    assert_eq!(next.deck.len(), DECK_SIZE - 1);
}

#[test]
fn test_category_cap() {
    let mut state = playing_state(42, P0);
    let a = to_hand(&mut state, P0, DragonType::Fire);
    let b = to_hand(&mut state, P0, DragonType::Fire);
    let c = to_hand(&mut state, P0, DragonType::Fire);

    let state = apply(&state, P0, &Action::Summon { card: a, column: 0 }).unwrap();
    let state = apply(&state, P0, &Action::Summon { card: b, column: 2 }).unwrap();
    let err = apply(&state, P0, &Action::Summon { card: c, column: 4 }).unwrap_err();

    assert_eq!(
        err,
        RuleError::BudgetExhausted {
            category: ActionCategory::Summon
        }
    );
    // The rejected action left the budget alone.
    assert_eq!(state.budget.actions_remaining(), 1);
}

#[test]
fn test_third_action_ends_turn() {
    let state = playing_state(42, P0);

    let state = apply(&state, P0, &Action::GainOre).unwrap();
    let state = apply(&state, P0, &Action::GainOre).unwrap();
    assert_eq!(state.turn, P0);

    let state = apply(&state, P0, &Action::Draw).unwrap();
    assert_eq!(state.turn, P1);
    assert_eq!(state.budget.actions_remaining(), ACTIONS_PER_TURN);
    assert_eq!(state.ore[P0], 2);
}

#[test]
fn test_end_turn_discards_hand_overflow() {
    let mut state = playing_state(42, P0);
    for _ in 0..7 {
        state.draw_into_hand(P0);
    }
    let kept: Vec<CardId> = state.hand(P0).iter().take(5).map(|c| c.id).collect();

    let next = apply(&state, P0, &Action::EndTurn).unwrap();

    assert_eq!(next.hand(P0).len(), 5);
    let still: Vec<CardId> = next.hand(P0).iter().map(|c| c.id).collect();
    assert_eq!(still, kept);
    assert_eq!(next.discard.len(), 2);
    assert_eq!(next.turn, P1);
}

#[test]
fn test_not_your_turn() {
    let state = playing_state(42, P0);
    let err = apply(&state, P1, &Action::Draw).unwrap_err();
    assert_eq!(err, RuleError::NotYourTurn(P1));
}

#[test]
fn test_game_over_rejects_everything() {
    let mut state = playing_state(42, P0);
    state.phase = GamePhase::GameOver;
    state.winner = Some(P0);

    let err = apply(&state, P0, &Action::Draw).unwrap_err();
    assert_eq!(err, RuleError::WrongPhase);
}

#[test]
fn test_move_ability() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 1;
    let fire = place(&mut state, P0, 0, DragonType::Fire);

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Move { from: 0, to: 3 }),
    )
    .unwrap();

    assert!(next.flows[P0].card_at(0).is_none());
    assert_eq!(next.flows[P0].card_at(3).unwrap().id, fire);
    assert_eq!(next.ore[P0], 0);
    assert_eq!(next.budget.category_used(ActionCategory::SpendOre), 1);
}

#[test]
fn test_move_rechecks_harmonization_at_destination() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 1;
    place(&mut state, P0, 1, DragonType::Water);
    let fire = place(&mut state, P0, 4, DragonType::Fire);

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Move { from: 4, to: 2 }),
    )
    .unwrap();

    let pending = next.cascade.pending.expect("fire harmonized after move");
    assert_eq!(pending.card, fire);
}

#[test]
fn test_insufficient_ore() {
    let mut state = playing_state(42, P0);
    place(&mut state, P0, 0, DragonType::Fire);
    state.ore[P0] = 1;

    let err = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Conflict { from: 0, to: 0 }),
    )
    .unwrap_err();
    assert_eq!(err, RuleError::InsufficientOre { needed: 2, have: 1 });
}

#[test]
fn test_return_ability() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 1;
    let fire = place(&mut state, P0, 2, DragonType::Fire);

    let next = apply(&state, P0, &Action::SpendOre(OreAbility::Return { column: 2 })).unwrap();

    assert!(next.flows[P0].card_at(2).is_none());
    let back = next.hand(P0).last().unwrap();
    assert_eq!(back.id, fire);
    assert!(back.owner.is_none());
}

#[test]
fn test_conflict_attacks_across_columns() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 2;
    place(&mut state, P0, 0, DragonType::Water);
    let fire = place(&mut state, P1, 4, DragonType::Fire);

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Conflict { from: 0, to: 4 }),
    )
    .unwrap();

    assert!(next.flows[P1].card_at(4).is_none());
    assert!(next.discard.iter().any(|c| c.id == fire));
    assert_eq!(next.ore[P0], 0);
}

#[test]
fn test_search_hit_to_hand() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 4;
    let examined = state
        .deck
        .iter()
        .position(|c| c.dragon == DragonType::Metal)
        .unwrap();

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Search {
            dragon: DragonType::Metal,
            place: SearchPlacement::Hand,
        }),
    )
    .unwrap();

    let found = next.hand(P0).last().unwrap();
    assert_eq!(found.dragon, DragonType::Metal);
    // Everything examined before the hit went to the discard pile.
    assert_eq!(next.discard.len(), examined);
    assert_eq!(next.card_count(), DECK_SIZE);
    assert_eq!(next.ore[P0], 0);
    assert_eq!(next.budget.category_used(ActionCategory::SpendOre), 1);
}

#[test]
fn test_search_hit_to_flow_triggers_harmonization() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 4;
    place(&mut state, P0, 1, DragonType::Water);

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Search {
            dragon: DragonType::Fire,
            place: SearchPlacement::Flow { column: 2 },
        }),
    )
    .unwrap();

    let placed = next.flows[P0].card_at(2).unwrap();
    assert_eq!(placed.dragon, DragonType::Fire);
    assert_eq!(placed.owner, Some(P0));
    let pending = next.cascade.pending.expect("fire harmonized by water");
    assert_eq!(pending.card, placed.id);
}

#[test]
fn test_search_miss_is_void() {
    let mut state = playing_state(42, P0);
    state.ore[P0] = 4;
    // Exile every water card to the discard pile: the deck has none.
    while let Some(idx) = state.deck.iter().position(|c| c.dragon == DragonType::Water) {
        let card = state.deck.remove(idx);
        state.discard_card(card);
    }
    place(&mut state, P0, 0, DragonType::Fire);
    let card = state.flows[P0].take_card(0).unwrap();
    state.discard_card(card);

    let next = apply(
        &state,
        P0,
        &Action::SpendOre(OreAbility::Search {
            dragon: DragonType::Water,
            place: SearchPlacement::Hand,
        }),
    )
    .unwrap();

    // Void: no ore, no budget, but the reshuffle persists.
    assert_eq!(next.ore[P0], 4);
    assert_eq!(next.budget.category_used(ActionCategory::SpendOre), 0);
    assert_eq!(next.budget.actions_remaining(), ACTIONS_PER_TURN);
    assert!(next.discard.is_empty());
    assert_eq!(next.card_count(), DECK_SIZE);
}

#[test]
fn test_rejected_action_leaves_state_unchanged() {
    let mut state = playing_state(42, P0);
    place(&mut state, P0, 3, DragonType::Water);
    place(&mut state, P1, 3, DragonType::Earth);

    let before = state.clone();
    let err = apply(&state, P0, &Action::Attack { column: 3 }).unwrap_err();
    assert!(matches!(err, RuleError::IllegalTarget(_)));
    assert_eq!(state, before);
}
