//! The action engine: validates and applies player actions.
//!
//! Every operation is a pure function over the whole state: `apply`
//! clones the input, validates the action against the clone, mutates
//! it, and returns it. On rejection the caller's state is untouched
//! and no partially mutated value escapes.

use tracing::debug;

use super::action::{Action, OreAbility, SearchPlacement};
use super::budget::ActionCategory;
use super::error::RuleError;
use super::lifecycle::{check_win, end_of_turn, finish_turn_if_exhausted};
use crate::cascade::{
    advance_pending, after_flow_mutation, qualifier_holds, resolve_accept, sweep_blocks,
    HarmonizationEvent,
};
use crate::core::{CardId, GamePhase, GameState, PlayerId};
use crate::rules::defeats;

/// Apply a player action, producing the next state or a typed
/// rejection.
///
/// The engine is synchronous and non-reentrant: one action fully
/// resolves, including all cascade bookkeeping, before the next is
/// accepted. While a harmonization event is pending, only its owner's
/// accept/skip is legal.
pub fn apply(state: &GameState, actor: PlayerId, action: &Action) -> Result<GameState, RuleError> {
    let mut next = state.clone();

    match next.phase {
        GamePhase::GameOver => return Err(RuleError::WrongPhase),
        GamePhase::ChooseStarter { chooser } => {
            let Action::ChooseStarter { first } = action else {
                return Err(RuleError::WrongPhase);
            };
            if actor != chooser {
                return Err(RuleError::NotYourTurn(actor));
            }
            if first.index() > 1 {
                return Err(RuleError::IllegalTarget("unknown player as starter"));
            }
            next.phase = GamePhase::Playing;
            next.turn = *first;
            next.budget = super::ActionBudget::new();
            debug!(%actor, first = %next.turn, "starter chosen");
            return Ok(next);
        }
        GamePhase::Playing => {}
    }

    // A pending harmonization blocks everything except its owner's
    // accept/skip decision.
    if let Some(pending) = next.cascade.pending {
        match action {
            Action::AcceptHarmonization { target } => {
                if actor != pending.owner {
                    return Err(RuleError::NotYourTurn(actor));
                }
                resolve_accept(&mut next, target)?;
            }
            Action::SkipHarmonization => {
                if actor != pending.owner {
                    return Err(RuleError::NotYourTurn(actor));
                }
                debug!(card = %pending.card, "harmonization skipped");
                next.cascade.pending = None;
                advance_pending(&mut next);
            }
            _ => return Err(RuleError::HarmonizationPending),
        }
        finish_turn_if_exhausted(&mut next);
        return Ok(next);
    }

    match action {
        Action::ChooseStarter { .. } => return Err(RuleError::WrongPhase),
        Action::AcceptHarmonization { .. } | Action::SkipHarmonization => {
            return Err(RuleError::NoPendingHarmonization)
        }
        _ => {}
    }
    if actor != next.turn {
        return Err(RuleError::NotYourTurn(actor));
    }

    match action {
        Action::Summon { card, column } => summon(&mut next, actor, *card, *column)?,
        Action::Attack { column } => attack(&mut next, actor, *column)?,
        Action::Draw => draw(&mut next, actor)?,
        Action::GainOre => gain_ore(&mut next, actor)?,
        Action::SpendOre(ability) => spend_ore(&mut next, actor, ability)?,
        Action::EndTurn => end_of_turn(&mut next),
        Action::ChooseStarter { .. }
        | Action::AcceptHarmonization { .. }
        | Action::SkipHarmonization => unreachable!("rejected above"),
    }

    finish_turn_if_exhausted(&mut next);
    Ok(next)
}

fn ensure_budget(state: &GameState, category: ActionCategory) -> Result<(), RuleError> {
    if state.budget.can_spend(category) {
        Ok(())
    } else {
        Err(RuleError::BudgetExhausted { category })
    }
}

fn summon(state: &mut GameState, actor: PlayerId, card: CardId, column: u8) -> Result<(), RuleError> {
    ensure_budget(state, ActionCategory::Summon)?;
    let col = column as usize;
    let Some(pos) = state.flows[actor].position(col) else {
        return Err(RuleError::IllegalTarget("column out of range"));
    };
    if !pos.is_open() {
        return Err(RuleError::IllegalTarget("position occupied or blocked"));
    }
    let Some(idx) = state.hand_index(actor, card) else {
        return Err(RuleError::IllegalTarget("card not in hand"));
    };

    let mut placed = state.hands[actor].remove(idx);
    placed.owner = Some(actor);
    state.flows[actor].place(col, placed);
    state.budget.spend(ActionCategory::Summon);
    debug!(%actor, card = %placed.id, column, "summon");
    after_flow_mutation(state, actor, actor, &[column]);
    Ok(())
}

fn attack(state: &mut GameState, actor: PlayerId, column: u8) -> Result<(), RuleError> {
    ensure_budget(state, ActionCategory::Attack)?;
    resolve_combat(state, actor, column, column)?;
    state.budget.spend(ActionCategory::Attack);
    Ok(())
}

/// Shared combat resolution for Attack (same column) and the Conflict
/// ore ability (arbitrary columns). Validates against the combat
/// wheel, then moves the defender to the discard pile. Any
/// presentation delay is the renderer's concern; the state transition
/// is immediate.
fn resolve_combat(
    state: &mut GameState,
    actor: PlayerId,
    from: u8,
    to: u8,
) -> Result<(), RuleError> {
    let Some(attacker) = state.flows[actor].card_at(from as usize).copied() else {
        return Err(RuleError::IllegalTarget("no attacking card at column"));
    };
    let enemy = actor.opponent();
    let Some(defender) = state.flows[enemy].card_at(to as usize).copied() else {
        return Err(RuleError::IllegalTarget("no enemy card at column"));
    };
    if defeats(attacker.dragon) != defender.dragon {
        return Err(RuleError::IllegalTarget("attacker does not defeat that type"));
    }

    if let Some(card) = state.flows[enemy].take_card(to as usize) {
        state.discard_card(card);
    }
    debug!(%actor, attacker = %attacker.id, defender = %defender.id, "combat resolved");
    sweep_blocks(state);
    check_win(state, actor);
    Ok(())
}

fn draw(state: &mut GameState, actor: PlayerId) -> Result<(), RuleError> {
    ensure_budget(state, ActionCategory::Draw)?;
    // Budget is consumed only when a card is actually drawn; a draw
    // against empty deck and discard is a no-op.
    match state.draw_into_hand(actor) {
        Some(card) => {
            state.budget.spend(ActionCategory::Draw);
            debug!(%actor, card = %card, "draw");
        }
        None => debug!(%actor, "draw against empty piles, no-op"),
    }
    Ok(())
}

fn gain_ore(state: &mut GameState, actor: PlayerId) -> Result<(), RuleError> {
    ensure_budget(state, ActionCategory::GainOre)?;
    state.ore[actor] += 1;
    state.budget.spend(ActionCategory::GainOre);
    debug!(%actor, ore = state.ore[actor], "gain ore");
    Ok(())
}

fn spend_ore(state: &mut GameState, actor: PlayerId, ability: &OreAbility) -> Result<(), RuleError> {
    ensure_budget(state, ActionCategory::SpendOre)?;
    let cost = ability.ore_cost();
    let have = state.ore[actor];
    if have < cost {
        return Err(RuleError::InsufficientOre { needed: cost, have });
    }

    match ability {
        OreAbility::Move { from, to } => {
            let (from_col, to_col) = (*from as usize, *to as usize);
            if from == to {
                return Err(RuleError::IllegalTarget("move endpoints must differ"));
            }
            if state.flows[actor].card_at(from_col).is_none() {
                return Err(RuleError::IllegalTarget("no card at source column"));
            }
            let Some(pos) = state.flows[actor].position(to_col) else {
                return Err(RuleError::IllegalTarget("column out of range"));
            };
            if !pos.is_open() {
                return Err(RuleError::IllegalTarget("position occupied or blocked"));
            }

            if let Some(card) = state.flows[actor].take_card(from_col) {
                state.flows[actor].place(to_col, card);
            }
            pay(state, actor, cost);
            debug!(%actor, from, to, "move");
            after_flow_mutation(state, actor, actor, &[*to]);
        }
        OreAbility::Return { column } => {
            let col = *column as usize;
            let Some(mut card) = state.flows[actor].take_card(col) else {
                return Err(RuleError::IllegalTarget("no card at column"));
            };
            card.owner = None;
            state.hands[actor].push_back(card);
            pay(state, actor, cost);
            debug!(%actor, card = %card.id, column, "return to hand");
            sweep_blocks(state);
            check_win(state, actor);
        }
        OreAbility::Conflict { from, to } => {
            resolve_combat(state, actor, *from, *to)?;
            pay(state, actor, cost);
        }
        OreAbility::Reharmonize { column } => {
            let col = *column as usize;
            let flow = &state.flows[actor];
            let Some(card) = flow.card_at(col).copied() else {
                return Err(RuleError::IllegalTarget("no card at column"));
            };
            if !state.harmonized_this_turn.contains(&card.id) {
                return Err(RuleError::IllegalTarget("card has not harmonized this turn"));
            }
            if !qualifier_holds(flow, col) {
                return Err(RuleError::IllegalTarget("card is not harmonized in place"));
            }
            if state.cascade.contains_card(card.id) {
                return Err(RuleError::IllegalTarget("card already awaits harmonization"));
            }

            pay(state, actor, cost);
            debug!(%actor, card = %card.id, column, "reharmonize");
            state.cascade.queue.push_back(HarmonizationEvent {
                card: card.id,
                dragon: card.dragon,
                owner: actor,
                column: *column,
                via_reharmonize: true,
            });
            advance_pending(state);
        }
        OreAbility::Search { dragon, place } => {
            if let SearchPlacement::Flow { column } = place {
                let Some(pos) = state.flows[actor].position(*column as usize) else {
                    return Err(RuleError::IllegalTarget("column out of range"));
                };
                if !pos.is_open() {
                    return Err(RuleError::IllegalTarget("position occupied or blocked"));
                }
            }

            match state.deck.iter().position(|c| c.dragon == *dragon) {
                None => {
                    // Search miss: the reshuffle persists but the
                    // action is void, so no budget and no ore.
                    state.reshuffle_discard_into_deck();
                    debug!(%actor, dragon = %dragon, "search miss, deck reshuffled");
                    return Ok(());
                }
                Some(idx) => {
                    // Cards examined before the hit are discarded.
                    for _ in 0..idx {
                        if let Some(card) = state.deck.pop_front() {
                            state.discard_card(card);
                        }
                    }
                    let Some(mut card) = state.deck.pop_front() else {
                        return Err(RuleError::IllegalTarget("deck exhausted during search"));
                    };
                    pay(state, actor, cost);
                    debug!(%actor, card = %card.id, dragon = %dragon, "search hit");
                    match place {
                        SearchPlacement::Hand => {
                            state.hands[actor].push_back(card);
                        }
                        SearchPlacement::Flow { column } => {
                            card.owner = Some(actor);
                            state.flows[actor].place(*column as usize, card);
                            after_flow_mutation(state, actor, actor, &[*column]);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn pay(state: &mut GameState, actor: PlayerId, cost: u32) {
    state.ore[actor] -= cost;
    state.budget.spend(ActionCategory::SpendOre);
}
