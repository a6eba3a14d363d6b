//! Harmonization cascade resolution.
//!
//! After any card enters, leaves, or swaps position within a flow, the
//! resolver scans the mutated columns for newly satisfied triggers,
//! orders them by the fixed type priority (tie-broken by ascending
//! column), and appends them to the FIFO queue. The head of the queue
//! sits in the single pending slot until its owner accepts or skips.
//! Accepting executes the type-specific ability; abilities that move
//! cards feed new triggers back into the tail of the queue.
//!
//! Termination: each card harmonizes at most once per turn (the
//! harmonized-this-turn set), so per turn the queue is bounded by the
//! number of cards on the board.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::event::HarmonizationEvent;
use crate::board::{Flow, FLOW_SIZE};
use crate::core::{CardId, DragonType, GamePhase, GameState, PlayerId};
use crate::engine::lifecycle::check_win;
use crate::engine::{HarmonizationTarget, RuleError, SwapRef};
use crate::rules::{harmonized_by, priority_rank};

/// Whether the card at `column` is harmonized in place: occupied, and
/// the immediate left neighbor has the type that harmonizes it.
#[must_use]
pub fn qualifier_holds(flow: &Flow, column: usize) -> bool {
    let Some(card) = flow.card_at(column) else {
        return false;
    };
    if column == 0 {
        return false;
    }
    flow.card_at(column - 1)
        .is_some_and(|left| left.dragon == harmonized_by(card.dragon))
}

/// Collect newly satisfied triggers from a mutation of the given
/// columns on one flow and append them, priority-sorted, to the queue.
///
/// For each mutated column the candidates are the column itself (the
/// arriving card) and its right neighbor (whose left-qualifier just
/// changed). Cards already harmonized this turn or already queued or
/// pending are dropped.
pub(crate) fn collect_triggers(state: &mut GameState, side: PlayerId, columns: &[u8]) {
    let mut candidates: SmallVec<[u8; 4]> = SmallVec::new();
    for &c in columns {
        for cand in [c, c.saturating_add(1)] {
            if (cand as usize) < FLOW_SIZE && !candidates.contains(&cand) {
                candidates.push(cand);
            }
        }
    }

    let mut batch: SmallVec<[HarmonizationEvent; 2]> = SmallVec::new();
    for &column in &candidates {
        let flow = &state.flows[side];
        if !qualifier_holds(flow, column as usize) {
            continue;
        }
        let Some(card) = flow.card_at(column as usize) else {
            continue;
        };
        if state.harmonized_this_turn.contains(&card.id) {
            continue;
        }
        if state.cascade.contains_card(card.id) {
            continue;
        }
        batch.push(HarmonizationEvent {
            card: card.id,
            dragon: card.dragon,
            owner: side,
            column,
            via_reharmonize: false,
        });
    }

    batch.sort_by_key(|e| (priority_rank(e.dragon), e.column));
    for event in batch {
        trace!(card = %event.card, dragon = %event.dragon, column = event.column, "trigger queued");
        state.cascade.queue.push_back(event);
    }
}

/// Pop queued events into the pending slot, dropping stale ones.
///
/// An event is stale when its card no longer sits at the recorded
/// column or its qualifier no longer holds (a later mutation moved or
/// destroyed something relevant before the event's turn came up).
pub(crate) fn advance_pending(state: &mut GameState) {
    while state.cascade.pending.is_none() {
        let Some(event) = state.cascade.queue.pop_front() else {
            return;
        };
        if is_stale(state, &event) {
            trace!(card = %event.card, "stale trigger dropped");
            continue;
        }
        state.cascade.pending = Some(event);
    }
}

fn is_stale(state: &GameState, event: &HarmonizationEvent) -> bool {
    let flow = &state.flows[event.owner];
    match flow.card_at(event.column as usize) {
        Some(card) if card.id == event.card => !qualifier_holds(flow, event.column as usize),
        _ => true,
    }
}

/// Block-validation sweep over both flows.
///
/// A block token is valid only while its source Earth card is still
/// harmonized in place somewhere on a flow. Every mutation re-runs
/// this sweep and clears orphaned blocks.
pub(crate) fn sweep_blocks(state: &mut GameState) {
    let mut valid: FxHashSet<CardId> = FxHashSet::default();
    for player in PlayerId::both() {
        let flow = &state.flows[player];
        for (column, card) in flow.occupied() {
            if card.dragon == DragonType::Earth && qualifier_holds(flow, column) {
                valid.insert(card.id);
            }
        }
    }
    for player in PlayerId::both() {
        state.flows[player].retain_blocks(|source| valid.contains(&source));
    }
}

/// Standard post-mutation handling for a card arriving at `columns` on
/// `side`'s flow: block sweep, win check, trigger scan, pop the next
/// pending event.
pub(crate) fn after_flow_mutation(
    state: &mut GameState,
    acting: PlayerId,
    side: PlayerId,
    columns: &[u8],
) {
    sweep_blocks(state);
    check_win(state, acting);
    if state.phase != GamePhase::Playing {
        return;
    }
    collect_triggers(state, side, columns);
    advance_pending(state);
}

/// Execute the pending event's elemental ability and advance the
/// cascade. The caller has already verified that the actor owns the
/// pending event.
pub(crate) fn resolve_accept(
    state: &mut GameState,
    target: &HarmonizationTarget,
) -> Result<(), RuleError> {
    let Some(event) = state.cascade.pending else {
        return Err(RuleError::NoPendingHarmonization);
    };
    if state.harmonized_this_turn.contains(&event.card) && !event.via_reharmonize {
        return Err(RuleError::CascadeInvariantViolation { card: event.card });
    }

    let owner = event.owner;
    match (event.dragon, *target) {
        (DragonType::Wood, HarmonizationTarget::None) => {
            state.draw_into_hand(owner);
        }
        (DragonType::Metal, HarmonizationTarget::None) => {
            state.ore[owner] += 2;
        }
        (DragonType::Fire, HarmonizationTarget::EnemyColumn { column }) => {
            destroy_enemy(state, owner, column)?;
        }
        (DragonType::Earth, HarmonizationTarget::EnemyColumn { column }) => {
            block_enemy(state, owner, event.card, column)?;
        }
        (DragonType::Water, HarmonizationTarget::Swap { a, b }) => {
            swap_cards(state, owner, a, b)?;
        }
        _ => return Err(RuleError::IllegalTarget("target does not match the ability")),
    }

    debug!(card = %event.card, dragon = %event.dragon, %owner, "harmonization resolved");
    state.harmonized_this_turn.insert(event.card);
    state.cascade.pending = None;
    if state.phase == GamePhase::Playing {
        advance_pending(state);
    }
    Ok(())
}

/// Fire ability: destroy an enemy flow card.
fn destroy_enemy(state: &mut GameState, owner: PlayerId, column: u8) -> Result<(), RuleError> {
    let enemy = owner.opponent();
    let col = column as usize;
    if state.flows[enemy].card_at(col).is_none() {
        return Err(RuleError::IllegalTarget("no enemy card at column"));
    }
    if let Some(card) = state.flows[enemy].take_card(col) {
        state.discard_card(card);
    }
    sweep_blocks(state);
    check_win(state, owner);
    Ok(())
}

/// Earth ability: block an empty, unblocked enemy column.
fn block_enemy(
    state: &mut GameState,
    owner: PlayerId,
    source: CardId,
    column: u8,
) -> Result<(), RuleError> {
    let enemy = owner.opponent();
    let col = column as usize;
    let Some(pos) = state.flows[enemy].position(col) else {
        return Err(RuleError::IllegalTarget("column out of range"));
    };
    if !pos.is_open() {
        return Err(RuleError::IllegalTarget("enemy position occupied or blocked"));
    }
    state.flows[enemy].block(col, source);
    Ok(())
}

/// Water ability: swap any two occupied flow positions. A card landing
/// on the other side's flow changes owner with it.
fn swap_cards(
    state: &mut GameState,
    acting: PlayerId,
    a: SwapRef,
    b: SwapRef,
) -> Result<(), RuleError> {
    if a.side.index() > 1 || b.side.index() > 1 {
        return Err(RuleError::IllegalTarget("unknown player in swap"));
    }
    if a == b {
        return Err(RuleError::IllegalTarget("swap endpoints must differ"));
    }
    let (ac, bc) = (a.column as usize, b.column as usize);
    if state.flows[a.side].card_at(ac).is_none() || state.flows[b.side].card_at(bc).is_none() {
        return Err(RuleError::IllegalTarget("both swap positions must be occupied"));
    }

    let taken_a = state.flows[a.side].take_card(ac);
    let taken_b = state.flows[b.side].take_card(bc);
    if let (Some(mut card_a), Some(mut card_b)) = (taken_a, taken_b) {
        card_a.owner = Some(b.side);
        card_b.owner = Some(a.side);
        state.flows[b.side].place(bc, card_a);
        state.flows[a.side].place(ac, card_b);
    }

    sweep_blocks(state);
    check_win(state, acting);
    if state.phase == GamePhase::Playing {
        collect_triggers(state, a.side, &[a.column]);
        collect_triggers(state, b.side, &[b.column]);
    }
    Ok(())
}
