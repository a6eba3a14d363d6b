//! Win check and turn lifecycle.
//!
//! The win check runs after every mutation, not just at end of turn: a
//! mid-cascade mutation that completes all five types ends the game on
//! the spot, short-circuiting any still-queued harmonizations.

use tracing::debug;

use crate::cascade::sweep_blocks;
use crate::core::{GamePhase, GameState, PlayerId, HAND_LIMIT};
use crate::engine::ActionBudget;

/// Check the win condition, the acting side first. On a win the game
/// transitions to `GameOver` immediately and the cascade is dropped.
pub(crate) fn check_win(state: &mut GameState, acting: PlayerId) {
    if state.phase != GamePhase::Playing {
        return;
    }
    for side in [acting, acting.opponent()] {
        if state.flows[side].has_all_types() {
            debug!(winner = %side, "all five types assembled, game over");
            state.phase = GamePhase::GameOver;
            state.winner = Some(side);
            state.cascade.clear();
            return;
        }
    }
}

/// End-of-turn processing: hand cap, block sweep, win check, then turn
/// flip with a fresh budget and harmonized set.
pub(crate) fn end_of_turn(state: &mut GameState) {
    let player = state.turn;

    // Overflow beyond the hand cap is discarded left to right.
    while state.hands[player].len() > HAND_LIMIT {
        let card = state.hands[player].remove(HAND_LIMIT);
        state.discard_card(card);
    }

    sweep_blocks(state);
    check_win(state, player);
    if state.phase != GamePhase::Playing {
        return;
    }

    state.turn = player.opponent();
    state.budget = ActionBudget::new();
    state.harmonized_this_turn = im::HashSet::new();
    state.cascade.clear();
    debug!(turn = %state.turn, "turn flipped");
}

/// An exhausted action pool forces the turn to end once the cascade is
/// idle.
pub(crate) fn finish_turn_if_exhausted(state: &mut GameState) {
    if state.phase == GamePhase::Playing
        && state.cascade.pending.is_none()
        && state.budget.is_exhausted()
    {
        debug!("action budget exhausted, ending turn");
        end_of_turn(state);
    }
}
