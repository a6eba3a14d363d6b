//! Per-turn action budget accounting.
//!
//! Every turn a player gets a global pool of 3 actions, and each of the
//! five action categories may be used at most twice. Both limits are
//! checked before an action executes; the global counter decrements on
//! every executed action regardless of category.

use serde::{Deserialize, Serialize};

/// Maximum uses of a single category per turn.
pub const CATEGORY_CAP: u8 = 2;

/// Global actions per turn.
pub const ACTIONS_PER_TURN: u8 = 3;

/// The five budgeted action categories.
///
/// `EndTurn`, `ChooseStarter`, and harmonization accept/skip are not
/// budgeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Summon,
    Attack,
    Draw,
    GainOre,
    SpendOre,
}

impl ActionCategory {
    const fn index(self) -> usize {
        match self {
            ActionCategory::Summon => 0,
            ActionCategory::Attack => 1,
            ActionCategory::Draw => 2,
            ActionCategory::GainOre => 3,
            ActionCategory::SpendOre => 4,
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionCategory::Summon => "summon",
            ActionCategory::Attack => "attack",
            ActionCategory::Draw => "draw",
            ActionCategory::GainOre => "gain-ore",
            ActionCategory::SpendOre => "spend-ore",
        };
        write!(f, "{name}")
    }
}

/// Per-turn budget: category use counters plus the global pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBudget {
    used: [u8; 5],
    actions_remaining: u8,
}

impl Default for ActionBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionBudget {
    /// Fresh budget for the start of a turn.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            used: [0; 5],
            actions_remaining: ACTIONS_PER_TURN,
        }
    }

    /// Whether an action of the given category may still execute.
    #[must_use]
    pub fn can_spend(&self, category: ActionCategory) -> bool {
        self.actions_remaining > 0 && self.used[category.index()] < CATEGORY_CAP
    }

    /// Record an executed action. Callers check `can_spend` first.
    pub fn spend(&mut self, category: ActionCategory) {
        debug_assert!(self.can_spend(category));
        self.used[category.index()] += 1;
        self.actions_remaining -= 1;
    }

    /// Global actions left this turn.
    #[must_use]
    pub fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    /// Uses of a category so far this turn.
    #[must_use]
    pub fn category_used(&self, category: ActionCategory) -> u8 {
        self.used[category.index()]
    }

    /// Whether the global pool is empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.actions_remaining == 0
    }
}
