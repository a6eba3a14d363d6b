//! Action engine: action types, budget accounting, typed rejections,
//! and the dispatcher that validates and applies player actions.

mod action;
mod apply;
mod budget;
mod error;
pub(crate) mod lifecycle;

pub use action::{Action, HarmonizationTarget, OreAbility, SearchPlacement, SwapRef};
pub use apply::apply;
pub use budget::{ActionBudget, ActionCategory, ACTIONS_PER_TURN, CATEGORY_CAP};
pub use error::RuleError;
