//! Fixed rule tables: the combat wheel, the harmonization cycle, and
//! the harmonization priority order.
//!
//! These are fixed rule data, not tunables. Both tables are total over
//! `DragonType` and the harmonization table is a closed five-cycle, so
//! every type has exactly one harmonizer and harmonizes exactly one
//! other type.

use crate::core::DragonType;

/// The combat wheel: the type an attacker of the given type defeats.
///
/// water > fire > metal > wood > earth > water.
#[must_use]
pub const fn defeats(attacker: DragonType) -> DragonType {
    match attacker {
        DragonType::Water => DragonType::Fire,
        DragonType::Fire => DragonType::Metal,
        DragonType::Metal => DragonType::Wood,
        DragonType::Wood => DragonType::Earth,
        DragonType::Earth => DragonType::Water,
    }
}

/// The harmonization cycle: the type that, sitting as the immediate
/// left neighbor, harmonizes a card of the given type.
///
/// water harmonizes fire, fire harmonizes earth, earth harmonizes
/// metal, metal harmonizes wood, wood harmonizes water.
#[must_use]
pub const fn harmonized_by(dragon: DragonType) -> DragonType {
    match dragon {
        DragonType::Fire => DragonType::Water,
        DragonType::Earth => DragonType::Fire,
        DragonType::Metal => DragonType::Earth,
        DragonType::Wood => DragonType::Metal,
        DragonType::Water => DragonType::Wood,
    }
}

/// Fixed resolution order for simultaneous harmonization triggers.
pub const HARMONIZATION_PRIORITY: [DragonType; 5] = [
    DragonType::Fire,
    DragonType::Earth,
    DragonType::Metal,
    DragonType::Water,
    DragonType::Wood,
];

/// Rank of a type in the priority order (lower resolves first).
#[must_use]
pub fn priority_rank(dragon: DragonType) -> usize {
    HARMONIZATION_PRIORITY
        .iter()
        .position(|t| *t == dragon)
        .unwrap_or(HARMONIZATION_PRIORITY.len())
}
