//! Fixed rule tables for combat and harmonization.

mod tables;

pub use tables::{defeats, harmonized_by, priority_rank, HARMONIZATION_PRIORITY};
