//! Harmonization cascade: events, queue, and resolution.

mod event;
mod resolver;

pub use event::{CascadeState, HarmonizationEvent};
pub use resolver::qualifier_holds;

pub(crate) use resolver::{advance_pending, after_flow_mutation, resolve_accept, sweep_blocks};
