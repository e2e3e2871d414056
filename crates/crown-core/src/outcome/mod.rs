//! Outcome generators: the concrete effect of a chosen monarch action.
//!
//! Generators draw from the injected random source and return deltas or
//! offers. They never touch the player; applying an outcome is the caller's
//! business.

mod mercenary;
mod reinforce;
mod support;
mod tax;

pub use reinforce::InterventionGrowth;
