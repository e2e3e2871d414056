//! Shared ruleset types for the monarch simulation.
//!
//! This crate contains pure data structures with no monarch logic: ability
//! tags, unit types, roles, unit groups and the game options that tune the
//! monarch. It is a dependency for all other crates in the workspace.

pub mod ability;
pub mod error;
pub mod group;
pub mod options;
pub mod ruleset;
pub mod unit;

pub use ability::Ability;
pub use error::RulesError;
pub use group::UnitGroup;
pub use options::{ForceTemplate, GameOptions};
pub use ruleset::{Ruleset, CLASSIC_RULESET_TOML};
pub use unit::{Role, RoleId, RoleRequirement, UnitType, UnitTypeId, DEFAULT_ROLE_ID};
