//! Errors raised while loading or validating a ruleset.

use thiserror::Error;

use crate::unit::{RoleId, UnitTypeId};

/// Errors that can occur while loading a ruleset.
#[derive(Debug, Error)]
pub enum RulesError {
    /// IO error reading a ruleset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A numeric option lies outside its permitted range
    #[error("option {name} = {value} is outside {min}..={max}")]
    OptionOutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    /// A force template names a unit type missing from the catalog
    #[error("{template} references unknown unit type {unit_type}")]
    UnknownUnitType {
        template: &'static str,
        unit_type: UnitTypeId,
    },
    /// A force template names a role missing from the catalog
    #[error("{template} references unknown role {role}")]
    UnknownRole { template: &'static str, role: RoleId },
    /// Two catalog entries share an identifier
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    /// The catalog lacks the unequipped role
    #[error("default role {0} is not defined")]
    MissingDefaultRole(RoleId),
}
