//! Errors surfaced by the monarch core.

use thiserror::Error;

use crown_rules::{RoleId, RulesError, UnitTypeId};

/// Unit categories the monarch draws from when generating outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    NavalSupport,
    BombardSupport,
    LandSupport,
    Mercenary,
}

impl std::fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitCategory::NavalSupport => write!(f, "naval support"),
            UnitCategory::BombardSupport => write!(f, "bombard support"),
            UnitCategory::LandSupport => write!(f, "land support"),
            UnitCategory::Mercenary => write!(f, "mercenary"),
        }
    }
}

/// Errors that can occur in monarch operations.
#[derive(Debug, Error)]
pub enum MonarchError {
    /// The ruleset defines no unit type in a category an outcome needs
    #[error("ruleset has no {0} unit types")]
    MissingUnitCategory(UnitCategory),
    /// The ruleset offers no role of the kind an outcome needs
    #[error("ruleset has no {0} military role")]
    MissingRole(&'static str),
    /// An action key that names no monarch action
    #[error("unknown monarch action: {0}")]
    UnknownAction(String),
    /// Saved data names a unit type missing from the ruleset
    #[error("saved force references unknown unit type {0}")]
    UnknownUnitType(UnitTypeId),
    /// Saved data names a role missing from the ruleset
    #[error("saved force references unknown role {0}")]
    UnknownRole(RoleId),
    /// Ruleset could not be loaded
    #[error("ruleset error: {0}")]
    Rules(#[from] RulesError),
    /// Error encoding or decoding JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error reading or writing a save
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MonarchError {
    /// True for errors caused by a broken ruleset rather than game state.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MonarchError::MissingUnitCategory(_) | MonarchError::MissingRole(_) | MonarchError::Rules(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MonarchError>;
