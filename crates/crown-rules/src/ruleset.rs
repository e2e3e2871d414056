//! Ruleset Catalog
//!
//! The catalog of unit types and roles plus the game options, loaded from a
//! TOML file. A ruleset is validated once on load and is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::RulesError;
use crate::options::GameOptions;
use crate::unit::{Role, RoleId, UnitType, UnitTypeId, DEFAULT_ROLE_ID};

/// The bundled classic ruleset.
pub const CLASSIC_RULESET_TOML: &str = include_str!("../rulesets/classic.toml");

/// On-disk shape of a ruleset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RulesetFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    options: GameOptions,
    #[serde(default)]
    unit_types: Vec<UnitType>,
    #[serde(default)]
    roles: Vec<Role>,
}

/// A validated catalog of unit types, roles and options.
#[derive(Debug, Clone)]
pub struct Ruleset {
    name: String,
    options: GameOptions,
    unit_types: Vec<UnitType>,
    roles: Vec<Role>,
    unit_index: HashMap<UnitTypeId, usize>,
    role_index: HashMap<RoleId, usize>,
}

impl Ruleset {
    /// Builds and validates a ruleset.
    pub fn new(
        name: impl Into<String>,
        options: GameOptions,
        unit_types: Vec<UnitType>,
        roles: Vec<Role>,
    ) -> Result<Self, RulesError> {
        let mut unit_index = HashMap::with_capacity(unit_types.len());
        for (i, unit_type) in unit_types.iter().enumerate() {
            if unit_index.insert(unit_type.id.clone(), i).is_some() {
                return Err(RulesError::DuplicateId {
                    kind: "unit type",
                    id: unit_type.id.to_string(),
                });
            }
        }

        let mut role_index = HashMap::with_capacity(roles.len());
        for (i, role) in roles.iter().enumerate() {
            if role_index.insert(role.id.clone(), i).is_some() {
                return Err(RulesError::DuplicateId {
                    kind: "role",
                    id: role.id.to_string(),
                });
            }
        }

        let rules = Self {
            name: name.into(),
            options,
            unit_types,
            roles,
            unit_index,
            role_index,
        };
        rules.validate()?;

        tracing::debug!(
            "Loaded ruleset {:?}: {} unit types, {} roles",
            rules.name,
            rules.unit_types.len(),
            rules.roles.len()
        );
        Ok(rules)
    }

    /// Loads a ruleset from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses a ruleset from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, RulesError> {
        let file: RulesetFile = toml::from_str(content)?;
        Self::new(file.name, file.options, file.unit_types, file.roles)
    }

    /// The bundled classic ruleset.
    pub fn classic() -> Result<Self, RulesError> {
        Self::from_str(CLASSIC_RULESET_TOML)
    }

    /// Returns a copy of this ruleset with different options.
    pub fn with_options(&self, options: GameOptions) -> Result<Self, RulesError> {
        Self::new(
            self.name.clone(),
            options,
            self.unit_types.clone(),
            self.roles.clone(),
        )
    }

    fn validate(&self) -> Result<(), RulesError> {
        let default_role = RoleId::default_role();
        if !self.role_index.contains_key(&default_role) {
            return Err(RulesError::MissingDefaultRole(default_role));
        }

        self.options.validate()?;

        for (template, force) in self.options.templates() {
            for group in force.units() {
                if !self.unit_index.contains_key(&group.unit_type) {
                    return Err(RulesError::UnknownUnitType {
                        template,
                        unit_type: group.unit_type.clone(),
                    });
                }
                if !self.role_index.contains_key(&group.role) {
                    return Err(RulesError::UnknownRole {
                        template,
                        role: group.role.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// All unit types in catalog order.
    pub fn unit_types(&self) -> &[UnitType] {
        &self.unit_types
    }

    /// All roles in catalog order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn unit_type(&self, id: &UnitTypeId) -> Option<&UnitType> {
        self.unit_index.get(id).map(|&i| &self.unit_types[i])
    }

    pub fn role(&self, id: &RoleId) -> Option<&Role> {
        self.role_index.get(id).map(|&i| &self.roles[i])
    }

    /// The unequipped role. Always present in a validated ruleset.
    pub fn default_role(&self) -> &Role {
        let i = self.role_index[&RoleId::from(DEFAULT_ROLE_ID)];
        &self.roles[i]
    }

    /// Military roles in catalog order.
    pub fn military_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(|r| r.military)
    }

    /// Unit types eligible for the Royal Expeditionary Force, naval or land.
    pub fn ref_unit_types(&self, naval: bool) -> Vec<&UnitType> {
        self.unit_types
            .iter()
            .filter(|t| t.has_ability(crate::Ability::RefUnit) && t.is_naval() == naval)
            .collect()
    }
}
