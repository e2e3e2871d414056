//! Unit Types and Roles
//!
//! Catalog entries describing what a unit is (its type) and how it is
//! equipped (its role).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::ability::Ability;

/// Identifier of the role every unit holds when it carries no equipment.
pub const DEFAULT_ROLE_ID: &str = "model.role.default";

/// Unique identifier for a unit type, e.g. `model.unit.kingsRegular`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitTypeId(pub String);

impl UnitTypeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitTypeId {
    fn from(s: &str) -> Self {
        UnitTypeId(s.to_string())
    }
}

impl From<String> for UnitTypeId {
    fn from(s: String) -> Self {
        UnitTypeId(s)
    }
}

impl fmt::Display for UnitTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a role, e.g. `model.role.dragoon`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    /// The unequipped role.
    pub fn default_role() -> Self {
        RoleId(DEFAULT_ROLE_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_ROLE_ID
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::default_role()
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        RoleId(s.to_string())
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        RoleId(s)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_space_taken() -> u32 {
    1
}

/// A kind of unit in the ruleset catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    /// Unique identifier
    pub id: UnitTypeId,
    /// Base offence power
    #[serde(default)]
    pub offence: f32,
    /// Transport slots offered when this type can carry units
    #[serde(default)]
    pub space: u32,
    /// Transport slots this unit occupies when carried
    #[serde(default = "default_space_taken")]
    pub space_taken: u32,
    /// Purchase price in Europe
    #[serde(default)]
    pub price: u32,
    /// Ability tags
    #[serde(default)]
    pub abilities: BTreeSet<Ability>,
}

impl UnitType {
    pub fn new(id: impl Into<UnitTypeId>) -> Self {
        Self {
            id: id.into(),
            offence: 0.0,
            space: 0,
            space_taken: default_space_taken(),
            price: 0,
            abilities: BTreeSet::new(),
        }
    }

    pub fn with_offence(mut self, offence: f32) -> Self {
        self.offence = offence;
        self
    }

    pub fn with_space(mut self, space: u32) -> Self {
        self.space = space;
        self
    }

    pub fn with_space_taken(mut self, space_taken: u32) -> Self {
        self.space_taken = space_taken;
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn is_naval(&self) -> bool {
        self.has_ability(Ability::NavalUnit)
    }

    pub fn can_carry_units(&self) -> bool {
        self.has_ability(Ability::CarryUnits)
    }
}

/// A single ability condition a role places on its holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub ability: Ability,
    /// Whether the ability must be present (true) or absent (false)
    #[serde(default = "required_present")]
    pub present: bool,
}

fn required_present() -> bool {
    true
}

impl RoleRequirement {
    pub fn present(ability: Ability) -> Self {
        Self { ability, present: true }
    }

    pub fn absent(ability: Ability) -> Self {
        Self { ability, present: false }
    }
}

/// Equipment a unit can hold, e.g. muskets (soldier) or muskets and horses (dragoon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier
    pub id: RoleId,
    /// Offence added per unit holding this role
    #[serde(default)]
    pub offence: f32,
    /// Price of the equipment per unit
    #[serde(default)]
    pub price: u32,
    /// Whether this is a military role
    #[serde(default)]
    pub military: bool,
    /// Abilities granted by the role
    #[serde(default)]
    pub abilities: BTreeSet<Ability>,
    /// Conditions on the player and unit type for the role to be available
    #[serde(default)]
    pub requires: Vec<RoleRequirement>,
}

impl Role {
    pub fn new(id: impl Into<RoleId>) -> Self {
        Self {
            id: id.into(),
            offence: 0.0,
            price: 0,
            military: false,
            abilities: BTreeSet::new(),
            requires: Vec::new(),
        }
    }

    /// Marks the role as military.
    pub fn military(mut self) -> Self {
        self.military = true;
        self
    }

    pub fn with_offence(mut self, offence: f32) -> Self {
        self.offence = offence;
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn with_requirement(mut self, requirement: RoleRequirement) -> Self {
        self.requires.push(requirement);
        self
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn is_armed(&self) -> bool {
        self.has_ability(Ability::Armed)
    }

    pub fn is_mounted(&self) -> bool {
        self.has_ability(Ability::Mounted)
    }

    /// Checks whether a unit of `unit_type` owned by a player with
    /// `player_abilities` may take this role.
    ///
    /// An ability counts as held if either the player or the unit type has it.
    pub fn is_available_to(&self, player_abilities: &BTreeSet<Ability>, unit_type: &UnitType) -> bool {
        self.requires.iter().all(|req| {
            let held = player_abilities.contains(&req.ability) || unit_type.has_ability(req.ability);
            held == req.present
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier() -> Role {
        Role::new("model.role.soldier")
            .military()
            .with_ability(Ability::Armed)
            .with_requirement(RoleRequirement::absent(Ability::RefUnit))
    }

    #[test]
    fn test_role_availability_respects_absent_requirement() {
        let colonist = UnitType::new("model.unit.freeColonist").with_ability(Ability::CanBeEquipped);
        let regular = UnitType::new("model.unit.kingsRegular")
            .with_ability(Ability::CanBeEquipped)
            .with_ability(Ability::RefUnit);
        let none = BTreeSet::new();

        assert!(soldier().is_available_to(&none, &colonist));
        assert!(!soldier().is_available_to(&none, &regular));
    }

    #[test]
    fn test_player_abilities_count_towards_requirements() {
        let infantry = Role::new("model.role.infantry")
            .with_requirement(RoleRequirement::present(Ability::RefUnit));
        let colonist = UnitType::new("model.unit.freeColonist");

        let mut royal = BTreeSet::new();
        assert!(!infantry.is_available_to(&royal, &colonist));
        royal.insert(Ability::RefUnit);
        assert!(infantry.is_available_to(&royal, &colonist));
    }

    #[test]
    fn test_default_role_id() {
        assert!(RoleId::default().is_default());
        assert!(!RoleId::from("model.role.soldier").is_default());
    }
}
