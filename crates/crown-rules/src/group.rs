//! Unit Groups
//!
//! A counted bundle of identical units: `count` units of one type holding one
//! role. Groups carry identifiers only; every derived quantity is resolved
//! against a [`Ruleset`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ability::Ability;
use crate::ruleset::Ruleset;
use crate::unit::{Role, RoleId, UnitType, UnitTypeId};

/// `count` units of `unit_type` equipped as `role`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitGroup {
    pub unit_type: UnitTypeId,
    #[serde(default)]
    pub role: RoleId,
    pub count: u32,
}

impl UnitGroup {
    pub fn new(unit_type: impl Into<UnitTypeId>, role: impl Into<RoleId>, count: u32) -> Self {
        Self {
            unit_type: unit_type.into(),
            role: role.into(),
            count,
        }
    }

    /// Resolves the unit type in the ruleset.
    pub fn unit_type<'r>(&self, rules: &'r Ruleset) -> Option<&'r UnitType> {
        rules.unit_type(&self.unit_type)
    }

    /// Resolves the role in the ruleset.
    pub fn role<'r>(&self, rules: &'r Ruleset) -> Option<&'r Role> {
        rules.role(&self.role)
    }

    pub fn has_ability(&self, rules: &Ruleset, ability: Ability) -> bool {
        self.unit_type(rules).is_some_and(|t| t.has_ability(ability))
    }

    pub fn is_naval(&self, rules: &Ruleset) -> bool {
        self.has_ability(rules, Ability::NavalUnit)
    }

    pub fn can_carry_units(&self, rules: &Ruleset) -> bool {
        self.unit_type(rules).is_some_and(UnitType::can_carry_units)
    }

    /// Transport slots needed to carry the whole group.
    pub fn space_taken(&self, rules: &Ruleset) -> u32 {
        self.unit_type(rules)
            .map_or(0, |t| t.space_taken.saturating_mul(self.count))
    }

    /// Transport slots the group offers; zero unless the type carries units.
    pub fn capacity_contribution(&self, rules: &Ruleset) -> u32 {
        match self.unit_type(rules) {
            Some(t) if t.can_carry_units() => t.space.saturating_mul(self.count),
            _ => 0,
        }
    }

    /// Approximate offence power of the group.
    pub fn offence(&self, rules: &Ruleset) -> f32 {
        let base = self.unit_type(rules).map_or(0.0, |t| t.offence);
        let bonus = self.role(rules).map_or(0.0, |r| r.offence);
        (base + bonus) * self.count as f32
    }

    /// Market valuation of the group: unit price plus equipment, per unit.
    pub fn price(&self, rules: &Ruleset) -> u32 {
        let unit = self.unit_type(rules).map_or(0, |t| t.price);
        let equipment = self.role(rules).map_or(0, |r| r.price);
        unit.saturating_add(equipment).saturating_mul(self.count)
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.count, self.unit_type, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_queries_resolve_through_ruleset() {
        let rules = Ruleset::classic().expect("classic ruleset");

        let regulars = UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 3);
        assert_eq!(regulars.space_taken(&rules), 3);
        assert_eq!(regulars.capacity_contribution(&rules), 0);
        assert!(!regulars.is_naval(&rules));

        let fleet = UnitGroup::new("model.unit.manOWar", "model.role.default", 2);
        assert!(fleet.is_naval(&rules));
        assert!(fleet.can_carry_units(&rules));
        assert_eq!(fleet.capacity_contribution(&rules), 12);
    }

    #[test]
    fn test_price_includes_equipment() {
        let rules = Ruleset::classic().expect("classic ruleset");
        let veteran = rules.unit_type(&"model.unit.veteranSoldier".into()).unwrap();
        let dragoon = rules.role(&"model.role.dragoon".into()).unwrap();

        let group = UnitGroup::new("model.unit.veteranSoldier", "model.role.dragoon", 2);
        assert_eq!(group.price(&rules), (veteran.price + dragoon.price) * 2);
    }

    #[test]
    fn test_unknown_type_contributes_nothing() {
        let rules = Ruleset::classic().expect("classic ruleset");
        let ghost = UnitGroup::new("model.unit.ghost", "model.role.default", 4);
        assert_eq!(ghost.space_taken(&rules), 0);
        assert_eq!(ghost.offence(&rules), 0.0);
    }

    #[test]
    fn test_display() {
        let group = UnitGroup::new("model.unit.artillery", "model.role.default", 1);
        assert_eq!(group.to_string(), "1 model.unit.artillery/model.role.default");
    }
}
