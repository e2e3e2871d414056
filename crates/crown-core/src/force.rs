//! Forces
//!
//! A force is a de-duplicated collection of unit groups split into land and
//! naval subsets. Land groups merge on (type, role), naval groups on type
//! alone. Transport capacity and the space needed by the land units are cached
//! and recomputed by every mutator, so they can never be read stale.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crown_rules::{Ability, ForceTemplate, RoleId, Ruleset, UnitGroup, UnitTypeId};

use crate::error::{MonarchError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Land(UnitTypeId, RoleId),
    Naval(UnitTypeId),
}

/// A group of units with a common origin and purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Force {
    land: Vec<UnitGroup>,
    naval: Vec<UnitGroup>,
    index: HashMap<GroupKey, usize>,
    space_required: u32,
    capacity: u32,
}

impl Force {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a force from a ruleset template.
    ///
    /// With `required` set, groups whose type lacks that ability are logged
    /// and left out.
    pub fn from_template(template: &ForceTemplate, required: Option<Ability>, rules: &Ruleset) -> Self {
        let mut force = Self::new();
        for group in template.units() {
            if let Some(ability) = required {
                if !group.has_ability(rules, ability) {
                    tracing::warn!("Found unit lacking required ability {}: {}", ability, group);
                    continue;
                }
            }
            force.add(group.clone(), rules);
        }
        force
    }

    /// Adds units, merging into an existing group with the same key.
    ///
    /// A group of an unknown unit type is kept as a land group with no
    /// transport effect.
    pub fn add(&mut self, group: UnitGroup, rules: &Ruleset) {
        if group.count == 0 {
            return;
        }
        let naval = match group.unit_type(rules) {
            Some(unit_type) => unit_type.is_naval(),
            None => {
                tracing::warn!("Adding group of unknown unit type to force: {}", group);
                false
            }
        };

        let key = if naval {
            GroupKey::Naval(group.unit_type.clone())
        } else {
            GroupKey::Land(group.unit_type.clone(), group.role.clone())
        };
        let list = if naval { &mut self.naval } else { &mut self.land };

        let existing = self.index.get(&key).copied();
        match existing {
            Some(i) => list[i].count += group.count,
            None => {
                self.index.insert(key, list.len());
                list.push(group);
            }
        }
        self.recompute(rules);
    }

    /// Adds `delta` units to every land group.
    pub fn grow_land_units(&mut self, delta: u32, rules: &Ruleset) {
        if delta == 0 {
            return;
        }
        for group in &mut self.land {
            group.count += delta;
        }
        self.recompute(rules);
    }

    /// Adds transports one at a time, cycling through the naval groups able to
    /// carry units, until capacity covers the space required.
    ///
    /// Stops immediately when no naval group can carry anything. Returns the
    /// number of ships added.
    pub fn grow_transports_to_fit(&mut self, rules: &Ruleset) -> u32 {
        let transports: Vec<(usize, u32)> = self
            .naval
            .iter()
            .enumerate()
            .filter_map(|(i, group)| match group.unit_type(rules) {
                Some(t) if t.can_carry_units() && t.space > 0 => Some((i, t.space)),
                _ => None,
            })
            .collect();

        if transports.is_empty() {
            if self.capacity < self.space_required {
                tracing::warn!(
                    "No transport can grow: capacity={} spaceRequired={}",
                    self.capacity,
                    self.space_required
                );
            }
            return 0;
        }

        let mut added = 0;
        let mut capacity = self.capacity;
        for &(i, space) in transports.iter().cycle() {
            if capacity >= self.space_required {
                break;
            }
            self.naval[i].count += 1;
            capacity += space;
            added += 1;
        }
        self.recompute(rules);
        added
    }

    fn recompute(&mut self, rules: &Ruleset) {
        self.capacity = self
            .naval
            .iter()
            .map(|g| g.capacity_contribution(rules))
            .sum();
        self.space_required = self.land.iter().map(|g| g.space_taken(rules)).sum();
    }

    /// Space required to transport all land units.
    pub fn space_required(&self) -> u32 {
        self.space_required
    }

    /// Current naval transport capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// All groups, land first.
    pub fn units(&self) -> impl Iterator<Item = &UnitGroup> {
        self.land.iter().chain(self.naval.iter())
    }

    pub fn land_units(&self) -> &[UnitGroup] {
        &self.land
    }

    pub fn naval_units(&self) -> &[UnitGroup] {
        &self.naval
    }

    pub fn is_empty(&self) -> bool {
        self.land.is_empty() && self.naval.is_empty()
    }

    /// Total number of units across all groups.
    pub fn unit_count(&self) -> u32 {
        self.units().map(|g| g.count).sum()
    }

    /// Approximate offence power of the naval or the land subset.
    pub fn strength(&self, naval: bool, rules: &Ruleset) -> f32 {
        let groups = if naval { &self.naval } else { &self.land };
        groups.iter().map(|g| g.offence(rules)).sum()
    }

    /// Serializable form of this force.
    pub fn to_record(&self) -> ForceRecord {
        ForceRecord {
            naval_units: self.naval.clone(),
            land_units: self.land.clone(),
            unknown: BTreeMap::new(),
        }
    }

    /// Rebuilds a force from its record.
    ///
    /// Unknown record keys are logged and skipped. Groups naming a unit type
    /// or role missing from the ruleset are rejected.
    pub fn from_record(record: &ForceRecord, rules: &Ruleset) -> Result<Self> {
        for tag in record.unknown.keys() {
            tracing::warn!("Bogus force tag: {}", tag);
        }

        let mut force = Self::new();
        for group in record.naval_units.iter().chain(record.land_units.iter()) {
            if group.unit_type(rules).is_none() {
                return Err(MonarchError::UnknownUnitType(group.unit_type.clone()));
            }
            if group.role(rules).is_none() {
                return Err(MonarchError::UnknownRole(group.role.clone()));
            }
            force.add(group.clone(), rules);
        }
        Ok(force)
    }
}

/// Saved shape of a force: naval and land sub-lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceRecord {
    #[serde(default)]
    pub naval_units: Vec<UnitGroup>,
    #[serde(default)]
    pub land_units: Vec<UnitGroup>,
    /// Unrecognised keys, kept only so they can be reported
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl ForceRecord {
    pub fn is_empty(&self) -> bool {
        self.naval_units.is_empty() && self.land_units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Ruleset {
        Ruleset::classic().expect("classic ruleset")
    }

    #[test]
    fn test_land_groups_merge_on_type_and_role() {
        let rules = rules();
        let mut force = Force::new();

        force.add(UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 2), &rules);
        force.add(UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 3), &rules);
        force.add(UnitGroup::new("model.unit.kingsRegular", "model.role.cavalry", 1), &rules);

        assert_eq!(force.land_units().len(), 2);
        assert_eq!(force.land_units()[0].count, 5);
        assert_eq!(force.space_required(), 6);
    }

    #[test]
    fn test_naval_groups_merge_on_type_only() {
        let rules = rules();
        let mut force = Force::new();

        force.add(UnitGroup::new("model.unit.manOWar", "model.role.default", 1), &rules);
        force.add(UnitGroup::new("model.unit.manOWar", "model.role.soldier", 2), &rules);

        assert_eq!(force.naval_units().len(), 1);
        assert_eq!(force.naval_units()[0].count, 3);
        assert_eq!(force.capacity(), 18);
    }

    #[test]
    fn test_units_lists_land_first() {
        let rules = rules();
        let mut force = Force::new();
        force.add(UnitGroup::new("model.unit.frigate", "model.role.default", 1), &rules);
        force.add(UnitGroup::new("model.unit.artillery", "model.role.default", 1), &rules);

        let ids: Vec<&str> = force.units().map(|g| g.unit_type.as_str()).collect();
        assert_eq!(ids, vec!["model.unit.artillery", "model.unit.frigate"]);
    }

    #[test]
    fn test_strength_of_empty_subset_is_zero() {
        let rules = rules();
        let mut force = Force::new();
        assert!(force.is_empty());
        force.add(UnitGroup::new("model.unit.artillery", "model.role.default", 2), &rules);

        assert_eq!(force.strength(true, &rules), 0.0);
        assert_eq!(force.strength(false, &rules), 14.0);
    }

    #[test]
    fn test_template_filter_skips_units_without_ability() {
        let rules = rules();
        let template = ForceTemplate::new(vec![
            UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 4),
            UnitGroup::new("model.unit.veteranSoldier", "model.role.soldier", 4),
        ]);

        let force = Force::from_template(&template, Some(Ability::RefUnit), &rules);
        assert_eq!(force.land_units().len(), 1);
        assert_eq!(force.land_units()[0].unit_type.as_str(), "model.unit.kingsRegular");
    }

    #[test]
    fn test_transport_growth_round_robin() {
        let rules = rules();
        let mut force = Force::new();
        force.add(UnitGroup::new("model.unit.colonialRegular", "model.role.soldier", 13), &rules);
        force.add(UnitGroup::new("model.unit.merchantman", "model.role.default", 1), &rules);
        force.add(UnitGroup::new("model.unit.galleon", "model.role.default", 1), &rules);

        let added = force.grow_transports_to_fit(&rules);

        // 4 + 6 = 10 < 13, merchantman +1 -> 14
        assert_eq!(added, 1);
        assert_eq!(force.naval_units()[0].count, 2);
        assert_eq!(force.naval_units()[1].count, 1);
        assert!(force.capacity() >= force.space_required());
    }

    #[test]
    fn test_transport_growth_without_carriers_terminates() {
        let rules = rules();
        let mut force = Force::new();
        force.add(UnitGroup::new("model.unit.colonialRegular", "model.role.soldier", 5), &rules);

        assert_eq!(force.grow_transports_to_fit(&rules), 0);
        assert_eq!(force.capacity(), 0);
        assert_eq!(force.space_required(), 5);
    }

    #[test]
    fn test_record_skips_unknown_keys() {
        let rules = rules();
        let json = r#"{
            "naval_units": [{"unit_type": "model.unit.manOWar", "role": "model.role.default", "count": 2}],
            "land_units": [{"unit_type": "model.unit.artillery", "count": 3}],
            "flagship": "HMS Victory"
        }"#;
        let record: ForceRecord = serde_json::from_str(json).unwrap();
        assert!(record.unknown.contains_key("flagship"));

        let force = Force::from_record(&record, &rules).unwrap();
        assert_eq!(force.capacity(), 12);
        assert_eq!(force.space_required(), 3);
        assert!(force.to_record().unknown.is_empty());
    }

    #[test]
    fn test_record_with_unknown_unit_type_is_rejected() {
        let rules = rules();
        let record = ForceRecord {
            land_units: vec![UnitGroup::new("model.unit.ghost", "model.role.default", 1)],
            ..Default::default()
        };
        assert!(matches!(
            Force::from_record(&record, &rules),
            Err(MonarchError::UnknownUnitType(_))
        ));
    }
}
