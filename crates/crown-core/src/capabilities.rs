//! Capability Cache
//!
//! Classification of the ruleset's unit types and roles into the categories
//! the monarch draws from. Built once when a monarch is created and never
//! mutated afterwards.

use std::collections::BTreeSet;

use crown_rules::{Ability, RoleId, Ruleset, UnitType, UnitTypeId};

use crate::error::{MonarchError, Result, UnitCategory};

/// Unit types and roles suitable for support, mercenary and REF outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    naval_support: Vec<UnitTypeId>,
    bombard_support: Vec<UnitTypeId>,
    land_support: Vec<UnitTypeId>,
    mercenary: Vec<UnitTypeId>,
    ref_naval: Vec<UnitTypeId>,
    ref_land: Vec<UnitTypeId>,
    mounted_role: Option<RoleId>,
    armed_role: Option<RoleId>,
    ref_mounted_role: Option<RoleId>,
    ref_armed_role: Option<RoleId>,
}

impl Capabilities {
    /// Classifies the ruleset for a player holding `player_abilities`.
    pub fn build(rules: &Ruleset, player_abilities: &BTreeSet<Ability>) -> Self {
        let mut caps = Self::default();

        for unit_type in rules.unit_types() {
            if unit_type.has_ability(Ability::SupportUnit) {
                if unit_type.is_naval() {
                    caps.naval_support.push(unit_type.id.clone());
                } else if unit_type.has_ability(Ability::Bombard) {
                    caps.bombard_support.push(unit_type.id.clone());
                } else if unit_type.has_ability(Ability::CanBeEquipped) {
                    caps.land_support.push(unit_type.id.clone());
                }
            }
            if unit_type.has_ability(Ability::MercenaryUnit) {
                caps.mercenary.push(unit_type.id.clone());
            }
        }
        caps.ref_naval = rules.ref_unit_types(true).into_iter().map(|t| t.id.clone()).collect();
        caps.ref_land = rules.ref_unit_types(false).into_iter().map(|t| t.id.clone()).collect();

        // Roles are chosen against the first land support type.
        match caps.land_support.first().and_then(|id| rules.unit_type(id)) {
            Some(land_type) => {
                (caps.mounted_role, caps.armed_role) = select_roles(rules, player_abilities, land_type);
            }
            None => tracing::warn!("Ruleset {:?} has no land support unit types", rules.name()),
        }
        let first_ref_land = caps
            .ref_land
            .iter()
            .filter_map(|id| rules.unit_type(id))
            .find(|t| t.has_ability(Ability::CanBeEquipped));
        if let Some(ref_type) = first_ref_land {
            (caps.ref_mounted_role, caps.ref_armed_role) = select_roles(rules, player_abilities, ref_type);
        }

        tracing::debug!(
            "Monarch capabilities: naval={} bombard={} land={} mercenary={} ref_naval={} ref_land={} mounted={:?} armed={:?}",
            caps.naval_support.len(),
            caps.bombard_support.len(),
            caps.land_support.len(),
            caps.mercenary.len(),
            caps.ref_naval.len(),
            caps.ref_land.len(),
            caps.mounted_role,
            caps.armed_role
        );
        caps
    }

    pub fn naval_support(&self) -> &[UnitTypeId] {
        &self.naval_support
    }

    pub fn bombard_support(&self) -> &[UnitTypeId] {
        &self.bombard_support
    }

    pub fn land_support(&self) -> &[UnitTypeId] {
        &self.land_support
    }

    pub fn mercenary(&self) -> &[UnitTypeId] {
        &self.mercenary
    }

    pub fn ref_naval(&self) -> &[UnitTypeId] {
        &self.ref_naval
    }

    pub fn ref_land(&self) -> &[UnitTypeId] {
        &self.ref_land
    }

    pub fn mounted_role(&self) -> Option<&RoleId> {
        self.mounted_role.as_ref()
    }

    pub fn armed_role(&self) -> Option<&RoleId> {
        self.armed_role.as_ref()
    }

    /// Mounted role for equippable REF land units.
    pub fn ref_mounted_role(&self) -> Option<&RoleId> {
        self.ref_mounted_role.as_ref()
    }

    pub fn ref_armed_role(&self) -> Option<&RoleId> {
        self.ref_armed_role.as_ref()
    }

    /// Unit types of a category, failing if the ruleset defines none.
    pub fn require(&self, category: UnitCategory) -> Result<&[UnitTypeId]> {
        let types = match category {
            UnitCategory::NavalSupport => &self.naval_support,
            UnitCategory::BombardSupport => &self.bombard_support,
            UnitCategory::LandSupport => &self.land_support,
            UnitCategory::Mercenary => &self.mercenary,
        };
        if types.is_empty() {
            Err(MonarchError::MissingUnitCategory(category))
        } else {
            Ok(types)
        }
    }

    pub fn require_mounted_role(&self) -> Result<&RoleId> {
        self.mounted_role.as_ref().ok_or(MonarchError::MissingRole("mounted"))
    }

    pub fn require_armed_role(&self) -> Result<&RoleId> {
        self.armed_role.as_ref().ok_or(MonarchError::MissingRole("armed"))
    }

    pub fn require_ref_mounted_role(&self) -> Result<&RoleId> {
        self.ref_mounted_role.as_ref().ok_or(MonarchError::MissingRole("REF mounted"))
    }

    pub fn require_ref_armed_role(&self) -> Result<&RoleId> {
        self.ref_armed_role.as_ref().ok_or(MonarchError::MissingRole("REF armed"))
    }

    /// Whether REF reinforcements can be drawn at all.
    pub fn can_reinforce_ref(&self) -> bool {
        !self.ref_naval.is_empty() && !self.ref_land.is_empty()
    }
}

/// First armed+mounted and first armed-only military roles available to
/// `unit_type`, in catalog order.
fn select_roles(
    rules: &Ruleset,
    player_abilities: &BTreeSet<Ability>,
    unit_type: &UnitType,
) -> (Option<RoleId>, Option<RoleId>) {
    let mut mounted = None;
    let mut armed = None;
    for role in rules.military_roles() {
        if !role.is_armed() || !role.is_available_to(player_abilities, unit_type) {
            continue;
        }
        if role.is_mounted() {
            mounted.get_or_insert_with(|| role.id.clone());
        } else {
            armed.get_or_insert_with(|| role.id.clone());
        }
    }
    (mounted, armed)
}
