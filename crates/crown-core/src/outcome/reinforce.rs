use crown_rules::{Ability, RoleId, UnitGroup};

use crate::error::{MonarchError, Result};
use crate::monarch::Monarch;
use crate::random::{pick_random, RandomSource};

/// Naval capacity kept free beyond what the REF land units need, about
/// two and a half men-of-war.
const REF_SPARE_CAPACITY: u32 = 15;

/// What one intervention force update added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterventionGrowth {
    /// Units added to every land group
    pub land_per_group: u32,
    /// Transports added to carry them
    pub ships: u32,
}

impl Monarch {
    /// Picks units to add to the Royal Expeditionary Force.
    ///
    /// Ships are chosen while the fleet cannot carry the army with some room
    /// to spare, land units otherwise. Returns `None` when the relevant REF
    /// unit set is empty. The addition is not applied; see
    /// [`Monarch::apply_ref_addition`].
    pub fn choose_for_ref<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Option<UnitGroup>> {
        let force = &self.expeditionary_force;
        let need_naval = force.capacity() < force.space_required() + REF_SPARE_CAPACITY;
        let types = if need_naval {
            self.capabilities.ref_naval()
        } else {
            self.capabilities.ref_land()
        };
        let Some(type_id) = pick_random(rng, types) else {
            return Ok(None);
        };
        let unit_type = self
            .rules
            .unit_type(type_id)
            .ok_or_else(|| MonarchError::UnknownUnitType(type_id.clone()))?;

        let role = if need_naval || !unit_type.has_ability(Ability::CanBeEquipped) {
            RoleId::default_role()
        } else if rng.random_int(3) == 0 {
            self.capabilities.require_ref_mounted_role()?.clone()
        } else {
            self.capabilities.require_ref_armed_role()?.clone()
        };
        let count = if need_naval { 1 } else { rng.random_int(3) + 1 };

        let addition = UnitGroup::new(type_id.clone(), role, count);
        tracing::info!(
            "Add to {} REF: capacity={} spaceRequired={} => {}",
            self.player_id,
            force.capacity(),
            force.space_required(),
            addition
        );
        Ok(Some(addition))
    }

    /// Grows the intervention force for the current turn.
    ///
    /// Every land group gains one unit per elapsed intervention interval,
    /// then transports are added until the whole force fits aboard. Does
    /// nothing when intervention growth is disabled.
    pub fn update_intervention_force(&mut self, turn: u32) -> InterventionGrowth {
        let interval = self.options().intervention_turns;
        if interval == 0 {
            return InterventionGrowth::default();
        }

        let land_per_group = turn / interval;
        self.intervention_force.grow_land_units(land_per_group, &self.rules);
        let ships = self.intervention_force.grow_transports_to_fit(&self.rules);

        tracing::info!(
            "Intervention force for {} at turn {}: +{} per land group, +{} ships (capacity={} spaceRequired={})",
            self.player_id,
            turn,
            land_per_group,
            ships,
            self.intervention_force.capacity(),
            self.intervention_force.space_required()
        );
        InterventionGrowth { land_per_group, ships }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerState;
    use crate::random::ScriptedRandom;
    use crown_rules::{ForceTemplate, Ruleset};
    use std::sync::Arc;

    fn monarch() -> Monarch {
        let rules = Arc::new(Ruleset::classic().unwrap());
        Monarch::new(rules, &PlayerState::new("dutch"))
    }

    #[test]
    fn test_short_fleet_gets_a_ship() {
        let monarch = monarch();
        // capacity 48 < spaceRequired 60 + 15
        let mut rng = ScriptedRandom::new();

        let addition = monarch.choose_for_ref(&mut rng).unwrap().unwrap();
        assert_eq!(addition, UnitGroup::new("model.unit.manOWar", "model.role.default", 1));
    }

    #[test]
    fn test_ample_fleet_gets_land_units() {
        let mut monarch = monarch();
        monarch.apply_ref_addition(UnitGroup::new("model.unit.manOWar", "model.role.default", 5));
        assert_eq!(monarch.expeditionary_force().capacity(), 78);

        // kingsRegular, mounted (0 of 3), three of them
        let mut rng = ScriptedRandom::new().with_ints([0, 0, 2]);
        let addition = monarch.choose_for_ref(&mut rng).unwrap().unwrap();
        assert_eq!(addition, UnitGroup::new("model.unit.kingsRegular", "model.role.cavalry", 3));

        let mut rng = ScriptedRandom::new().with_ints([0, 2, 0]);
        let addition = monarch.choose_for_ref(&mut rng).unwrap().unwrap();
        assert_eq!(addition, UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 1));
    }

    #[test]
    fn test_unequippable_land_unit_keeps_default_role() {
        let mut monarch = monarch();
        monarch.apply_ref_addition(UnitGroup::new("model.unit.manOWar", "model.role.default", 5));

        // artillery skips the role draw
        let mut rng = ScriptedRandom::new().with_ints([1, 1]);
        let addition = monarch.choose_for_ref(&mut rng).unwrap().unwrap();
        assert_eq!(addition, UnitGroup::new("model.unit.artillery", "model.role.default", 2));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_no_ref_types_yields_none() {
        let base = Ruleset::classic().unwrap();
        let mut options = base.options().clone();
        options.ref_force = ForceTemplate::default();
        let stripped = base
            .unit_types()
            .iter()
            .cloned()
            .map(|mut t| {
                t.abilities.remove(&Ability::RefUnit);
                t
            })
            .collect();
        let rules = Ruleset::new("no-ref", options, stripped, base.roles().to_vec()).unwrap();
        let monarch = Monarch::new(Arc::new(rules), &PlayerState::new("dutch"));

        let mut rng = ScriptedRandom::new();
        assert_eq!(monarch.choose_for_ref(&mut rng).unwrap(), None);
    }

    #[test]
    fn test_intervention_growth_keeps_force_transportable() {
        let mut monarch = monarch();
        // 6 land units, two men-of-war carry 12
        assert_eq!(monarch.intervention_force().space_required(), 6);

        let growth = monarch.update_intervention_force(104);
        assert_eq!(growth, InterventionGrowth { land_per_group: 2, ships: 0 });
        assert_eq!(monarch.intervention_force().space_required(), 12);

        let growth = monarch.update_intervention_force(52);
        assert_eq!(growth, InterventionGrowth { land_per_group: 1, ships: 1 });
        assert_eq!(monarch.intervention_force().space_required(), 15);
        assert_eq!(monarch.intervention_force().capacity(), 18);
    }

    #[test]
    fn test_intervention_growth_disabled() {
        let base = Ruleset::classic().unwrap();
        let mut options = base.options().clone();
        options.intervention_turns = 0;
        let rules = Arc::new(base.with_options(options).unwrap());
        let mut monarch = Monarch::new(rules, &PlayerState::new("dutch"));
        let before = monarch.intervention_force().clone();

        assert_eq!(monarch.update_intervention_force(500), InterventionGrowth::default());
        assert_eq!(monarch.intervention_force(), &before);
    }

    #[test]
    fn test_intervention_growth_without_carriers_terminates() {
        let base = Ruleset::classic().unwrap();
        let mut options = base.options().clone();
        options.intervention_force = ForceTemplate::new(vec![UnitGroup::new(
            "model.unit.colonialRegular",
            "model.role.soldier",
            3,
        )]);
        let rules = Arc::new(base.with_options(options).unwrap());
        let mut monarch = Monarch::new(rules, &PlayerState::new("dutch"));

        let growth = monarch.update_intervention_force(520);
        assert_eq!(growth, InterventionGrowth { land_per_group: 10, ships: 0 });
        assert_eq!(monarch.intervention_force().space_required(), 13);
        assert_eq!(monarch.intervention_force().capacity(), 0);
    }
}
