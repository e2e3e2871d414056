//! The Monarch
//!
//! The player's monarch, whose functions prior to the revolution include
//! raising taxes, declaring war on other European powers, and occasionally
//! providing military support. One monarch exists per player and owns four
//! forces that are never shared with any other player.
//!
//! The monarch's behaviour is split over several modules:
//! - [`crate::eligibility`]: which actions are valid and their weights
//! - [`crate::outcome`]: what a chosen action concretely produces
//! - [`crate::turn`]: dispatch from a chosen action to its outcome
//! - [`crate::save`]: the persisted record and legacy migration

use std::sync::Arc;

use crown_rules::{Ability, GameOptions, Ruleset, UnitGroup, UnitTypeId};

use crate::capabilities::Capabilities;
use crate::force::Force;
use crate::player::PlayerState;

/// The minimum price for a monarch offer of mercenaries.
pub const MONARCH_MINIMUM_PRICE: u32 = 200;

/// The minimum price for a Hessian offer of mercenaries.
pub const HESSIAN_MINIMUM_PRICE: u32 = 5000;

/// The minimum tax rate (percent) from where it can be lowered.
pub const MINIMUM_TAX_RATE: u32 = 20;

/// A player's monarch and the forces it controls.
#[derive(Debug, Clone)]
pub struct Monarch {
    pub(crate) player_id: String,
    pub(crate) rules: Arc<Ruleset>,
    pub(crate) capabilities: Capabilities,
    /// The Royal Expeditionary Force, sent to crush a rebellion
    pub(crate) expeditionary_force: Force,
    /// The foreign intervention force, sent to support a rebellion
    pub(crate) intervention_force: Force,
    /// Mercenaries a foreign power offers to send
    pub(crate) mercenary_force: Force,
    /// Troops typically provided when the monarch declares war
    pub(crate) war_support_force: Force,
    /// Whether a warship has been provided
    pub(crate) support_sea: bool,
    /// Whether displeasure has been incurred
    pub(crate) displeasure: bool,
}

impl Monarch {
    /// Creates a monarch for `player` with forces drawn from the ruleset defaults.
    pub fn new(rules: Arc<Ruleset>, player: &PlayerState) -> Self {
        let capabilities = Capabilities::build(&rules, &player.abilities);
        let options = rules.options();
        let expeditionary_force = Force::from_template(&options.ref_force, Some(Ability::RefUnit), &rules);
        let intervention_force = Force::from_template(&options.intervention_force, None, &rules);
        let mercenary_force = Force::from_template(&options.mercenary_force, None, &rules);
        let war_support_force = Force::from_template(&options.war_support_force, None, &rules);

        tracing::info!(
            "Monarch for {}: REF of {} units (capacity={} spaceRequired={})",
            player.id,
            expeditionary_force.unit_count(),
            expeditionary_force.capacity(),
            expeditionary_force.space_required()
        );

        Self {
            player_id: player.id.clone(),
            rules,
            capabilities,
            expeditionary_force,
            intervention_force,
            mercenary_force,
            war_support_force,
            support_sea: false,
            displeasure: false,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    /// Shared handle to the ruleset.
    pub fn rules_handle(&self) -> Arc<Ruleset> {
        Arc::clone(&self.rules)
    }

    pub(crate) fn options(&self) -> &GameOptions {
        self.rules.options()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn expeditionary_force(&self) -> &Force {
        &self.expeditionary_force
    }

    pub fn intervention_force(&self) -> &Force {
        &self.intervention_force
    }

    pub fn mercenary_force(&self) -> &Force {
        &self.mercenary_force
    }

    pub fn war_support_force(&self) -> &Force {
        &self.war_support_force
    }

    pub fn support_sea(&self) -> bool {
        self.support_sea
    }

    pub fn set_support_sea(&mut self, support_sea: bool) {
        self.support_sea = support_sea;
    }

    pub fn displeasure(&self) -> bool {
        self.displeasure
    }

    pub fn set_displeasure(&mut self, displeasure: bool) {
        self.displeasure = displeasure;
    }

    /// The maximum tax rate in this game.
    pub fn tax_maximum(&self) -> u32 {
        self.options().maximum_tax
    }

    /// Applies a reinforcement chosen by [`Monarch::choose_for_ref`].
    pub fn apply_ref_addition(&mut self, addition: UnitGroup) {
        tracing::debug!("Adding {} to the REF of {}", addition, self.player_id);
        self.expeditionary_force.add(addition, &self.rules);
    }

    /// First naval REF unit type, if any.
    pub fn naval_ref_unit_type(&self) -> Option<&UnitTypeId> {
        self.capabilities.ref_naval().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_monarch_builds_default_forces() {
        let rules = Arc::new(Ruleset::classic().unwrap());
        let player = PlayerState::new("dutch");
        let monarch = Monarch::new(rules, &player);

        assert_eq!(monarch.player_id(), "dutch");
        assert!(!monarch.expeditionary_force().is_empty());
        assert!(!monarch.intervention_force().is_empty());
        assert!(!monarch.mercenary_force().is_empty());
        assert!(!monarch.war_support_force().is_empty());
        assert!(!monarch.support_sea());
        assert!(!monarch.displeasure());

        // 31 infantry + 15 cavalry + 14 artillery, 8 men-of-war of 6 slots
        assert_eq!(monarch.expeditionary_force().space_required(), 60);
        assert_eq!(monarch.expeditionary_force().capacity(), 48);
    }

    #[test]
    fn test_apply_ref_addition_merges() {
        let rules = Arc::new(Ruleset::classic().unwrap());
        let mut monarch = Monarch::new(rules, &PlayerState::new("dutch"));
        let before = monarch.expeditionary_force().land_units().len();

        monarch.apply_ref_addition(UnitGroup::new("model.unit.kingsRegular", "model.role.infantry", 2));

        assert_eq!(monarch.expeditionary_force().land_units().len(), before);
        assert_eq!(monarch.expeditionary_force().space_required(), 62);
    }

    #[test]
    fn test_naval_ref_unit_type() {
        let rules = Arc::new(Ruleset::classic().unwrap());
        let monarch = Monarch::new(rules, &PlayerState::new("dutch"));
        assert_eq!(
            monarch.naval_ref_unit_type().map(|t| t.as_str()),
            Some("model.unit.manOWar")
        );
    }
}
