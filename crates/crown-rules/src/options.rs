//! Game Options
//!
//! Tuning values that shape the monarch's behaviour, loaded from the
//! `[options]` table of a ruleset file.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::group::UnitGroup;

/// Default unit groups for one of the monarch's forces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceTemplate(pub Vec<UnitGroup>);

impl ForceTemplate {
    pub fn new(units: Vec<UnitGroup>) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &[UnitGroup] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Monarch-related game options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Highest tax rate the monarch may impose (percent)
    pub maximum_tax: u32,
    /// How steeply taxes move, 0 (gentle) to 5 (steep)
    pub tax_adjustment: u32,
    /// How often the monarch meddles, 0 (rarely) to 4 (constantly)
    pub monarch_meddling: u32,
    /// How generous land support is, 0 (one soldier) to 4 (artillery and dragoons)
    pub monarch_support: u32,
    /// Turns between intervention force growth steps; 0 disables growth
    pub intervention_turns: u32,
    /// Mercenary price as a percentage of market valuation
    pub mercenary_price: u32,
    /// Royal Expeditionary Force at game start
    pub ref_force: ForceTemplate,
    /// Foreign intervention force supporting a rebellion
    pub intervention_force: ForceTemplate,
    /// Mercenaries offered for hire
    pub mercenary_force: ForceTemplate,
    /// Troops provided when the monarch declares war
    pub war_support_force: ForceTemplate,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            maximum_tax: 70,
            tax_adjustment: 2,
            monarch_meddling: 2,
            monarch_support: 2,
            intervention_turns: 52,
            mercenary_price: 100,
            ref_force: ForceTemplate::default(),
            intervention_force: ForceTemplate::default(),
            mercenary_force: ForceTemplate::default(),
            war_support_force: ForceTemplate::default(),
        }
    }
}

impl GameOptions {
    /// Checks every numeric option against its permitted range.
    pub fn validate(&self) -> Result<(), RulesError> {
        check_range("maximum_tax", self.maximum_tax, 0, 100)?;
        check_range("tax_adjustment", self.tax_adjustment, 0, 5)?;
        check_range("monarch_meddling", self.monarch_meddling, 0, 4)?;
        check_range("monarch_support", self.monarch_support, 0, 4)?;
        check_range("mercenary_price", self.mercenary_price, 0, 1000)?;
        Ok(())
    }

    /// All force templates with their option names.
    pub fn templates(&self) -> [(&'static str, &ForceTemplate); 4] {
        [
            ("ref_force", &self.ref_force),
            ("intervention_force", &self.intervention_force),
            ("mercenary_force", &self.mercenary_force),
            ("war_support_force", &self.war_support_force),
        ]
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), RulesError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RulesError::OptionOutOfRange { name, value, min, max })
    }
}
