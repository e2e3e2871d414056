//! Ability tags carried by unit types, roles and players.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A capability tag looked up by the monarch when classifying units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Moves on water rather than land
    NavalUnit,
    /// Can transport other units
    CarryUnits,
    /// Offered by the monarch as colonial support
    SupportUnit,
    /// Bombards (artillery-like)
    Bombard,
    /// Accepts equipment, and therefore military roles
    CanBeEquipped,
    /// Offered as a mercenary
    MercenaryUnit,
    /// Belongs to the Royal Expeditionary Force
    RefUnit,
    /// Role grants arms
    Armed,
    /// Role grants horses
    Mounted,
    /// Expert at fighting
    ExpertSoldier,
    /// Player is exempt from the monarch's European wars
    IgnoreEuropeanWars,
}

impl Ability {
    /// All ability tags, in declaration order.
    pub const ALL: [Ability; 11] = [
        Ability::NavalUnit,
        Ability::CarryUnits,
        Ability::SupportUnit,
        Ability::Bombard,
        Ability::CanBeEquipped,
        Ability::MercenaryUnit,
        Ability::RefUnit,
        Ability::Armed,
        Ability::Mounted,
        Ability::ExpertSoldier,
        Ability::IgnoreEuropeanWars,
    ];

    /// Returns the snake_case tag used in ruleset files.
    pub fn as_str(self) -> &'static str {
        match self {
            Ability::NavalUnit => "naval_unit",
            Ability::CarryUnits => "carry_units",
            Ability::SupportUnit => "support_unit",
            Ability::Bombard => "bombard",
            Ability::CanBeEquipped => "can_be_equipped",
            Ability::MercenaryUnit => "mercenary_unit",
            Ability::RefUnit => "ref_unit",
            Ability::Armed => "armed",
            Ability::Mounted => "mounted",
            Ability::ExpertSoldier => "expert_soldier",
            Ability::IgnoreEuropeanWars => "ignore_european_wars",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown ability: {}", s))
    }
}
