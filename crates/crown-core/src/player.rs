//! Player State
//!
//! The slice of player and game state the monarch reads. The turn engine owns
//! the real player; it hands the monarch a `PlayerState` each call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crown_rules::Ability;

/// Diplomatic stance of the player towards another player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    Uncontacted,
    Alliance,
    Peace,
    CeaseFire,
    War,
}

/// Phase of the player's game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    #[default]
    Colonial,
    Rebel,
    Independent,
    Royal,
    Native,
    Undead,
}

/// Another player as seen from the monarch's player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rival {
    pub id: String,
    /// Stance of our player towards this rival
    pub stance: Stance,
    /// European colonial power (as opposed to a native nation)
    pub european: bool,
    /// Whether this rival is a Royal Expeditionary Force
    #[serde(default)]
    pub is_ref: bool,
    /// Rival holds the ignore-European-wars ability
    #[serde(default)]
    pub ignores_european_wars: bool,
    /// Rival is still in the game
    #[serde(default = "alive")]
    pub alive: bool,
}

fn alive() -> bool {
    true
}

impl Rival {
    pub fn european(id: impl Into<String>, stance: Stance) -> Self {
        Self {
            id: id.into(),
            stance,
            european: true,
            is_ref: false,
            ignores_european_wars: false,
            alive: true,
        }
    }

    pub fn native(id: impl Into<String>, stance: Stance) -> Self {
        Self {
            european: false,
            ..Self::european(id, stance)
        }
    }

    pub fn as_ref_player(mut self) -> Self {
        self.is_ref = true;
        self
    }

    pub fn ignoring_european_wars(mut self) -> Self {
        self.ignores_european_wars = true;
        self
    }

    /// A live European player that is not an expeditionary force.
    pub fn is_live_european_power(&self) -> bool {
        self.alive && self.european && !self.is_ref
    }
}

/// Snapshot of the monarch's player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    /// Current tax rate (percent)
    pub tax: u32,
    pub gold: u32,
    #[serde(default)]
    pub player_type: PlayerType,
    pub settlement_count: u32,
    #[serde(default)]
    pub abilities: BTreeSet<Ability>,
    /// Whether privateers have attacked this player recently
    #[serde(default)]
    pub attacked_by_privateers: bool,
    #[serde(default)]
    pub rivals: Vec<Rival>,
}

impl PlayerState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tax: 0,
            gold: 0,
            player_type: PlayerType::Colonial,
            settlement_count: 0,
            abilities: BTreeSet::new(),
            attacked_by_privateers: false,
            rivals: Vec::new(),
        }
    }

    pub fn with_tax(mut self, tax: u32) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_settlements(mut self, count: u32) -> Self {
        self.settlement_count = count;
        self
    }

    pub fn with_player_type(mut self, player_type: PlayerType) -> Self {
        self.player_type = player_type;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn with_rival(mut self, rival: Rival) -> Self {
        self.rivals.push(rival);
        self
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn has_settlements(&self) -> bool {
        self.settlement_count > 0
    }

    pub fn is_colonial(&self) -> bool {
        self.player_type == PlayerType::Colonial
    }

    /// Whether the player can pay `amount` gold.
    pub fn check_gold(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    /// At war with anyone at all, natives included.
    pub fn is_at_war(&self) -> bool {
        self.rivals.iter().any(|r| r.alive && r.stance == Stance::War)
    }

    pub fn rival(&self, id: &str) -> Option<&Rival> {
        self.rivals.iter().find(|r| r.id == id)
    }

    /// Sets the stance towards a rival. Returns false if the rival is unknown.
    pub fn set_stance(&mut self, id: &str, stance: Stance) -> bool {
        match self.rivals.iter_mut().find(|r| r.id == id) {
            Some(rival) => {
                rival.stance = stance;
                true
            }
            None => false,
        }
    }
}
