//! Turn Dispatch
//!
//! Maps a chosen action to its concrete outcome. The turn engine applies
//! outcomes to the player; the monarch only applies changes to its own
//! state (the sea support flag).

use serde::{Deserialize, Serialize};

use crown_rules::UnitGroup;

use crate::action::MonarchAction;
use crate::error::Result;
use crate::monarch::Monarch;
use crate::player::PlayerState;
use crate::random::{pick_random, RandomSource};
use crate::select::choose_weighted;

/// What the monarch did this turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonarchOutcome {
    NoAction,
    /// A tax raise or reduction
    TaxChange {
        action: MonarchAction,
        old_tax: u32,
        new_tax: u32,
    },
    WaiveTax,
    /// Units to add to the REF, not yet applied
    AddToRef { addition: UnitGroup },
    DeclareWar { enemy: String },
    DeclarePeace { friend: String },
    /// Units gifted to the colonies
    Support { action: MonarchAction, units: Vec<UnitGroup> },
    /// Units offered for hire
    Mercenaries {
        action: MonarchAction,
        units: Vec<UnitGroup>,
        price: u32,
    },
}

impl MonarchOutcome {
    /// The action this outcome came from.
    pub fn action(&self) -> MonarchAction {
        match self {
            MonarchOutcome::NoAction => MonarchAction::NoAction,
            MonarchOutcome::TaxChange { action, .. }
            | MonarchOutcome::Support { action, .. }
            | MonarchOutcome::Mercenaries { action, .. } => *action,
            MonarchOutcome::WaiveTax => MonarchAction::WaiveTax,
            MonarchOutcome::AddToRef { .. } => MonarchAction::AddToRef,
            MonarchOutcome::DeclareWar { .. } => MonarchAction::DeclareWar,
            MonarchOutcome::DeclarePeace { .. } => MonarchAction::DeclarePeace,
        }
    }
}

impl Monarch {
    /// Produces the outcome of `action` for this turn.
    ///
    /// Actions that are not valid for the player, including the never
    /// selectable ones, resolve to [`MonarchOutcome::NoAction`].
    pub fn resolve<R: RandomSource + ?Sized>(
        &mut self,
        action: MonarchAction,
        player: &PlayerState,
        turn: u32,
        rng: &mut R,
    ) -> Result<MonarchOutcome> {
        if !self.is_valid(action, player) {
            tracing::warn!("Monarch action {} is not valid for {}", action, player.id);
            return Ok(MonarchOutcome::NoAction);
        }

        let outcome = match action {
            MonarchAction::NoAction => MonarchOutcome::NoAction,
            MonarchAction::RaiseTaxAct | MonarchAction::RaiseTaxWar => MonarchOutcome::TaxChange {
                action,
                old_tax: player.tax,
                new_tax: self.raise_tax(player, turn, rng),
            },
            MonarchAction::LowerTaxWar | MonarchAction::LowerTaxOther => MonarchOutcome::TaxChange {
                action,
                old_tax: player.tax,
                new_tax: self.lower_tax(player, rng),
            },
            MonarchAction::WaiveTax => MonarchOutcome::WaiveTax,
            MonarchAction::AddToRef => match self.choose_for_ref(rng)? {
                Some(addition) => MonarchOutcome::AddToRef { addition },
                None => MonarchOutcome::NoAction,
            },
            MonarchAction::DeclareWar => {
                let enemies = self.collect_potential_enemies(player);
                match pick_random(rng, &enemies) {
                    Some(enemy) => MonarchOutcome::DeclareWar { enemy: enemy.id.clone() },
                    None => MonarchOutcome::NoAction,
                }
            }
            MonarchAction::DeclarePeace => {
                let friends = self.collect_potential_friends(player);
                match pick_random(rng, &friends) {
                    Some(friend) => MonarchOutcome::DeclarePeace { friend: friend.id.clone() },
                    None => MonarchOutcome::NoAction,
                }
            }
            MonarchAction::SupportLand | MonarchAction::SupportSea => {
                let naval = action == MonarchAction::SupportSea;
                MonarchOutcome::Support {
                    action,
                    units: self.support(naval, rng)?,
                }
            }
            MonarchAction::MonarchMercenaries => {
                let units = self.mercenaries(player, rng)?;
                let price = self.mercenary_price(&units);
                MonarchOutcome::Mercenaries { action, units, price }
            }
            MonarchAction::HessianMercenaries => {
                let (units, price) = self.hessian_offer();
                MonarchOutcome::Mercenaries { action, units, price }
            }
            MonarchAction::ForceTax | MonarchAction::Displeasure => MonarchOutcome::NoAction,
        };

        tracing::debug!("Monarch of {} at turn {}: {:?}", player.id, turn, outcome);
        Ok(outcome)
    }

    /// One full monarch turn: build the choices, draw one and resolve it.
    pub fn take_turn<R: RandomSource + ?Sized>(
        &mut self,
        player: &PlayerState,
        turn: u32,
        rng: &mut R,
    ) -> Result<MonarchOutcome> {
        let choices = self.build_weighted_choices(player, turn);
        match choose_weighted(rng, &choices) {
            Some(choice) => self.resolve(choice.action, player, turn, rng),
            None => Ok(MonarchOutcome::NoAction),
        }
    }
}
