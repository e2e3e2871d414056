//! Action Eligibility
//!
//! Decides which monarch actions are valid for the current player state and
//! builds the weighted candidate list the turn engine draws from. Building
//! the list never consumes randomness.

use crown_rules::Ability;

use crate::action::{MonarchAction, WeightedAction};
use crate::monarch::{Monarch, HESSIAN_MINIMUM_PRICE, MINIMUM_TAX_RATE, MONARCH_MINIMUM_PRICE};
use crate::player::{PlayerState, PlayerType, Rival, Stance};

/// Tax can only be lowered while above this rate.
const LOWER_TAX_THRESHOLD: u32 = MINIMUM_TAX_RATE + 10;

impl Monarch {
    /// Rivals the monarch could declare war on.
    ///
    /// Live European non-REF players at peace or cease-fire. Empty whenever
    /// either side ignores European wars.
    pub fn collect_potential_enemies<'a>(&self, player: &'a PlayerState) -> Vec<&'a Rival> {
        if player.has_ability(Ability::IgnoreEuropeanWars) {
            return Vec::new();
        }
        player
            .rivals
            .iter()
            .filter(|r| r.is_live_european_power() && !r.ignores_european_wars)
            .filter(|r| matches!(r.stance, Stance::Peace | Stance::CeaseFire))
            .collect()
    }

    /// Rivals the monarch could make peace with.
    ///
    /// Ignoring European wars does not apply here: it stops wars, not peace.
    pub fn collect_potential_friends<'a>(&self, player: &'a PlayerState) -> Vec<&'a Rival> {
        player
            .rivals
            .iter()
            .filter(|r| r.is_live_european_power())
            .filter(|r| matches!(r.stance, Stance::War | Stance::CeaseFire))
            .collect()
    }

    /// Checks if an action is valid at present.
    pub fn is_valid(&self, action: MonarchAction, player: &PlayerState) -> bool {
        match action {
            MonarchAction::NoAction | MonarchAction::WaiveTax => true,
            MonarchAction::RaiseTaxAct | MonarchAction::RaiseTaxWar => player.tax < self.tax_maximum(),
            MonarchAction::ForceTax | MonarchAction::Displeasure => false,
            MonarchAction::LowerTaxWar | MonarchAction::LowerTaxOther => player.tax > LOWER_TAX_THRESHOLD,
            MonarchAction::AddToRef => self.capabilities.can_reinforce_ref(),
            MonarchAction::DeclarePeace => !self.collect_potential_friends(player).is_empty(),
            MonarchAction::DeclareWar => !self.collect_potential_enemies(player).is_empty(),
            MonarchAction::SupportSea => {
                player.attacked_by_privateers && !self.support_sea && !self.displeasure
            }
            MonarchAction::SupportLand | MonarchAction::MonarchMercenaries => {
                player.is_at_war() && !self.displeasure
            }
            MonarchAction::HessianMercenaries => player.check_gold(HESSIAN_MINIMUM_PRICE),
        }
    }

    /// Turns before the monarch starts meddling, for the configured meddling level.
    pub fn grace_turns(&self) -> u32 {
        let dx = self.meddling_factor();
        (6u32.saturating_sub(dx)) * 10
    }

    fn meddling_factor(&self) -> u32 {
        1 + self.options().monarch_meddling
    }

    /// Builds the weighted list of actions for this turn.
    ///
    /// Empty during the grace period, for players without settlements and
    /// for players no longer in the colonial phase.
    pub fn build_weighted_choices(&self, player: &PlayerState, turn: u32) -> Vec<WeightedAction> {
        let dx = self.meddling_factor() as i64;
        let grace = self.grace_turns();
        if turn < grace || !player.has_settlements() || player.player_type != PlayerType::Colonial {
            tracing::trace!(
                "No monarch actions for {} at turn {} (grace={})",
                player.id,
                turn,
                grace
            );
            return Vec::new();
        }

        let mut choices = Vec::new();
        let mut push = |action: MonarchAction, weight: i64| {
            if self.is_valid(action, player) {
                choices.push(WeightedAction::new(action, weight.max(0) as u32));
            }
        };

        push(MonarchAction::NoAction, (200 - turn as i64).max(100));
        push(MonarchAction::RaiseTaxAct, 5 + dx);
        push(MonarchAction::RaiseTaxWar, 5 + dx);
        push(MonarchAction::LowerTaxWar, 5 - dx);
        push(MonarchAction::LowerTaxOther, 5 - dx);
        push(MonarchAction::AddToRef, 10 + dx);
        push(MonarchAction::DeclarePeace, 6 - dx);
        push(MonarchAction::DeclareWar, 5 + dx);
        if player.check_gold(MONARCH_MINIMUM_PRICE) {
            push(MonarchAction::MonarchMercenaries, 6 - dx);
        } else if dx < 3 {
            push(MonarchAction::SupportLand, 3 - dx);
        }
        push(MonarchAction::SupportSea, 6 - dx);
        push(MonarchAction::HessianMercenaries, 6 - dx);

        tracing::trace!("Monarch choices for {} at turn {}: {:?}", player.id, turn, choices);
        choices
    }
}
