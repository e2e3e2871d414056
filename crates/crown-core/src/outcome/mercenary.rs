use crown_rules::{Ability, RoleId, UnitGroup, UnitTypeId};

use crate::error::Result;
use crate::monarch::Monarch;
use crate::player::PlayerState;
use crate::random::RandomSource;

impl Monarch {
    /// Price of mercenaries: market valuation scaled by the mercenary price
    /// option.
    pub fn mercenary_price(&self, groups: &[UnitGroup]) -> u32 {
        groups
            .iter()
            .map(|g| self.mercenary_group_price(g))
            .fold(0u32, u32::saturating_add)
    }

    fn mercenary_group_price(&self, group: &UnitGroup) -> u32 {
        let percent = u64::from(self.options().mercenary_price);
        let price = u64::from(group.price(&self.rules)) * percent / 100;
        u32::try_from(price).unwrap_or(u32::MAX)
    }

    fn is_equippable(&self, unit_type: &UnitTypeId) -> bool {
        self.rules
            .unit_type(unit_type)
            .is_some_and(|t| t.has_ability(Ability::CanBeEquipped))
    }

    /// Gets a troop of two to three mercenaries.
    ///
    /// The troop size is `2 + rand(2)`, so four is never drawn.
    ///
    /// Each mercenary type is tried at most once, shrinking the group until
    /// the player can pay for it. When nothing is affordable a single unit of
    /// the last type tried is offered anyway, so the result is only empty when
    /// the ruleset has no mercenary types.
    pub fn mercenaries<R: RandomSource + ?Sized>(&self, player: &PlayerState, rng: &mut R) -> Result<Vec<UnitGroup>> {
        let mut count = rng.random_int(2) + 2;
        let mut pool: Vec<UnitTypeId> = self.capabilities.mercenary().to_vec();
        let mut mercs = Vec::new();
        let mut total = 0u32;
        let mut last_tried = None;

        while !pool.is_empty() && count > 0 {
            let unit_type = pool.remove(rng.random_int(pool.len() as u32) as usize);
            let role = if self.is_equippable(&unit_type) {
                if rng.random_int(2) == 0 {
                    self.capabilities.require_armed_role()?.clone()
                } else {
                    self.capabilities.require_mounted_role()?.clone()
                }
            } else {
                RoleId::default_role()
            };

            let mut n = rng.random_int(count.min(2)) + 1;
            while n > 0 {
                let group = UnitGroup::new(unit_type.clone(), role.clone(), n);
                let price = self.mercenary_group_price(&group);
                if player.check_gold(total.saturating_add(price)) {
                    total = total.saturating_add(price);
                    count = count.saturating_sub(n);
                    mercs.push(group);
                    break;
                }
                n -= 1;
            }
            last_tried = Some(unit_type);
        }

        if mercs.is_empty() {
            if let Some(unit_type) = last_tried {
                let role = if self.is_equippable(&unit_type) {
                    self.capabilities.require_armed_role()?.clone()
                } else {
                    RoleId::default_role()
                };
                mercs.push(UnitGroup::new(unit_type, role, 1));
            }
        }

        tracing::info!(
            "Mercenaries for {} (gold={}): {:?} at {}",
            self.player_id,
            player.gold,
            mercs,
            self.mercenary_price(&mercs)
        );
        Ok(mercs)
    }

    /// The Hessian offer: the whole mercenary force and its price.
    pub fn hessian_offer(&self) -> (Vec<UnitGroup>, u32) {
        let units: Vec<UnitGroup> = self.mercenary_force.units().cloned().collect();
        let price = self.mercenary_price(&units);
        (units, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crown_rules::{ForceTemplate, Ruleset};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn monarch() -> Monarch {
        let rules = Arc::new(Ruleset::classic().unwrap());
        Monarch::new(rules, &PlayerState::new("dutch"))
    }

    #[test]
    fn test_broke_player_still_gets_an_offer() {
        let monarch = monarch();
        let player = PlayerState::new("dutch");

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mercs = monarch.mercenaries(&player, &mut rng).unwrap();
            assert_eq!(mercs.len(), 1, "seed {}", seed);
            assert_eq!(mercs[0].count, 1);
        }
    }

    #[test]
    fn test_unaffordable_fallback_uses_last_type() {
        let monarch = monarch();
        let player = PlayerState::new("dutch");

        // veteranSoldier first, then artillery: artillery is the fallback
        let mut rng = ScriptedRandom::new();
        let mercs = monarch.mercenaries(&player, &mut rng).unwrap();
        assert_eq!(mercs, vec![UnitGroup::new("model.unit.artillery", "model.role.default", 1)]);

        // artillery first, then veteranSoldier armed
        let mut rng = ScriptedRandom::new().with_ints([0, 1]);
        let mercs = monarch.mercenaries(&player, &mut rng).unwrap();
        assert_eq!(mercs, vec![UnitGroup::new("model.unit.veteranSoldier", "model.role.soldier", 1)]);
    }

    #[test]
    fn test_rich_player_gets_full_troop() {
        let monarch = monarch();
        let player = PlayerState::new("dutch").with_gold(10_000);

        // three mercs; veteranSoldier mounted x2; then artillery x1
        let mut rng = ScriptedRandom::new().with_ints([1, 0, 1, 1]);
        let mercs = monarch.mercenaries(&player, &mut rng).unwrap();

        assert_eq!(
            mercs,
            vec![
                UnitGroup::new("model.unit.veteranSoldier", "model.role.dragoon", 2),
                UnitGroup::new("model.unit.artillery", "model.role.default", 1),
            ]
        );
        assert_eq!(monarch.mercenary_price(&mercs), 5100);
    }

    #[test]
    fn test_groups_shrink_to_fit_gold() {
        let monarch = monarch();
        let player = PlayerState::new("dutch").with_gold(3000);

        let mut rng = ScriptedRandom::new().with_ints([1, 0, 1, 1]);
        let mercs = monarch.mercenaries(&player, &mut rng).unwrap();

        // two dragoons cost 4600, one costs 2300
        assert_eq!(
            mercs,
            vec![
                UnitGroup::new("model.unit.veteranSoldier", "model.role.dragoon", 1),
                UnitGroup::new("model.unit.artillery", "model.role.default", 1),
            ]
        );
        assert!(player.check_gold(monarch.mercenary_price(&mercs)));
    }

    #[test]
    fn test_last_type_in_pool_takes_no_draw() {
        let monarch = monarch();
        let player = PlayerState::new("dutch").with_gold(10_000);

        // three mercs; veteranSoldier mounted x1; artillery is then the only
        // type left, so the next value sizes its group
        let mut rng = ScriptedRandom::new().with_ints([1, 0, 1, 0, 1]);
        let mercs = monarch.mercenaries(&player, &mut rng).unwrap();

        assert_eq!(
            mercs,
            vec![
                UnitGroup::new("model.unit.veteranSoldier", "model.role.dragoon", 1),
                UnitGroup::new("model.unit.artillery", "model.role.default", 2),
            ]
        );
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_mercenary_price_option_scales() {
        let base = Ruleset::classic().unwrap();
        let mut options = base.options().clone();
        options.mercenary_price = 150;
        let rules = Arc::new(base.with_options(options).unwrap());
        let monarch = Monarch::new(rules, &PlayerState::new("dutch"));

        let group = [UnitGroup::new("model.unit.artillery", "model.role.default", 2)];
        assert_eq!(monarch.mercenary_price(&group), 1500);
    }

    #[test]
    fn test_no_mercenary_types_yields_nothing() {
        let base = Ruleset::classic().unwrap();
        let types = base
            .unit_types()
            .iter()
            .cloned()
            .map(|mut t| {
                t.abilities.remove(&Ability::MercenaryUnit);
                t
            })
            .collect();
        let rules = Ruleset::new("no-mercs", base.options().clone(), types, base.roles().to_vec()).unwrap();
        let monarch = Monarch::new(Arc::new(rules), &PlayerState::new("dutch").with_gold(100_000));

        let mercs = monarch
            .mercenaries(&PlayerState::new("dutch").with_gold(100_000), &mut ScriptedRandom::new())
            .unwrap();
        assert!(mercs.is_empty());
    }

    #[test]
    fn test_hessian_offer_prices_mercenary_force() {
        let monarch = monarch();
        let (units, price) = monarch.hessian_offer();

        assert_eq!(units.len(), 4);
        // 2x(2000+150) + 2x(2000+300) + 2x500 + 5000
        assert_eq!(price, 4300 + 4600 + 1000 + 5000);
    }

    #[test]
    fn test_empty_mercenary_force_offers_nothing() {
        let base = Ruleset::classic().unwrap();
        let mut options = base.options().clone();
        options.mercenary_force = ForceTemplate::default();
        let rules = Arc::new(base.with_options(options).unwrap());
        let monarch = Monarch::new(rules, &PlayerState::new("dutch"));

        assert_eq!(monarch.hessian_offer(), (Vec::new(), 0));
    }
}
