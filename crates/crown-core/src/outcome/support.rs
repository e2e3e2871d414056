use crown_rules::{RoleId, UnitGroup, UnitTypeId};

use crate::error::{MonarchError, Result, UnitCategory};
use crate::monarch::Monarch;
use crate::random::{pick_random, RandomSource};

impl Monarch {
    fn pick_type<R: RandomSource + ?Sized>(&self, category: UnitCategory, rng: &mut R) -> Result<UnitTypeId> {
        let types = self.capabilities.require(category)?;
        pick_random(rng, types)
            .cloned()
            .ok_or(MonarchError::MissingUnitCategory(category))
    }

    /// Gets additions to the colonial forces.
    ///
    /// Naval support is a single warship and marks sea support as given.
    /// Land support follows the monarch support option, from one soldier at
    /// 0 to artillery and two dragoons at 4.
    pub fn support<R: RandomSource + ?Sized>(&mut self, naval: bool, rng: &mut R) -> Result<Vec<UnitGroup>> {
        if naval {
            let ship = self.pick_type(UnitCategory::NavalSupport, rng)?;
            self.support_sea = true;
            tracing::info!("Naval support for {}: {}", self.player_id, ship);
            return Ok(vec![UnitGroup::new(ship, RoleId::default_role(), 1)]);
        }

        let mut support = Vec::new();
        match self.options().monarch_support {
            4 => {
                support.push(UnitGroup::new(
                    self.pick_type(UnitCategory::BombardSupport, rng)?,
                    RoleId::default_role(),
                    1,
                ));
                support.push(self.mounted_support(2, rng)?);
            }
            3 => {
                support.push(self.mounted_support(2, rng)?);
                support.push(self.armed_support(1, rng)?);
            }
            2 => support.push(self.mounted_support(2, rng)?),
            1 => {
                support.push(self.mounted_support(1, rng)?);
                support.push(self.armed_support(1, rng)?);
            }
            0 => support.push(self.armed_support(1, rng)?),
            _ => {}
        }
        tracing::info!("Land support for {}: {:?}", self.player_id, support);
        Ok(support)
    }

    fn mounted_support<R: RandomSource + ?Sized>(&self, count: u32, rng: &mut R) -> Result<UnitGroup> {
        let unit_type = self.pick_type(UnitCategory::LandSupport, rng)?;
        let role = self.capabilities.require_mounted_role()?.clone();
        Ok(UnitGroup::new(unit_type, role, count))
    }

    fn armed_support<R: RandomSource + ?Sized>(&self, count: u32, rng: &mut R) -> Result<UnitGroup> {
        let unit_type = self.pick_type(UnitCategory::LandSupport, rng)?;
        let role = self.capabilities.require_armed_role()?.clone();
        Ok(UnitGroup::new(unit_type, role, count))
    }

    /// Checks whether the monarch backs a war, and with what.
    ///
    /// `strength_ratio` is our strength relative to the combined strength of
    /// us and the new enemy, in `[0, 1]`. Support is certain at 0.5 or below
    /// and never given from 0.6. Offered group sizes vary by one either way;
    /// groups that shrink to nothing are left out.
    pub fn war_support<R: RandomSource + ?Sized>(&self, strength_ratio: f64, rng: &mut R) -> Vec<UnitGroup> {
        // 10 * (0.6 - ratio)
        let p = 6.0 - 10.0 * strength_ratio;
        if !(p >= 1.0 || p > rng.random_double()) {
            tracing::debug!("No war support for {} (p={:.2})", self.player_id, p);
            return Vec::new();
        }

        let offer: Vec<UnitGroup> = self
            .war_support_force
            .units()
            .filter_map(|group| {
                let count = (group.count + rng.random_int(3)).saturating_sub(1);
                (count > 0).then(|| UnitGroup {
                    count,
                    ..group.clone()
                })
            })
            .collect();
        tracing::info!("War support for {} (p={:.2}): {:?}", self.player_id, p, offer);
        offer
    }
}
