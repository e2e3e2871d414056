use crate::monarch::{Monarch, MINIMUM_TAX_RATE};
use crate::player::PlayerState;
use crate::random::RandomSource;

impl Monarch {
    /// Calculates a tax raise. Returns the new tax rate.
    ///
    /// Rises grow slowly with the turn number and are capped at the
    /// maximum tax option.
    pub fn raise_tax<R: RandomSource + ?Sized>(&self, player: &PlayerState, turn: u32, rng: &mut R) -> u32 {
        let tax_adjustment = self.options().tax_adjustment;
        let adjust = (6u32.saturating_sub(tax_adjustment) * 10).max(1); // 10-60
        let rise = 1 + rng.random_int(5 + turn / adjust);
        let tax = player.tax.saturating_add(rise).min(self.tax_maximum());
        tracing::debug!("Tax rise for {}: {} -> {}", player.id, player.tax, tax);
        tax
    }

    /// Calculates a tax reduction. Returns the new tax rate, never below
    /// the minimum rate.
    pub fn lower_tax<R: RandomSource + ?Sized>(&self, player: &PlayerState, rng: &mut R) -> u32 {
        let tax_adjustment = self.options().tax_adjustment;
        let adjust = 10u32.saturating_sub(tax_adjustment).max(1); // 5-10
        let cut = 1 + rng.random_int(adjust);
        let tax = player.tax.saturating_sub(cut).max(MINIMUM_TAX_RATE);
        tracing::debug!("Tax reduction for {}: {} -> {}", player.id, player.tax, tax);
        tax
    }
}
