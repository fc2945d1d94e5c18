//! Item valuation.
//!
//! The sell price of an item is
//! `floor((base_price + attribute_value + equipment_bonus) × level_multiplier × type_multiplier)`,
//! never below 1. Any non-finite intermediate result also yields 1.

use crate::config::EngineConfig;
use crate::effect::Effect;
use crate::item::Item;
use serde::{Deserialize, Serialize};

/// The terms of an item's sell price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: f64,
    /// Weighted effect value scaled by the rarity multiplier.
    pub attribute_value: f64,
    /// Extra value for equippable items, a fraction of the base price.
    pub equipment_bonus: f64,
    /// `1 + enchant_level × enchant_step`.
    pub level_multiplier: f64,
    pub type_multiplier: f64,
}

impl PriceBreakdown {
    /// Compute the breakdown for an item.
    pub fn new(config: &EngineConfig, item: &Item) -> Self {
        let valuation = &config.valuation;
        let rarity = config.rarity(item.rarity);

        let base_price = rarity.sell_base_price;
        let weighted = weighted_sum(&item.effect, &valuation.temporary_weights)
            + weighted_sum(&item.permanent_effect, &valuation.permanent_weights);
        let attribute_value = weighted * rarity.sell_base_multiplier;
        let equipment_bonus = if item.equippable {
            base_price
                * valuation
                    .equipment_bonus
                    .get(&item.category)
                    .copied()
                    .unwrap_or(0.0)
        } else {
            0.0
        };
        let level_multiplier = 1.0 + item.enchant_level as f64 * valuation.enchant_step;
        let type_multiplier = valuation
            .type_multipliers
            .get(&item.category)
            .copied()
            .unwrap_or(1.0);

        Self {
            base_price,
            attribute_value,
            equipment_bonus,
            level_multiplier,
            type_multiplier,
        }
    }

    /// Unfloored price.
    pub fn raw_price(&self) -> f64 {
        (self.base_price + self.attribute_value + self.equipment_bonus)
            * self.level_multiplier
            * self.type_multiplier
    }

    /// Final sell price, at least 1.
    pub fn price(&self) -> u64 {
        floor_price(self.raw_price())
    }
}

/// Sum of `value × weight` over fields present in both bundles.
fn weighted_sum(effect: &Effect, weights: &Effect) -> f64 {
    effect
        .iter()
        .filter_map(|(field, value)| weights.get(field).map(|weight| value * weight))
        .sum()
}

fn floor_price(raw: f64) -> u64 {
    if !raw.is_finite() {
        tracing::debug!(raw, "degenerate price replaced by floor");
        return 1;
    }
    if raw < 1.0 {
        return 1;
    }
    raw.floor() as u64
}

/// Sell price of an item.
///
/// # Examples
///
/// ```rust
/// use realmstat::valuation::compute_sell_price;
/// use realmstat::{EngineConfig, Item, ItemCategory};
///
/// let config = EngineConfig::default();
/// let junk = Item::new("j", "Broken Tile", ItemCategory::Material);
/// // floor(10 * 0.3)
/// assert_eq!(compute_sell_price(&config, &junk), 3);
/// ```
pub fn compute_sell_price(config: &EngineConfig, item: &Item) -> u64 {
    PriceBreakdown::new(config, item).price()
}

/// Shop price of an item: the sell price times the buy markup, at least 1.
pub fn compute_buy_price(config: &EngineConfig, item: &Item) -> u64 {
    let sell = compute_sell_price(config, item) as f64;
    floor_price(sell * config.valuation.buy_markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EquipSlot, ItemCategory};
    use crate::rarity::Rarity;
    use crate::stat::EffectField;

    #[test]
    fn test_plain_consumable() {
        let config = EngineConfig::default();
        let pill = Item::new("p", "Plain Pill", ItemCategory::Consumable);
        // floor(10 * 0.5)
        assert_eq!(compute_sell_price(&config, &pill), 5);
    }

    #[test]
    fn test_weighted_attributes() {
        let config = EngineConfig::default();
        let pill = Item::new("p", "Ox Pill", ItemCategory::Consumable)
            .with_rarity(Rarity::Rare)
            .with_effect(Effect::new().with(EffectField::Attack, 10.0))
            .with_permanent_effect(Effect::new().with(EffectField::Lifespan, 2.0));
        let breakdown = PriceBreakdown::new(&config, &pill);
        // (10 * 2 + 2 * 5) * 1.5
        assert_eq!(breakdown.attribute_value, 45.0);
        // (50 + 45) * 0.5
        assert_eq!(breakdown.price(), 47);
    }

    #[test]
    fn test_equipment_bonus_and_enchant() {
        let config = EngineConfig::default();
        let sword = Item::new("s", "Frost Edge", ItemCategory::Weapon)
            .with_slot(EquipSlot::Weapon)
            .with_enchant_level(5)
            .with_effect(Effect::new().with(EffectField::Attack, 5.0));
        let breakdown = PriceBreakdown::new(&config, &sword);
        assert_eq!(breakdown.equipment_bonus, 15.0);
        assert_eq!(breakdown.level_multiplier, 2.0);
        // (10 + 10 + 15) * 2
        assert_eq!(breakdown.price(), 70);
    }

    #[test]
    fn test_floor_of_one() {
        let mut config = EngineConfig::default();
        config.rarities.common.sell_base_price = 0.0;
        let dust = Item::new("d", "Dust", ItemCategory::Material);
        assert_eq!(compute_sell_price(&config, &dust), 1);
    }

    #[test]
    fn test_nan_forces_floor() {
        let config = EngineConfig::default();
        let cursed = Item::new("c", "Void Shard", ItemCategory::Material)
            .with_effect(Effect::new().with(EffectField::Attack, f64::NAN));
        assert_eq!(compute_sell_price(&config, &cursed), 1);

        let infinite = Item::new("i", "Endless Scroll", ItemCategory::Recipe)
            .with_effect(Effect::new().with(EffectField::Exp, f64::INFINITY));
        assert_eq!(compute_sell_price(&config, &infinite), 1);
    }

    #[test]
    fn test_buy_price_markup() {
        let config = EngineConfig::default();
        let pill = Item::new("p", "Plain Pill", ItemCategory::Consumable);
        assert_eq!(compute_buy_price(&config, &pill), 10);
    }
}
