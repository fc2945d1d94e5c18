//! Engine configuration.
//!
//! All static tables and balance constants live in an [`EngineConfig`]
//! that is built once and handed to the engine. Every table implements
//! `Default` with the standard balance values and deserializes with
//! `#[serde(default)]`, so a JSON document only needs to name what it
//! overrides.

use crate::effect::Effect;
use crate::error::ConfigError;
use crate::item::ItemCategory;
use crate::rarity::Rarity;
use crate::stat::EffectField;
use crate::tier::TierScaleTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fraction range of the tier base value an item of a rarity targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

impl PercentRange {
    /// Range from `min` to `max`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range.
    pub fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Per-rarity balance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityConfig {
    pub percent_range: PercentRange,
    /// Absolute equipment floors, scaled by the tier multiplier.
    pub equipment_floor_stats: Effect,
    /// Minimum values for scaled consumables.
    pub consumable_floor_stats: Effect,
    /// Base sell price.
    pub sell_base_price: f64,
    /// Multiplier on the attribute value of an item.
    pub sell_base_multiplier: f64,
}

impl RarityConfig {
    fn standard(
        range: (f64, f64),
        equipment: [f64; 6],
        consumable: [f64; 5],
        price: f64,
        multiplier: f64,
    ) -> Self {
        let [attack, defense, hp, spirit, physique, speed] = equipment;
        let equipment_floor_stats = Effect::new()
            .with(EffectField::Attack, attack)
            .with(EffectField::Defense, defense)
            .with(EffectField::Hp, hp)
            .with(EffectField::MaxHp, hp)
            .with(EffectField::Spirit, spirit)
            .with(EffectField::Physique, physique)
            .with(EffectField::Speed, speed);
        let [hp, max_hp, exp, spirit, physique] = consumable;
        let consumable_floor_stats = Effect::new()
            .with(EffectField::Hp, hp)
            .with(EffectField::MaxHp, max_hp)
            .with(EffectField::Exp, exp)
            .with(EffectField::Spirit, spirit)
            .with(EffectField::Physique, physique);
        Self {
            percent_range: PercentRange::new(range.0, range.1),
            equipment_floor_stats,
            consumable_floor_stats,
            sell_base_price: price,
            sell_base_multiplier: multiplier,
        }
    }
}

/// Balance data for every rarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityTable {
    pub common: RarityConfig,
    pub rare: RarityConfig,
    pub legendary: RarityConfig,
    pub immortal: RarityConfig,
}

impl Default for RarityTable {
    fn default() -> Self {
        Self {
            common: RarityConfig::standard(
                (0.05, 0.10),
                [5.0, 3.0, 30.0, 3.0, 3.0, 2.0],
                [20.0, 5.0, 10.0, 1.0, 1.0],
                10.0,
                1.0,
            ),
            rare: RarityConfig::standard(
                (0.10, 0.20),
                [12.0, 8.0, 75.0, 8.0, 8.0, 5.0],
                [60.0, 15.0, 40.0, 3.0, 3.0],
                50.0,
                1.5,
            ),
            legendary: RarityConfig::standard(
                (0.20, 0.35),
                [30.0, 20.0, 200.0, 20.0, 20.0, 12.0],
                [200.0, 50.0, 150.0, 8.0, 8.0],
                200.0,
                2.5,
            ),
            immortal: RarityConfig::standard(
                (0.35, 0.50),
                [80.0, 50.0, 500.0, 50.0, 50.0, 30.0],
                [600.0, 150.0, 500.0, 20.0, 20.0],
                1000.0,
                4.0,
            ),
        }
    }
}

impl RarityTable {
    /// Configuration of one rarity.
    pub fn get(&self, rarity: Rarity) -> &RarityConfig {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Rare => &self.rare,
            Rarity::Legendary => &self.legendary,
            Rarity::Immortal => &self.immortal,
        }
    }

    /// Check every percentage range is non-negative and ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rarity in Rarity::ALL {
            let range = self.get(rarity).percent_range;
            if !(range.min >= 0.0 && range.max >= range.min) {
                return Err(ConfigError::InvalidPercentRange {
                    rarity,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

/// Tuning constants for scaling, soft cap and synergy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceParams {
    /// Lower clamp of a scaled equipment stat, as a fraction of target.
    pub equipment_floor_ratio: f64,
    /// Ceiling headroom over the tier-scaled rarity floor.
    pub equipment_ceiling_ratio: f64,
    /// Per tier-level growth of scaled values.
    pub level_step: f64,
    pub max_tier_level: u32,

    pub soft_cap_threshold: f64,
    pub soft_cap_level_step: f64,
    /// Equipped items beyond this count tighten the cap.
    pub soft_cap_free_slots: u32,
    pub soft_cap_slot_penalty: f64,
    pub soft_cap_min_slot_factor: f64,
    pub soft_cap_discount_base: f64,
    pub soft_cap_discount_slope: f64,
    pub soft_cap_max_discount: f64,

    pub synergy_level_step: f64,
    pub synergy_magnitude_numerator: f64,
    pub synergy_magnitude_offset: f64,
    pub synergy_min_damping: f64,
    pub synergy_max_damping: f64,
    pub synergy_cap: f64,

    pub natal_multiplier: f64,
    /// Divisor turning a root/affinity dot product into a bonus fraction.
    pub root_affinity_scale: f64,
    /// Exp-rate multiplier per technique grade, indexed by grade.
    pub grade_exp_multipliers: [f64; 5],
}

impl Default for BalanceParams {
    fn default() -> Self {
        Self {
            equipment_floor_ratio: 0.8,
            equipment_ceiling_ratio: 1.5,
            level_step: 0.08,
            max_tier_level: 9,
            soft_cap_threshold: 1000.0,
            soft_cap_level_step: 0.01,
            soft_cap_free_slots: 8,
            soft_cap_slot_penalty: 0.05,
            soft_cap_min_slot_factor: 0.5,
            soft_cap_discount_base: 0.5,
            soft_cap_discount_slope: 0.3,
            soft_cap_max_discount: 0.8,
            synergy_level_step: 0.005,
            synergy_magnitude_numerator: 100_000.0,
            synergy_magnitude_offset: 10_000.0,
            synergy_min_damping: 0.5,
            synergy_max_damping: 1.0,
            synergy_cap: 10.0,
            natal_multiplier: 1.5,
            root_affinity_scale: 100.0,
            grade_exp_multipliers: [1.0, 1.2, 1.5, 2.0, 3.0],
        }
    }
}

impl BalanceParams {
    /// Clamp a tier level into `1..=max_tier_level`.
    pub fn clamp_level(&self, tier_level: u32) -> u32 {
        let clamped = tier_level.clamp(1, self.max_tier_level.max(1));
        if clamped != tier_level {
            tracing::debug!(tier_level, clamped, "tier level out of range");
        }
        clamped
    }

    /// `1 + (level - 1) * level_step`.
    pub fn level_multiplier(&self, tier_level: u32) -> f64 {
        1.0 + (self.clamp_level(tier_level) - 1) as f64 * self.level_step
    }

    /// Check every tuning parameter is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("equipmentFloorRatio", self.equipment_floor_ratio),
            ("equipmentCeilingRatio", self.equipment_ceiling_ratio),
            ("softCapThreshold", self.soft_cap_threshold),
            ("softCapMinSlotFactor", self.soft_cap_min_slot_factor),
            ("softCapDiscountBase", self.soft_cap_discount_base),
            ("softCapMaxDiscount", self.soft_cap_max_discount),
            ("synergyMagnitudeOffset", self.synergy_magnitude_offset),
            ("synergyMinDamping", self.synergy_min_damping),
            ("synergyCap", self.synergy_cap),
            ("natalMultiplier", self.natal_multiplier),
            ("rootAffinityScale", self.root_affinity_scale),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Weights and factors for item valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationTable {
    /// Per-field weight of temporary effects.
    pub temporary_weights: Effect,
    /// Per-field weight of permanent effects.
    pub permanent_weights: Effect,
    /// Fraction of the base price added for equippable items, by category.
    pub equipment_bonus: BTreeMap<ItemCategory, f64>,
    /// Price discount by category; absent categories use 1.0.
    pub type_multipliers: BTreeMap<ItemCategory, f64>,
    pub enchant_step: f64,
    pub buy_markup: f64,
}

impl Default for ValuationTable {
    fn default() -> Self {
        let temporary_weights = Effect::new()
            .with(EffectField::Attack, 2.0)
            .with(EffectField::Defense, 1.5)
            .with(EffectField::Hp, 0.5)
            .with(EffectField::MaxHp, 0.5)
            .with(EffectField::Spirit, 1.5)
            .with(EffectField::Physique, 1.5)
            .with(EffectField::Speed, 2.0)
            .with(EffectField::Exp, 0.1);
        let permanent_weights = Effect::new()
            .with(EffectField::Attack, 8.0)
            .with(EffectField::Defense, 6.0)
            .with(EffectField::Hp, 2.5)
            .with(EffectField::MaxHp, 2.5)
            .with(EffectField::Spirit, 6.0)
            .with(EffectField::Physique, 6.0)
            .with(EffectField::Speed, 8.0)
            .with(EffectField::Exp, 0.3)
            .with(EffectField::Lifespan, 5.0)
            .with(EffectField::MaxLifespan, 5.0);
        let equipment_bonus = BTreeMap::from([
            (ItemCategory::Weapon, 1.5),
            (ItemCategory::Armor, 1.2),
            (ItemCategory::Artifact, 2.0),
            (ItemCategory::Ring, 1.3),
            (ItemCategory::Accessory, 1.3),
        ]);
        let type_multipliers = BTreeMap::from([
            (ItemCategory::Consumable, 0.5),
            (ItemCategory::Recipe, 0.5),
            (ItemCategory::Material, 0.3),
        ]);
        Self {
            temporary_weights,
            permanent_weights,
            equipment_bonus,
            type_multipliers,
            enchant_step: 0.2,
            buy_markup: 2.0,
        }
    }
}

/// The full set of static tables the engine reads.
///
/// # Examples
///
/// ```rust
/// use realmstat::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{"balance": {"synergyCap": 6.0}}"#).unwrap();
/// assert_eq!(config.balance.synergy_cap, 6.0);
/// // Everything not named keeps its default.
/// assert_eq!(config.balance.soft_cap_threshold, 1000.0);
/// assert_eq!(config.tiers.len(), 9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tiers: TierScaleTable,
    pub rarities: RarityTable,
    pub balance: BalanceParams,
    pub valuation: ValuationTable,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiers.validate()?;
        self.rarities.validate()?;
        self.balance.validate()
    }

    /// Configuration of one rarity.
    pub fn rarity(&self, rarity: Rarity) -> &RarityConfig {
        self.rarities.get(rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_percent_range_mean() {
        assert!((PercentRange::new(0.1, 0.2).mean() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_rarity_ranges_ascend() {
        let table = RarityTable::default();
        for pair in Rarity::ALL.windows(2) {
            assert!(table.get(pair[0]).percent_range.max <= table.get(pair[1]).percent_range.max);
            assert!(table.get(pair[0]).sell_base_price < table.get(pair[1]).sell_base_price);
        }
    }

    #[test]
    fn test_level_multiplier_clamps() {
        let balance = BalanceParams::default();
        assert_eq!(balance.level_multiplier(1), 1.0);
        assert!((balance.level_multiplier(5) - 1.32).abs() < 1e-12);
        assert_eq!(balance.level_multiplier(0), 1.0);
        assert_eq!(balance.level_multiplier(40), balance.level_multiplier(9));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = r#"{"rarities": {"rare": {
            "percentRange": {"min": 0.3, "max": 0.1},
            "equipmentFloorStats": {},
            "consumableFloorStats": {},
            "sellBasePrice": 50,
            "sellBaseMultiplier": 1.5
        }}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::InvalidPercentRange { rarity: Rarity::Rare, .. })
        ));
    }

    #[test]
    fn test_non_positive_parameter_rejected() {
        let json = r#"{"balance": {"synergyCap": 0}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::NonPositiveParameter { name: "synergyCap", .. })
        ));
    }

    #[test]
    fn test_category_keyed_maps_round_trip_json() {
        let table = ValuationTable::default();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"artifact\":2.0"));
        let back: ValuationTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
