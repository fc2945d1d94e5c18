//! Tier scaling of item effects.
//!
//! Equipment is scaled toward a target band derived from the tier's base
//! attributes and the rarity's percentage range. Consumables are scaled by
//! the plain tier and level multiplier and then raised to the rarity's
//! floors. Both scalers return new bundles and never fail: unknown tiers
//! use tier 0 values and an empty bundle comes back unchanged.

use crate::config::EngineConfig;
use crate::effect::Effect;
use crate::rarity::Rarity;
use crate::stat::EffectField;

/// The clamp band of a single scaled equipment field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentBounds {
    /// Multiplier applied to the raw value.
    pub tier_multiplier: f64,
    /// Formula target: base × mean(range) × level × tier multiplier.
    pub target: f64,
    /// Lowest value a scaled field can take.
    pub floor: f64,
    /// Highest value a scaled field can take.
    pub ceiling: f64,
}

/// Compute the clamp band of `field`, `None` for pass-through fields.
///
/// # Examples
///
/// ```rust
/// use realmstat::scaling::equipment_bounds;
/// use realmstat::{EffectField, EngineConfig, Rarity};
///
/// let config = EngineConfig::default();
/// let bounds = equipment_bounds(&config, EffectField::Attack, 0, 1, Rarity::Common).unwrap();
/// assert_eq!(bounds.floor, 5.0);
/// assert_eq!(bounds.ceiling, 7.5);
/// assert!(equipment_bounds(&config, EffectField::Exp, 0, 1, Rarity::Common).is_none());
/// ```
pub fn equipment_bounds(
    config: &EngineConfig,
    field: EffectField,
    tier: usize,
    tier_level: u32,
    rarity: Rarity,
) -> Option<EquipmentBounds> {
    if field.is_equipment_passthrough() {
        return None;
    }
    let base = config.tiers.base_value(tier, field)?;
    let balance = &config.balance;
    let rarity_config = config.rarity(rarity);

    let level_multiplier = balance.level_multiplier(tier_level);
    let tier_multiplier = config.tiers.multiplier(tier);
    let scale = base * level_multiplier * tier_multiplier;

    let target = scale * rarity_config.percent_range.mean();
    let formula_max = scale * rarity_config.percent_range.max;
    let rarity_floor =
        rarity_config.equipment_floor_stats.get(field).unwrap_or(0.0) * tier_multiplier;

    let floor = (target * balance.equipment_floor_ratio).max(rarity_floor);
    let ceiling = formula_max
        .max(rarity_floor * balance.equipment_ceiling_ratio)
        .max(floor);

    Some(EquipmentBounds {
        tier_multiplier,
        target,
        floor,
        ceiling,
    })
}

/// Rescale an equipment effect to a tier, tier level and rarity.
///
/// Every power field is multiplied by the tier multiplier, then clamped into
/// its [`EquipmentBounds`] and truncated. `exp` and lifespan fields pass
/// through unscaled.
///
/// # Examples
///
/// ```rust
/// use realmstat::scaling::scale_equipment;
/// use realmstat::{Effect, EffectField, EngineConfig, Rarity};
///
/// let config = EngineConfig::default();
/// let raw = Effect::new().with(EffectField::Attack, 10.0).with(EffectField::Exp, 3.0);
/// let scaled = scale_equipment(&config, &raw, 0, 1, Rarity::Common);
/// assert_eq!(scaled.get(EffectField::Attack), Some(7.0));
/// assert_eq!(scaled.get(EffectField::Exp), Some(3.0));
/// ```
pub fn scale_equipment(
    config: &EngineConfig,
    effect: &Effect,
    tier: usize,
    tier_level: u32,
    rarity: Rarity,
) -> Effect {
    if effect.is_empty() {
        return effect.clone();
    }
    effect.map_fields(|field, value| {
        let Some(bounds) = equipment_bounds(config, field, tier, tier_level, rarity) else {
            return Some(value);
        };
        // f64::max ignores a NaN operand, so degenerate input lands on the floor.
        let scaled = (value * bounds.tier_multiplier)
            .max(bounds.floor)
            .min(bounds.ceiling);
        Some(scaled.floor().max(0.0))
    })
}

/// Integer `[floor, ceiling]` a scaled equipment field can take.
pub fn equipment_range(
    config: &EngineConfig,
    field: EffectField,
    tier: usize,
    tier_level: u32,
    rarity: Rarity,
) -> Option<(u64, u64)> {
    equipment_bounds(config, field, tier, tier_level, rarity).map(|bounds| {
        (
            crate::bundle::to_stat(bounds.floor),
            crate::bundle::to_stat(bounds.ceiling),
        )
    })
}

/// Rescale a consumable's temporary and permanent effects.
///
/// Both bundles are multiplied by `tier multiplier × level multiplier` and
/// truncated, except lifespan fields which do not depend on tier. Fields
/// with a configured consumable floor are raised to it.
///
/// # Examples
///
/// ```rust
/// use realmstat::scaling::scale_consumable;
/// use realmstat::{Effect, EffectField, EngineConfig, Rarity};
///
/// let config = EngineConfig::default();
/// let pill = Effect::new().with(EffectField::Exp, 100.0).with(EffectField::Lifespan, 5.0);
/// let (effect, permanent) = scale_consumable(&config, &pill, &Effect::new(), 1, 1, Rarity::Common);
/// assert_eq!(effect.get(EffectField::Exp), Some(150.0));
/// assert_eq!(effect.get(EffectField::Lifespan), Some(5.0));
/// assert!(permanent.is_empty());
/// ```
pub fn scale_consumable(
    config: &EngineConfig,
    effect: &Effect,
    permanent_effect: &Effect,
    tier: usize,
    tier_level: u32,
    rarity: Rarity,
) -> (Effect, Effect) {
    let total_multiplier =
        config.tiers.multiplier(tier) * config.balance.level_multiplier(tier_level);
    let floors = &config.rarity(rarity).consumable_floor_stats;

    let scale_bundle = |bundle: &Effect| -> Effect {
        if bundle.is_empty() {
            return bundle.clone();
        }
        bundle.map_fields(|field, value| {
            if field.is_tier_independent() {
                return Some(value);
            }
            let mut scaled = (value * total_multiplier).floor();
            if scaled.is_nan() || scaled < 0.0 {
                scaled = 0.0;
            }
            if let Some(min) = floors.get(field) {
                scaled = scaled.max(min);
            }
            Some(scaled)
        })
    };

    (scale_bundle(effect), scale_bundle(permanent_effect))
}
