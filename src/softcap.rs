//! Equipment soft cap.
//!
//! Bounds the summed equipment bonus of a single stat. Below the threshold
//! the bonus is untouched; above it the excess is discounted. The function
//! is continuous at the threshold and non-decreasing in its input.

use crate::config::EngineConfig;

/// Cap parameters for one character state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftCap {
    pub cap_factor: f64,
    pub threshold: f64,
    /// Fraction of the excess that survives, within `[base, max_discount]`.
    pub discount_rate: f64,
}

impl SoftCap {
    /// Derive the cap for a tier, tier level and number of equipped items.
    ///
    /// `cap_factor = tier_base_factor × (1 + (level-1) × 0.01) × slot_factor`
    /// where `slot_factor = max(0.5, 1 - (count - 8) × 0.05)`.
    pub fn new(config: &EngineConfig, tier: usize, tier_level: u32, equipped_count: usize) -> Self {
        let balance = &config.balance;
        let level = balance.clamp_level(tier_level);
        let level_factor = 1.0 + (level - 1) as f64 * balance.soft_cap_level_step;
        let extra_items = equipped_count as f64 - balance.soft_cap_free_slots as f64;
        let slot_factor =
            (1.0 - extra_items * balance.soft_cap_slot_penalty).max(balance.soft_cap_min_slot_factor);

        let cap_factor = config.tiers.base_factor(tier) * level_factor * slot_factor;
        let threshold = balance.soft_cap_threshold * cap_factor;
        let discount_rate = (balance.soft_cap_discount_base
            + cap_factor * balance.soft_cap_discount_slope)
            .max(balance.soft_cap_discount_base)
            .min(balance.soft_cap_max_discount);

        Self {
            cap_factor,
            threshold,
            discount_rate,
        }
    }

    /// Apply the cap to a raw bonus.
    pub fn apply(&self, raw_bonus: f64) -> f64 {
        if raw_bonus.is_nan() {
            return 0.0;
        }
        if raw_bonus <= self.threshold {
            return raw_bonus;
        }
        let excess = raw_bonus - self.threshold;
        // Truncation must not dip below a fractional threshold.
        (self.threshold + excess * self.discount_rate)
            .floor()
            .max(self.threshold)
    }
}

/// Soft-cap a raw per-stat equipment bonus.
///
/// # Examples
///
/// ```rust
/// use realmstat::softcap::apply_soft_cap;
/// use realmstat::EngineConfig;
///
/// let config = EngineConfig::default();
/// // Tier 2, level 1, 12 items: threshold 560, discount 0.668.
/// assert_eq!(apply_soft_cap(&config, 400.0, 2, 1, 12), 400.0);
/// assert_eq!(apply_soft_cap(&config, 5000.0, 2, 1, 12), 3525.0);
/// ```
pub fn apply_soft_cap(
    config: &EngineConfig,
    raw_bonus: f64,
    tier: usize,
    tier_level: u32,
    equipped_count: usize,
) -> f64 {
    SoftCap::new(config, tier, tier_level, equipped_count).apply(raw_bonus)
}
