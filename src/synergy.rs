//! Method-count synergy.
//!
//! Characters who have mastered several cultivation methods receive a
//! multiplier on their final stats. The raw multiplier comes from a
//! pluggable [`MethodCountCurve`]; the [`SynergyLimit`] then damps it by
//! tier, tier level and current power so strong characters gain
//! proportionally less.

use crate::bundle::StatBundle;
use crate::character::Character;
use crate::config::EngineConfig;
use crate::engine::Engine;
use serde::{Deserialize, Serialize};

/// Raw multiplier as a function of mastered method count.
///
/// Implementations must be pure. Values below 1 are treated as 1.
pub trait MethodCountCurve: Send + Sync {
    /// Multiplier before damping.
    fn multiplier(&self, method_count: u32) -> f64;

    /// Human-readable description.
    fn description(&self) -> String {
        "custom method curve".to_string()
    }
}

/// `(1 + per_method) ^ method_count`.
///
/// # Examples
///
/// ```rust
/// use realmstat::synergy::{CompoundingCurve, MethodCountCurve};
///
/// let curve = CompoundingCurve::default();
/// assert_eq!(curve.multiplier(0), 1.0);
/// assert!((curve.multiplier(2) - 1.1025).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundingCurve {
    pub per_method: f64,
}

impl Default for CompoundingCurve {
    fn default() -> Self {
        Self { per_method: 0.05 }
    }
}

impl MethodCountCurve for CompoundingCurve {
    fn multiplier(&self, method_count: u32) -> f64 {
        let exponent = i32::try_from(method_count).unwrap_or(i32::MAX);
        (1.0 + self.per_method).powi(exponent)
    }

    fn description(&self) -> String {
        format!("+{:.0}% compounding per method", self.per_method * 100.0)
    }
}

impl<F> MethodCountCurve for F
where
    F: Fn(u32) -> f64 + Send + Sync,
{
    fn multiplier(&self, method_count: u32) -> f64 {
        self(method_count)
    }
}

/// Damping applied to a raw method multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyLimit {
    /// `tier_base_factor × level_factor × magnitude_damping`.
    pub limit_factor: f64,
    /// Upper bound of the effective multiplier.
    pub cap: f64,
}

impl SynergyLimit {
    /// Derive the limit for a tier, tier level and pre-synergy stats.
    pub fn new(config: &EngineConfig, tier: usize, tier_level: u32, stats: &StatBundle) -> Self {
        let balance = &config.balance;
        let level = balance.clamp_level(tier_level);
        let level_factor = 1.0 + (level - 1) as f64 * balance.synergy_level_step;
        let damping = (balance.synergy_magnitude_numerator
            / (stats.magnitude() + balance.synergy_magnitude_offset))
            .max(balance.synergy_min_damping)
            .min(balance.synergy_max_damping);

        Self {
            limit_factor: config.tiers.base_factor(tier) * level_factor * damping,
            cap: balance.synergy_cap,
        }
    }

    /// Effective multiplier `1 + (raw - 1) × limit_factor`, within `[1, cap]`.
    pub fn apply(&self, raw: f64) -> f64 {
        let raw = if raw.is_nan() { 1.0 } else { raw.max(1.0) };
        let effective = 1.0 + (raw - 1.0) * self.limit_factor;
        effective.min(self.cap).max(1.0)
    }
}

/// Outcome of the synergy stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyOutcome {
    pub raw_multiplier: f64,
    pub effective_multiplier: f64,
    pub stats: StatBundle,
}

/// Apply the method-count multiplier to `stats`.
///
/// Returns `None` for a character with no mastered methods; `stats` is then
/// final as-is.
///
/// # Examples
///
/// ```rust
/// use realmstat::synergy::{apply_method_synergy, CompoundingCurve};
/// use realmstat::{EngineConfig, StatBundle};
///
/// let config = EngineConfig::default();
/// let stats = StatBundle::new(200, 100, 2000, 200, 200, 80);
/// let outcome = apply_method_synergy(&config, &CompoundingCurve::default(), 2, 1, 4, &stats).unwrap();
/// assert!(outcome.effective_multiplier > 1.0);
/// assert!(outcome.effective_multiplier < outcome.raw_multiplier);
/// assert!(outcome.stats.attack > stats.attack);
/// ```
pub fn apply_method_synergy(
    config: &EngineConfig,
    curve: &dyn MethodCountCurve,
    tier: usize,
    tier_level: u32,
    method_count: u32,
    stats: &StatBundle,
) -> Option<SynergyOutcome> {
    if method_count == 0 {
        return None;
    }
    let raw_multiplier = curve.multiplier(method_count);
    let limit = SynergyLimit::new(config, tier, tier_level, stats);
    let effective_multiplier = limit.apply(raw_multiplier);
    tracing::trace!(
        method_count,
        raw_multiplier,
        effective_multiplier,
        limit_factor = limit.limit_factor,
        "method synergy"
    );
    Some(SynergyOutcome {
        raw_multiplier,
        effective_multiplier,
        stats: stats.map(|_, value| value * effective_multiplier),
    })
}

/// Apply the engine's method-count curve for a character to `stats`.
pub fn apply_method_count_bonus(engine: &Engine, stats: &StatBundle, character: &Character) -> StatBundle {
    apply_method_synergy(
        engine.config(),
        engine.method_curve(),
        character.tier,
        character.tier_level,
        character.method_count,
        stats,
    )
    .map_or(*stats, |outcome| outcome.stats)
}
