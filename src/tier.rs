//! Tier scale table.
//!
//! Static per-tier base attributes, the ascending tier multiplier sequence
//! and the tier base factor used by the soft cap and synergy limiter.
//! Lookups never fail: unknown tiers fall back to tier 0 (base values and
//! base factor) or to a neutral multiplier of 1.

use crate::error::ConfigError;
use crate::stat::EffectField;
use serde::{Deserialize, Serialize};

/// Base attribute values of a single tier (realm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBase {
    pub name: String,
    pub base_attack: f64,
    pub base_defense: f64,
    pub base_max_hp: f64,
    pub base_spirit: f64,
    pub base_physique: f64,
    pub base_speed: f64,
}

impl TierBase {
    fn realm(name: &str, values: [f64; 6]) -> Self {
        let [attack, defense, max_hp, spirit, physique, speed] = values;
        Self {
            name: name.to_string(),
            base_attack: attack,
            base_defense: defense,
            base_max_hp: max_hp,
            base_spirit: spirit,
            base_physique: physique,
            base_speed: speed,
        }
    }

    /// Base value for a power field, `None` for exp and lifespan fields.
    pub fn value(&self, field: EffectField) -> Option<f64> {
        match field {
            EffectField::Attack => Some(self.base_attack),
            EffectField::Defense => Some(self.base_defense),
            EffectField::Hp | EffectField::MaxHp => Some(self.base_max_hp),
            EffectField::Spirit => Some(self.base_spirit),
            EffectField::Physique => Some(self.base_physique),
            EffectField::Speed => Some(self.base_speed),
            EffectField::Exp | EffectField::Lifespan | EffectField::MaxLifespan => None,
        }
    }
}

/// Per-tier scaling data.
///
/// # Examples
///
/// ```rust
/// use realmstat::TierScaleTable;
///
/// let table = TierScaleTable::default();
/// assert_eq!(table.name(0), "QiRefining");
/// assert_eq!(table.multiplier(0), 1.0);
/// // Unknown tiers degrade instead of failing.
/// assert_eq!(table.multiplier(999), 1.0);
/// assert_eq!(table.base(999).name, "QiRefining");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierScaleTable {
    pub tiers: Vec<TierBase>,
    pub multipliers: Vec<f64>,
    pub base_factors: Vec<f64>,
}

impl Default for TierScaleTable {
    fn default() -> Self {
        let tiers = vec![
            TierBase::realm("QiRefining", [10.0, 5.0, 100.0, 10.0, 10.0, 10.0]),
            TierBase::realm("Foundation", [50.0, 25.0, 500.0, 50.0, 50.0, 30.0]),
            TierBase::realm("GoldenCore", [200.0, 100.0, 2000.0, 200.0, 200.0, 80.0]),
            TierBase::realm("NascentSoul", [800.0, 400.0, 8000.0, 800.0, 800.0, 200.0]),
            TierBase::realm("SpiritSevering", [3000.0, 1500.0, 30000.0, 3000.0, 3000.0, 500.0]),
            TierBase::realm("VoidRefining", [10000.0, 5000.0, 100000.0, 10000.0, 10000.0, 1200.0]),
            TierBase::realm("Integration", [35000.0, 17500.0, 350000.0, 35000.0, 35000.0, 3000.0]),
            TierBase::realm("Mahayana", [120000.0, 60000.0, 1200000.0, 120000.0, 120000.0, 7000.0]),
            TierBase::realm("Tribulation", [400000.0, 200000.0, 4000000.0, 400000.0, 400000.0, 16000.0]),
        ];
        Self {
            tiers,
            multipliers: vec![1.0, 1.5, 2.2, 3.2, 4.6, 6.5, 9.0, 12.5, 17.0],
            base_factors: vec![0.6, 0.65, 0.7, 0.75, 0.8, 0.85, 0.9, 0.95, 1.0],
        }
    }
}

impl TierScaleTable {
    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the table has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Whether `tier` indexes a known tier.
    pub fn contains(&self, tier: usize) -> bool {
        tier < self.tiers.len()
    }

    /// Base values for `tier`, or tier 0 if unknown.
    ///
    /// Tables are validated non-empty on load; an empty table built by hand
    /// yields an all-zero tier.
    pub fn base(&self, tier: usize) -> TierBase {
        match self.tiers.get(tier).or_else(|| self.tiers.first()) {
            Some(base) => {
                if tier >= self.tiers.len() {
                    tracing::debug!(tier, "unknown tier, using tier 0 base values");
                }
                base.clone()
            }
            None => TierBase::realm("", [0.0; 6]),
        }
    }

    /// Base value of `field` at `tier`.
    pub fn base_value(&self, tier: usize, field: EffectField) -> Option<f64> {
        self.tiers
            .get(tier)
            .or_else(|| self.tiers.first())
            .and_then(|base| base.value(field))
    }

    /// Display name of a tier, empty if unknown and the table is empty.
    pub fn name(&self, tier: usize) -> &str {
        self.tiers
            .get(tier)
            .or_else(|| self.tiers.first())
            .map(|base| base.name.as_str())
            .unwrap_or("")
    }

    /// Tier multiplier, 1.0 if out of range.
    pub fn multiplier(&self, tier: usize) -> f64 {
        self.multipliers.get(tier).copied().unwrap_or_else(|| {
            tracing::trace!(tier, "tier multiplier out of range, using 1.0");
            1.0
        })
    }

    /// Tier base factor, falling back to the tier 0 factor (or 1.0).
    pub fn base_factor(&self, tier: usize) -> f64 {
        self.base_factors
            .get(tier)
            .or_else(|| self.base_factors.first())
            .copied()
            .unwrap_or(1.0)
    }

    /// Check that the table is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyTierTable);
        }
        for (what, seq) in [
            ("multipliers", &self.multipliers),
            ("base factors", &self.base_factors),
        ] {
            if seq.len() != self.tiers.len() {
                return Err(ConfigError::TierLengthMismatch {
                    what,
                    expected: self.tiers.len(),
                    actual: seq.len(),
                });
            }
        }
        for (name, value) in self
            .multipliers
            .iter()
            .map(|v| ("tier multiplier", *v))
            .chain(self.base_factors.iter().map(|v| ("tier base factor", *v)))
        {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveParameter { name, value });
            }
        }
        Ok(())
    }
}
