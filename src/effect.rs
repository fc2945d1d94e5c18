//! Effect bundles.
//!
//! An [`Effect`] is a sparse record of numeric fields carried by items,
//! techniques, talents and titles. Fields are named and optional; an absent
//! field is distinct from a field set to zero. Iteration follows
//! [`EffectField::ALL`].

use crate::stat::{EffectField, Stat};
use serde::{Deserialize, Serialize};

/// A sparse bundle of numeric effect fields.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Effect, EffectField};
///
/// let effect = Effect::new().with(EffectField::Attack, 10.0).with(EffectField::Hp, 50.0);
/// assert_eq!(effect.get(EffectField::Attack), Some(10.0));
/// assert_eq!(effect.get(EffectField::Speed), None);
/// assert_eq!(effect.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spirit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physique: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lifespan: Option<f64>,
}

impl Effect {
    /// Create an empty effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: EffectField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value, `None` if absent.
    pub fn get(&self, field: EffectField) -> Option<f64> {
        *self.slot(field)
    }

    /// Set a field value.
    pub fn set(&mut self, field: EffectField, value: f64) {
        *self.slot_mut(field) = Some(value);
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, field: EffectField) -> Option<f64> {
        self.slot_mut(field).take()
    }

    /// Iterate over present fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectField, f64)> + '_ {
        EffectField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Build a new effect by mapping every present field.
    ///
    /// Returning `None` from `f` drops the field.
    pub fn map_fields<F>(&self, mut f: F) -> Effect
    where
        F: FnMut(EffectField, f64) -> Option<f64>,
    {
        let mut out = Effect::new();
        for (field, value) in self.iter() {
            if let Some(mapped) = f(field, value) {
                out.set(field, mapped);
            }
        }
        out
    }

    /// Sum of all present fields feeding `stat`.
    ///
    /// `hp` and `maxHp` both count toward [`Stat::MaxHp`].
    pub fn stat_total(&self, stat: Stat) -> f64 {
        self.iter()
            .filter(|(field, _)| field.stat() == Some(stat))
            .map(|(_, value)| value)
            .sum()
    }

    fn slot(&self, field: EffectField) -> &Option<f64> {
        match field {
            EffectField::Attack => &self.attack,
            EffectField::Defense => &self.defense,
            EffectField::Hp => &self.hp,
            EffectField::MaxHp => &self.max_hp,
            EffectField::Spirit => &self.spirit,
            EffectField::Physique => &self.physique,
            EffectField::Speed => &self.speed,
            EffectField::Exp => &self.exp,
            EffectField::Lifespan => &self.lifespan,
            EffectField::MaxLifespan => &self.max_lifespan,
        }
    }

    fn slot_mut(&mut self, field: EffectField) -> &mut Option<f64> {
        match field {
            EffectField::Attack => &mut self.attack,
            EffectField::Defense => &mut self.defense,
            EffectField::Hp => &mut self.hp,
            EffectField::MaxHp => &mut self.max_hp,
            EffectField::Spirit => &mut self.spirit,
            EffectField::Physique => &mut self.physique,
            EffectField::Speed => &mut self.speed,
            EffectField::Exp => &mut self.exp,
            EffectField::Lifespan => &mut self.lifespan,
            EffectField::MaxLifespan => &mut self.max_lifespan,
        }
    }
}

impl FromIterator<(EffectField, f64)> for Effect {
    fn from_iter<I: IntoIterator<Item = (EffectField, f64)>>(iter: I) -> Self {
        let mut effect = Effect::new();
        for (field, value) in iter {
            effect.set(field, value);
        }
        effect
    }
}

/// Percentage modifiers carried by a technique.
///
/// Values are fractions: `0.10` means +10%.
///
/// # Examples
///
/// ```rust
/// use realmstat::{PercentEffect, Stat};
///
/// let percent: PercentEffect = serde_json::from_str(r#"{"attackPercent": 0.2}"#).unwrap();
/// assert_eq!(percent.get(Stat::Attack), Some(0.2));
/// assert_eq!(percent.get(Stat::Defense), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PercentEffect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hp_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spirit_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physique_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_percent: Option<f64>,
}

impl PercentEffect {
    /// Percentage bonus for a stat, `None` if absent.
    pub fn get(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Attack => self.attack_percent,
            Stat::Defense => self.defense_percent,
            Stat::MaxHp => self.max_hp_percent,
            Stat::Spirit => self.spirit_percent,
            Stat::Physique => self.physique_percent,
            Stat::Speed => self.speed_percent,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, stat: Stat, percent: f64) -> Self {
        let slot = match stat {
            Stat::Attack => &mut self.attack_percent,
            Stat::Defense => &mut self.defense_percent,
            Stat::MaxHp => &mut self.max_hp_percent,
            Stat::Spirit => &mut self.spirit_percent,
            Stat::Physique => &mut self.physique_percent,
            Stat::Speed => &mut self.speed_percent,
        };
        *slot = Some(percent);
        self
    }

    /// `true` if no percentage is present.
    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat).is_none())
    }
}
