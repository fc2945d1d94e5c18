//! Stat bundles.
//!
//! [`StatBundle`] holds final, non-negative integer stats. [`StatDelta`]
//! holds fractional per-stat contributions before they are folded into a
//! bundle.

use crate::stat::Stat;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Convert an intermediate value into a stat: truncated, never negative.
///
/// NaN collapses to zero.
pub(crate) fn to_stat(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.floor() as u64
    }
}

/// The six combat stats of a character.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Stat, StatBundle};
///
/// let mut stats = StatBundle::default();
/// stats.set(Stat::Attack, 120);
/// assert_eq!(stats.get(Stat::Attack), 120);
/// assert_eq!(stats.get(Stat::Speed), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBundle {
    pub attack: u64,
    pub defense: u64,
    pub max_hp: u64,
    pub spirit: u64,
    pub physique: u64,
    pub speed: u64,
}

impl StatBundle {
    /// Create a bundle from explicit values.
    pub fn new(attack: u64, defense: u64, max_hp: u64, spirit: u64, physique: u64, speed: u64) -> Self {
        Self {
            attack,
            defense,
            max_hp,
            spirit,
            physique,
            speed,
        }
    }

    /// Value of one stat.
    pub fn get(&self, stat: Stat) -> u64 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::MaxHp => self.max_hp,
            Stat::Spirit => self.spirit,
            Stat::Physique => self.physique,
            Stat::Speed => self.speed,
        }
    }

    /// Overwrite one stat.
    pub fn set(&mut self, stat: Stat, value: u64) {
        match stat {
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::MaxHp => self.max_hp = value,
            Stat::Spirit => self.spirit = value,
            Stat::Physique => self.physique = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Apply `f` to every stat, truncating the result.
    pub fn map<F>(&self, mut f: F) -> StatBundle
    where
        F: FnMut(Stat, f64) -> f64,
    {
        let mut out = StatBundle::default();
        for stat in Stat::ALL {
            out.set(stat, to_stat(f(stat, self.get(stat) as f64)));
        }
        out
    }

    /// Add a fractional delta, truncating each stat.
    pub fn apply_delta(&self, delta: &StatDelta) -> StatBundle {
        self.map(|stat, value| value + delta.get(stat))
    }

    /// Overall power magnitude used by the synergy limiter.
    ///
    /// `maxHp` is weighted at one tenth because it runs an order of
    /// magnitude above the other stats.
    pub fn magnitude(&self) -> f64 {
        self.attack as f64
            + self.defense as f64
            + self.max_hp as f64 / 10.0
            + self.spirit as f64
            + self.physique as f64
            + self.speed as f64
    }
}

/// Fractional per-stat contributions.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Stat, StatDelta};
///
/// let mut delta = StatDelta::default();
/// delta.add_stat(Stat::Defense, 2.5);
/// delta.add_stat(Stat::Defense, 1.0);
/// assert_eq!(delta.get(Stat::Defense), 3.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDelta {
    values: [f64; 6],
}

impl StatDelta {
    /// Fractional delta of one stat.
    pub fn get(&self, stat: Stat) -> f64 {
        self.values[stat.index()]
    }

    /// Overwrite the delta of one stat.
    pub fn set(&mut self, stat: Stat, value: f64) {
        self.values[stat.index()] = value;
    }

    /// Accumulate `value` into one stat.
    pub fn add_stat(&mut self, stat: Stat, value: f64) {
        self.values[stat.index()] += value;
    }

    /// Iterate over `(stat, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }

    /// `true` if every stat is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

impl Add for StatDelta {
    type Output = StatDelta;

    fn add(mut self, other: StatDelta) -> StatDelta {
        self += other;
        self
    }
}

impl AddAssign for StatDelta {
    fn add_assign(&mut self, other: StatDelta) {
        for stat in Stat::ALL {
            self.add_stat(stat, other.get(stat));
        }
    }
}
