//! Stat identifier module.
//!
//! Two fixed identifier sets are used throughout the engine:
//!
//! - [`Stat`] names the six combat stats of a character.
//! - [`EffectField`] names the numeric fields an item or technique effect
//!   may carry. Some fields feed a combat stat (`hp` and `maxHp` both feed
//!   [`Stat::MaxHp`]); the rest (`exp`, `lifespan`, `maxLifespan`) are
//!   cultivation or meta fields.
//!
//! Iteration always goes through the explicit `ALL` lists so ordering is
//! deterministic.

use serde::{Deserialize, Serialize};

/// A character combat stat.
///
/// # Examples
///
/// ```rust
/// use realmstat::Stat;
///
/// let stat: Stat = "maxHp".parse().unwrap();
/// assert_eq!(stat, Stat::MaxHp);
/// assert_eq!(stat.to_string(), "maxHp");
/// assert_eq!(Stat::ALL.len(), 6);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Stat {
    Attack,
    Defense,
    MaxHp,
    Spirit,
    Physique,
    Speed,
}

impl Stat {
    /// All combat stats in canonical order.
    pub const ALL: [Stat; 6] = [
        Stat::Attack,
        Stat::Defense,
        Stat::MaxHp,
        Stat::Spirit,
        Stat::Physique,
        Stat::Speed,
    ];

    /// Position of this stat in [`Stat::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A numeric field of an effect bundle.
///
/// # Examples
///
/// ```rust
/// use realmstat::{EffectField, Stat};
///
/// assert_eq!(EffectField::Hp.stat(), Some(Stat::MaxHp));
/// assert_eq!(EffectField::Exp.stat(), None);
/// assert!(EffectField::Lifespan.is_tier_independent());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum EffectField {
    Attack,
    Defense,
    Hp,
    MaxHp,
    Spirit,
    Physique,
    Speed,
    Exp,
    Lifespan,
    MaxLifespan,
}

impl EffectField {
    /// All effect fields in canonical order.
    pub const ALL: [EffectField; 10] = [
        EffectField::Attack,
        EffectField::Defense,
        EffectField::Hp,
        EffectField::MaxHp,
        EffectField::Spirit,
        EffectField::Physique,
        EffectField::Speed,
        EffectField::Exp,
        EffectField::Lifespan,
        EffectField::MaxLifespan,
    ];

    /// The combat stat this field contributes to, if any.
    pub fn stat(self) -> Option<Stat> {
        match self {
            EffectField::Attack => Some(Stat::Attack),
            EffectField::Defense => Some(Stat::Defense),
            EffectField::Hp | EffectField::MaxHp => Some(Stat::MaxHp),
            EffectField::Spirit => Some(Stat::Spirit),
            EffectField::Physique => Some(Stat::Physique),
            EffectField::Speed => Some(Stat::Speed),
            EffectField::Exp | EffectField::Lifespan | EffectField::MaxLifespan => None,
        }
    }

    /// Lifespan fields do not scale with tier.
    pub fn is_tier_independent(self) -> bool {
        matches!(self, EffectField::Lifespan | EffectField::MaxLifespan)
    }

    /// Fields that equipment scaling leaves untouched.
    pub fn is_equipment_passthrough(self) -> bool {
        matches!(
            self,
            EffectField::Exp | EffectField::Lifespan | EffectField::MaxLifespan
        )
    }
}
