//! Item rarity.

use serde::{Deserialize, Serialize};

/// Ordered item quality: `Common < Rare < Legendary < Immortal`.
///
/// # Examples
///
/// ```rust
/// use realmstat::Rarity;
///
/// assert!(Rarity::Common < Rarity::Immortal);
/// assert_eq!(Rarity::parse_lossy("LEGENDARY"), Rarity::Legendary);
/// assert_eq!(Rarity::parse_lossy("mythic"), Rarity::Common);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Legendary,
    Immortal,
}

impl Rarity {
    /// All rarities in ascending order.
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Legendary,
        Rarity::Immortal,
    ];

    /// Parse a rarity name, degrading unknown names to `Common`.
    pub fn parse_lossy(name: &str) -> Rarity {
        name.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(rarity = name, "unknown rarity, using common");
            Rarity::Common
        })
    }
}
