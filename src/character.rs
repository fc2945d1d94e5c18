//! Character snapshots.
//!
//! A [`Character`] is an immutable view of a player taken for a single
//! engine call. Gameplay code owns and mutates the live character; the
//! engine only reads.

use crate::bundle::StatBundle;
use crate::item::{EquipSlot, Item};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Five-element weights.
///
/// Used both for a character's spiritual root distribution and for a
/// technique's affinity weights. Defaults to all zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiritualRoots {
    pub metal: f64,
    pub wood: f64,
    pub water: f64,
    pub fire: f64,
    pub earth: f64,
}

impl SpiritualRoots {
    /// Root distribution in metal, wood, water, fire, earth order.
    pub fn new(metal: f64, wood: f64, water: f64, fire: f64, earth: f64) -> Self {
        Self {
            metal,
            wood,
            water,
            fire,
            earth,
        }
    }

    /// Element-wise dot product.
    pub fn dot(&self, other: &SpiritualRoots) -> f64 {
        self.metal * other.metal
            + self.wood * other.wood
            + self.water * other.water
            + self.fire * other.fire
            + self.earth * other.earth
    }
}

/// Cave-dwelling bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dwelling {
    pub exp_rate_bonus: f64,
    pub array_enhancement: Option<f64>,
}

impl Dwelling {
    /// Total cultivation speed bonus, including any array enhancement.
    pub fn exp_bonus(&self) -> f64 {
        self.exp_rate_bonus + self.array_enhancement.unwrap_or(0.0)
    }
}

/// An immutable character snapshot.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Character, StatBundle};
///
/// let hero = Character::new(2, 3, StatBundle::new(250, 120, 2500, 240, 230, 90))
///     .with_technique("azure-sutra")
///     .with_active_technique("azure-sutra");
/// assert_eq!(hero.tier, 2);
/// assert!(hero.techniques.contains("azure-sutra"));
/// assert_eq!(hero.method_count, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub tier: usize,
    pub tier_level: u32,
    pub base: StatBundle,
    pub techniques: BTreeSet<String>,
    pub active_technique: Option<String>,
    pub talent: Option<String>,
    pub title: Option<String>,
    pub unlocked_titles: BTreeSet<String>,
    pub equipped: BTreeMap<EquipSlot, Item>,
    pub natal_item: Option<String>,
    pub dwelling: Option<Dwelling>,
    pub spiritual_roots: SpiritualRoots,
    pub method_count: u32,
}

impl Character {
    /// Character at a tier and tier level with base stats and nothing else.
    pub fn new(tier: usize, tier_level: u32, base: StatBundle) -> Self {
        Self {
            tier,
            tier_level,
            base,
            ..Self::default()
        }
    }

    /// Learn a technique.
    pub fn with_technique(mut self, id: impl Into<String>) -> Self {
        self.techniques.insert(id.into());
        self
    }

    /// Set the active technique; it is also marked as known.
    pub fn with_active_technique(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.techniques.insert(id.clone());
        self.active_technique = Some(id);
        self
    }

    /// Set the current talent.
    pub fn with_talent(mut self, id: impl Into<String>) -> Self {
        self.talent = Some(id.into());
        self
    }

    /// Set the current title; it is also marked as unlocked.
    pub fn with_title(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.unlocked_titles.insert(id.clone());
        self.title = Some(id);
        self
    }

    /// Equip `item` in `slot`, replacing whatever was there.
    pub fn with_equipped(mut self, slot: EquipSlot, item: Item) -> Self {
        self.equipped.insert(slot, item);
        self
    }

    /// Mark an item id as the natal item.
    pub fn with_natal_item(mut self, id: impl Into<String>) -> Self {
        self.natal_item = Some(id.into());
        self
    }

    /// Attach a dwelling.
    pub fn with_dwelling(mut self, dwelling: Dwelling) -> Self {
        self.dwelling = Some(dwelling);
        self
    }

    /// Set the spiritual-root distribution.
    pub fn with_spiritual_roots(mut self, roots: SpiritualRoots) -> Self {
        self.spiritual_roots = roots;
        self
    }

    /// Set the number of mastered cultivation methods.
    pub fn with_method_count(mut self, count: u32) -> Self {
        self.method_count = count;
        self
    }

    /// Dwelling record, or an all-zero one if the character has none.
    pub fn dwelling_or_default(&self) -> Dwelling {
        self.dwelling.unwrap_or_default()
    }

    /// Whether `item` is the character's natal (bound) item.
    pub fn is_natal(&self, item: &Item) -> bool {
        self.natal_item.as_deref() == Some(item.id.as_str())
    }
}
