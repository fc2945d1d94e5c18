//! Item snapshots.
//!
//! The engine never mutates an [`Item`]; scaling produces a new one.

use crate::effect::Effect;
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// Item category.
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
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
    Ring,
    Artifact,
    #[default]
    Consumable,
    Material,
    Recipe,
    Advanced,
}

impl ItemCategory {
    /// Categories that can be worn.
    pub fn is_equipment(self) -> bool {
        matches!(
            self,
            ItemCategory::Weapon
                | ItemCategory::Armor
                | ItemCategory::Accessory
                | ItemCategory::Ring
                | ItemCategory::Artifact
        )
    }
}

/// Equipment slot on a character.
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
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Helmet,
    Chest,
    Legs,
    Boots,
    Belt,
    Necklace,
    Bracelet,
    Ring1,
    Ring2,
    Artifact1,
    Artifact2,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 12] = [
        EquipSlot::Weapon,
        EquipSlot::Helmet,
        EquipSlot::Chest,
        EquipSlot::Legs,
        EquipSlot::Boots,
        EquipSlot::Belt,
        EquipSlot::Necklace,
        EquipSlot::Bracelet,
        EquipSlot::Ring1,
        EquipSlot::Ring2,
        EquipSlot::Artifact1,
        EquipSlot::Artifact2,
    ];
}

/// An immutable item snapshot.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Effect, EffectField, EquipSlot, Item, ItemCategory, Rarity};
///
/// let sword = Item::new("sword-1", "Azure Frost Sword", ItemCategory::Weapon)
///     .with_rarity(Rarity::Rare)
///     .with_slot(EquipSlot::Weapon)
///     .with_effect(Effect::new().with(EffectField::Attack, 25.0));
/// assert!(sword.equippable);
/// assert_eq!(sword.slot, Some(EquipSlot::Weapon));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub rarity: Rarity,
    pub enchant_level: u32,
    pub effect: Effect,
    pub permanent_effect: Effect,
    pub equippable: bool,
    pub slot: Option<EquipSlot>,
}

impl Item {
    /// Create an item with no effects. Equipment categories start equippable.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            equippable: category.is_equipment(),
            ..Self::default()
        }
    }

    /// Set the rarity.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the temporary effect bundle.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the permanent effect bundle.
    pub fn with_permanent_effect(mut self, effect: Effect) -> Self {
        self.permanent_effect = effect;
        self
    }

    /// Set the enchant level.
    pub fn with_enchant_level(mut self, level: u32) -> Self {
        self.enchant_level = level;
        self
    }

    /// Set the slot; the item becomes equippable.
    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self.equippable = true;
        self
    }
}
