//! Bonus aggregation.
//!
//! Collects the flat bonuses a character receives from every source into a
//! per-stat [`StatDelta`]. Sources are:
//!
//! 1. Known techniques, except the active mental technique (applied later
//!    by [`crate::technique`]), each weighted by root affinity.
//! 2. Equipped items, resolved through the catalog, rescaled to the
//!    character's tier, boosted when natal, then soft-capped per stat.
//! 3. The talent.
//! 4. The current title.
//!
//! Missing definitions contribute nothing.

use crate::bundle::StatDelta;
use crate::character::Character;
use crate::definitions::TechniqueKind;
use crate::effect::Effect;
use crate::engine::Engine;
use crate::softcap::SoftCap;
use crate::stat::Stat;
use serde::{Deserialize, Serialize};

/// Per-source flat bonuses of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub techniques: StatDelta,
    /// Equipment sum before the soft cap.
    pub equipment_raw: StatDelta,
    /// Equipment sum after the soft cap.
    pub equipment: StatDelta,
    pub talent: StatDelta,
    pub title: StatDelta,
}

impl BonusBreakdown {
    /// Sum of all capped sources.
    pub fn total(&self) -> StatDelta {
        self.techniques + self.equipment + self.talent + self.title
    }
}

/// Sum `effect × factor` into a delta.
fn effect_delta(effect: &Effect, factor: f64) -> StatDelta {
    let mut delta = StatDelta::default();
    for stat in Stat::ALL {
        delta.add_stat(stat, effect.stat_total(stat) * factor);
    }
    delta
}

/// Flat bonuses of all known techniques except the active mental one.
pub fn technique_bonus(engine: &Engine, character: &Character) -> StatDelta {
    let definitions = engine.definitions();
    let active = character.active_technique.as_deref();
    let mut delta = StatDelta::default();

    for id in &character.techniques {
        let Some(technique) = definitions.technique(id) else {
            tracing::debug!(technique = %id, "unknown technique skipped");
            continue;
        };
        if Some(id.as_str()) == active && technique.kind == TechniqueKind::Mental {
            continue;
        }
        let affinity = crate::technique::root_affinity(
            engine.config(),
            technique,
            &character.spiritual_roots,
        );
        delta += effect_delta(&technique.effect, affinity);
    }
    delta
}

/// Raw and soft-capped equipment bonuses.
///
/// Each equipped item is resolved against the catalog and rescaled to the
/// character's current tier and tier level at its own rarity. The natal
/// item counts with the natal multiplier. The per-stat sums are then
/// soft-capped using the number of equipped items.
pub fn equipment_bonus(engine: &Engine, character: &Character) -> (StatDelta, StatDelta) {
    let config = engine.config();
    let mut raw = StatDelta::default();

    for item in character.equipped.values() {
        let resolved = engine.resolve_effect(&item.name, &item.effect, &item.permanent_effect);
        let scaled = engine.scale_equipment(
            &resolved.effect,
            character.tier,
            character.tier_level,
            item.rarity,
        );
        let factor = if character.is_natal(item) {
            config.balance.natal_multiplier
        } else {
            1.0
        };
        raw += effect_delta(&scaled, factor);
    }

    let cap = SoftCap::new(
        config,
        character.tier,
        character.tier_level,
        character.equipped.len(),
    );
    let mut capped = StatDelta::default();
    for (stat, value) in raw.iter() {
        capped.set(stat, cap.apply(value));
    }
    (raw, capped)
}

/// Compute every source's flat bonus.
pub fn aggregate_breakdown(engine: &Engine, character: &Character) -> BonusBreakdown {
    let definitions = engine.definitions();
    let techniques = technique_bonus(engine, character);
    let (equipment_raw, equipment) = equipment_bonus(engine, character);

    let talent = character
        .talent
        .as_deref()
        .and_then(|id| definitions.talent(id))
        .map(|talent| effect_delta(&talent.effect, 1.0))
        .unwrap_or_default();
    let title = character
        .title
        .as_deref()
        .and_then(|id| definitions.title(id))
        .map(|title| effect_delta(&title.effect, 1.0))
        .unwrap_or_default();

    BonusBreakdown {
        techniques,
        equipment_raw,
        equipment,
        talent,
        title,
    }
}

/// Total flat bonus of a character.
///
/// # Examples
///
/// ```rust
/// use realmstat::aggregate::aggregate;
/// use realmstat::*;
///
/// let mut definitions = Definitions::new();
/// definitions.insert_talent(
///     "strong",
///     Talent { name: "Strong".into(), effect: Effect::new().with(EffectField::Attack, 5.0), ..Talent::default() },
/// );
/// let engine = Engine::default().with_definitions(definitions);
/// let hero = Character::new(0, 1, StatBundle::default()).with_talent("strong");
///
/// assert_eq!(aggregate(&engine, &hero).get(Stat::Attack), 5.0);
/// ```
pub fn aggregate(engine: &Engine, character: &Character) -> StatDelta {
    aggregate_breakdown(engine, character).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::definitions::{Definitions, Technique, Title};
    use crate::item::{EquipSlot, Item, ItemCategory};
    use crate::rarity::Rarity;
    use crate::stat::EffectField;

    fn engine() -> Engine {
        let mut definitions = Definitions::new();
        definitions.insert_technique(
            "breath",
            Technique {
                name: "Tortoise Breath".into(),
                effect: Effect::new().with(EffectField::Defense, 8.0),
                ..Technique::default()
            },
        );
        definitions.insert_technique(
            "bones",
            Technique {
                name: "Jade Bones".into(),
                kind: TechniqueKind::Body,
                effect: Effect::new().with(EffectField::Physique, 12.0),
                ..Technique::default()
            },
        );
        definitions.insert_title(
            "elder",
            Title {
                name: "Outer Elder".into(),
                effect: Effect::new()
                    .with(EffectField::Hp, 30.0)
                    .with(EffectField::MaxHp, 20.0),
                ..Title::default()
            },
        );
        Engine::default().with_definitions(definitions)
    }

    fn sword() -> Item {
        Item::new("sword-1", "Iron Sword", ItemCategory::Weapon)
            .with_slot(EquipSlot::Weapon)
            .with_effect(Effect::new().with(EffectField::Attack, 10.0))
    }

    #[test]
    fn test_empty_character_has_no_bonus() {
        let hero = Character::new(0, 1, StatBundle::default());
        assert!(aggregate(&engine(), &hero).is_zero());
    }

    #[test]
    fn test_active_mental_technique_excluded() {
        let hero = Character::new(0, 1, StatBundle::default())
            .with_technique("bones")
            .with_active_technique("breath");
        let delta = technique_bonus(&engine(), &hero);
        assert_eq!(delta.get(Stat::Defense), 0.0);
        assert_eq!(delta.get(Stat::Physique), 12.0);
    }

    #[test]
    fn test_active_body_technique_still_counts() {
        let hero = Character::new(0, 1, StatBundle::default()).with_active_technique("bones");
        let delta = technique_bonus(&engine(), &hero);
        assert_eq!(delta.get(Stat::Physique), 12.0);
    }

    #[test]
    fn test_hp_and_max_hp_both_feed_max_hp() {
        let hero = Character::new(0, 1, StatBundle::default()).with_title("elder");
        assert_eq!(aggregate(&engine(), &hero).get(Stat::MaxHp), 50.0);
    }

    #[test]
    fn test_equipment_rescaled_to_character_tier() {
        let hero = Character::new(0, 1, StatBundle::default()).with_equipped(EquipSlot::Weapon, sword());
        let (raw, capped) = equipment_bonus(&engine(), &hero);
        assert_eq!(raw.get(Stat::Attack), 7.0);
        assert_eq!(capped.get(Stat::Attack), 7.0);
    }

    #[test]
    fn test_natal_item_multiplier() {
        let hero = Character::new(0, 1, StatBundle::default())
            .with_equipped(EquipSlot::Weapon, sword())
            .with_natal_item("sword-1");
        let (raw, _) = equipment_bonus(&engine(), &hero);
        assert_eq!(raw.get(Stat::Attack), 10.5);
    }

    #[test]
    fn test_soft_cap_applies_to_equipment() {
        let relic = Item::new("relic", "Heaven Relic", ItemCategory::Artifact)
            .with_rarity(Rarity::Immortal)
            .with_slot(EquipSlot::Artifact1)
            .with_effect(Effect::new().with(EffectField::Attack, 1.0e9));
        let hero = Character::new(8, 9, StatBundle::default())
            .with_equipped(EquipSlot::Artifact1, relic.clone())
            .with_equipped(EquipSlot::Artifact2, relic);
        let (raw, capped) = equipment_bonus(&engine(), &hero);
        assert!(capped.get(Stat::Attack) < raw.get(Stat::Attack));
    }
}
