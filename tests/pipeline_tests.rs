//! Tests for the total stat pipeline and the engine facade.
//!
//! These tests verify:
//! - Stage order and per-stage values for a fully equipped character
//! - Loading definitions, catalog and configuration from JSON
//! - Exp-rate composition
//! - Valuation through the facade
//! - Cache transparency

use realmstat::*;

const DEFINITIONS: &str = r#"{
    "techniques": {
        "azure-cloud": {
            "name": "Azure Cloud Sutra",
            "grade": "mystic",
            "kind": "mental",
            "effect": {"attack": 20},
            "percent": {"attackPercent": 0.1},
            "expRate": 0.3,
            "rootAffinity": {"wood": 1.0}
        },
        "iron-skin": {
            "name": "Iron Skin Art",
            "kind": "body",
            "effect": {"defense": 15}
        }
    },
    "talents": {
        "sword-heart": {"name": "Sword Heart", "effect": {"attack": 5}, "expRateBonus": 0.1}
    },
    "titles": {
        "outer-disciple": {"name": "Outer Disciple", "effect": {"hp": 40}, "expRateBonus": 0.05}
    }
}"#;

fn engine() -> Engine {
    let definitions = Definitions::from_json(DEFINITIONS).unwrap();
    Engine::default().with_definitions(definitions)
}

fn disciple() -> Character {
    let sword = Item::new("sword-1", "Iron Sword", ItemCategory::Weapon)
        .with_slot(EquipSlot::Weapon)
        .with_effect(Effect::new().with(EffectField::Attack, 10.0));

    Character::new(1, 3, StatBundle::new(60, 30, 600, 55, 55, 32))
        .with_technique("iron-skin")
        .with_technique("azure-cloud")
        .with_active_technique("azure-cloud")
        .with_talent("sword-heart")
        .with_title("outer-disciple")
        .with_spiritual_roots(SpiritualRoots::new(0.0, 30.0, 0.0, 0.0, 0.0))
        .with_equipped(EquipSlot::Weapon, sword)
        .with_natal_item("sword-1")
}

// ============================================================================
// Pipeline Stages
// ============================================================================

#[test]
fn test_full_pipeline_values() {
    let resolved = engine().resolve_total_stats(&disciple());

    // Sword: 10 * 1.5 clamped to the ceiling 11.25, truncated to 11, natal 16.5.
    assert_eq!(resolved.bonuses.equipment.get(Stat::Attack), 16.5);
    assert_eq!(resolved.bonuses.talent.get(Stat::Attack), 5.0);
    assert_eq!(resolved.bonuses.techniques.get(Stat::Defense), 15.0);
    // The active mental technique is not part of the aggregate.
    assert_eq!(resolved.bonuses.techniques.get(Stat::Attack), 0.0);

    let aggregate = resolved.stage(Stage::Aggregate).unwrap();
    assert_eq!(aggregate.attack, 81);
    assert_eq!(aggregate.defense, 45);
    assert_eq!(aggregate.max_hp, 640);

    // Affinity 1.3 on the flat part only: 81 + 20 * 1.3 = 107, then 107 * 1.1 = 117.7.
    assert_eq!(resolved.stage(Stage::TechniqueFlat).unwrap().attack, 107);
    assert_eq!(resolved.stage(Stage::TechniquePercent).unwrap().attack, 117);

    assert!(resolved.stage(Stage::Synergy).is_none());
    assert_eq!(resolved.stats.attack, 117);
    assert_eq!(resolved.stats.defense, 45);
    assert_eq!(resolved.stats.speed, 32);
}

#[test]
fn test_stages_applied_in_order() {
    let resolved = engine().resolve_total_stats(&disciple().with_method_count(4));
    let stages: Vec<Stage> = resolved.stages.iter().map(|(stage, _)| *stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    assert_eq!(resolved.stages.last().map(|(_, stats)| *stats), Some(resolved.stats));
}

#[test]
fn test_compute_total_stats_matches_breakdown() {
    let engine = engine();
    let hero = disciple().with_method_count(7);
    assert_eq!(
        engine.compute_total_stats(&hero),
        engine.resolve_total_stats(&hero).stats
    );
}

#[test]
fn test_unknown_ids_contribute_nothing() {
    let engine = engine();
    let hero = Character::new(1, 1, StatBundle::new(50, 25, 500, 50, 50, 30))
        .with_technique("forgotten-art")
        .with_active_technique("forgotten-art")
        .with_talent("no-such-talent")
        .with_title("no-such-title");
    assert_eq!(engine.compute_total_stats(&hero), hero.base);
    assert_eq!(engine.compute_exp_rate(&hero).total, 0.0);
}

#[test]
fn test_unknown_tier_behaves_like_tier_zero() {
    let engine = engine();
    let sword = Item::new("s", "Iron Sword", ItemCategory::Weapon)
        .with_slot(EquipSlot::Weapon)
        .with_effect(Effect::new().with(EffectField::Attack, 10.0));
    let lost = Character::new(99, 1, StatBundle::default()).with_equipped(EquipSlot::Weapon, sword.clone());
    let mortal = Character::new(0, 1, StatBundle::default()).with_equipped(EquipSlot::Weapon, sword);
    assert_eq!(engine.compute_total_stats(&lost), engine.compute_total_stats(&mortal));
}

#[test]
fn test_catalog_applies_to_equipped_items() {
    let mut catalog = ReferenceCatalog::new();
    catalog.insert(
        "Iron Sword",
        CatalogEntry::new(Effect::new().with(EffectField::Speed, 100.0), Effect::new()),
    );
    let engine = engine().with_catalog(catalog);
    let resolved = engine.resolve_total_stats(&disciple());
    // The catalog bundle replaces the procedural attack entirely.
    assert_eq!(resolved.bonuses.equipment.get(Stat::Attack), 0.0);
    assert!(resolved.bonuses.equipment.get(Stat::Speed) > 0.0);
}

// ============================================================================
// Exp Rate
// ============================================================================

#[test]
fn test_exp_rate_composition() {
    let rate = engine().compute_exp_rate(&disciple());

    // technique 0.3 * 1.2 (mystic) * 1.3 = 0.468
    assert!((rate.bonus(ExpSource::Technique) - 0.468).abs() < 1e-9);
    assert!((rate.bonus(ExpSource::Talent) - 0.1).abs() < 1e-12);
    assert!((rate.bonus(ExpSource::Title) - 0.05).abs() < 1e-12);
    assert_eq!(rate.bonus(ExpSource::Dwelling), 0.0);

    let expected = 1.468 * 1.1 * 1.05 - 1.0;
    assert!((rate.total - expected).abs() < 1e-9);

    let contributions: f64 = rate.breakdown.iter().map(|entry| entry.contribution).sum();
    assert!((contributions - rate.total).abs() < 1e-9);
}

#[test]
fn test_dwelling_array_enhancement() {
    let hero = Character::new(0, 1, StatBundle::default()).with_dwelling(Dwelling {
        exp_rate_bonus: 0.2,
        array_enhancement: Some(0.3),
    });
    let rate = engine().compute_exp_rate(&hero);
    assert!((rate.total - 0.5).abs() < 1e-12);
}

// ============================================================================
// Item Scaling & Valuation
// ============================================================================

#[test]
fn test_scale_item_dispatches_on_equippable() {
    let engine = engine();
    let pill = Item::new("p", "Qi Pill", ItemCategory::Consumable)
        .with_effect(Effect::new().with(EffectField::Exp, 100.0));
    let scaled = engine.scale_item(&pill, 1, 1);
    assert_eq!(scaled.effect.get(EffectField::Exp), Some(150.0));

    let ring = Item::new("r", "Jade Ring", ItemCategory::Ring)
        .with_slot(EquipSlot::Ring1)
        .with_effect(Effect::new().with(EffectField::Exp, 100.0));
    let scaled = engine.scale_item(&ring, 1, 1);
    // exp passes through equipment scaling
    assert_eq!(scaled.effect.get(EffectField::Exp), Some(100.0));
}

#[test]
fn test_equipment_range_contains_scaled_values() {
    let engine = engine();
    let (low, high) = engine
        .equipment_range(EffectField::Defense, 4, 6, Rarity::Rare)
        .unwrap();
    for raw in [0.0, 1.0, 250.0, 5_000.0, 1.0e7] {
        let scaled = engine.scale_equipment(
            &Effect::new().with(EffectField::Defense, raw),
            4,
            6,
            Rarity::Rare,
        );
        let value = scaled.get(EffectField::Defense).unwrap() as u64;
        assert!(value >= low && value <= high, "{value} outside [{low}, {high}]");
    }
    assert!(engine.equipment_range(EffectField::Lifespan, 4, 6, Rarity::Rare).is_none());
}

#[test]
fn test_prices_through_facade() {
    let engine = engine();
    let sword = Item::new("s", "Iron Sword", ItemCategory::Weapon)
        .with_slot(EquipSlot::Weapon)
        .with_effect(Effect::new().with(EffectField::Attack, 10.0));
    let sell = engine.compute_sell_price(&sword);
    // 10 + 20 + 15
    assert_eq!(sell, 45);
    assert_eq!(engine.compute_buy_price(&sword), 90);

    let better = sword.clone().with_rarity(Rarity::Legendary);
    assert!(engine.compute_sell_price(&better) > sell);
}

// ============================================================================
// Configuration & Cache
// ============================================================================

#[test]
fn test_config_override_changes_synergy_cap() {
    let config = EngineConfig::from_json(r#"{"balance": {"synergyCap": 1.2}}"#).unwrap();
    let engine = Engine::new(config);
    let hero = Character::new(8, 9, StatBundle::new(10, 10, 100, 10, 10, 10)).with_method_count(200);
    let resolved = engine.resolve_total_stats(&hero);
    assert_eq!(resolved.method_multiplier, Some(1.2));
}

#[test]
fn test_custom_method_curve() {
    let engine = engine().with_method_curve(|count: u32| 1.0 + 5.0 * count as f64);
    let hero = Character::new(0, 1, StatBundle::new(100, 0, 0, 0, 0, 0)).with_method_count(1);
    // raw 6, limit factor 0.6 * 1.0 * 1.0
    let resolved = engine.resolve_total_stats(&hero);
    assert_eq!(resolved.method_multiplier, Some(4.0));
    assert_eq!(resolved.stats.attack, 400);
}

#[test]
fn test_malformed_config_is_reported() {
    let err = EngineConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("Malformed configuration"));
}

#[test]
fn test_character_from_json_resolves() {
    let hero: Character = serde_json::from_str(
        r#"{
            "tier": 1,
            "tierLevel": 3,
            "base": {"attack": 60, "defense": 30, "maxHp": 600, "spirit": 55, "physique": 55, "speed": 32},
            "techniques": ["iron-skin", "azure-cloud"],
            "activeTechnique": "azure-cloud",
            "talent": "sword-heart",
            "title": "outer-disciple",
            "unlockedTitles": ["outer-disciple"],
            "equipped": {
                "weapon": {
                    "id": "sword-1",
                    "name": "Iron Sword",
                    "category": "weapon",
                    "effect": {"attack": 10},
                    "equippable": true,
                    "slot": "weapon"
                }
            },
            "natalItem": "sword-1",
            "spiritualRoots": {"wood": 30}
        }"#,
    )
    .unwrap();
    assert_eq!(hero, disciple());
    assert_eq!(engine().compute_total_stats(&hero).attack, 117);
}

#[test]
fn test_cache_is_transparent() {
    let engine = engine();
    let mut cache = StatCache::new(engine.clone());
    let hero = disciple().with_method_count(3);
    let direct = engine.compute_total_stats(&hero);
    assert_eq!(cache.compute_total_stats(&hero), direct);
    assert_eq!(cache.compute_total_stats(&hero), direct);
    assert_eq!(cache.len(), 1);
}
