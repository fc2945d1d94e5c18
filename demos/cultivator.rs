//! Cultivator Progression Example
//!
//! This example follows a single cultivator through two realms using realmstat:
//! - Loading technique, talent and title definitions from JSON
//! - Rescaling found items to the current realm
//! - Total stats with a stage-by-stage breakdown
//! - Re-resolving after a breakthrough (equipment follows the new realm)
//! - Method-count synergy, cultivation speed and item prices
//!
//! Run with `RUST_LOG=realmstat=debug` to see fallback decisions.

use realmstat::*;

const DEFINITIONS: &str = r#"{
    "techniques": {
        "azure-cloud": {
            "name": "Azure Cloud Sutra",
            "grade": "earth",
            "effect": {"attack": 30, "spirit": 20},
            "percent": {"attackPercent": 0.15, "spiritPercent": 0.1},
            "expRate": 0.4,
            "rootAffinity": {"wood": 1.0, "water": 0.5}
        },
        "golden-bell": {
            "name": "Golden Bell Body",
            "kind": "body",
            "effect": {"defense": 40, "maxHp": 300}
        }
    },
    "talents": {
        "sword-heart": {"name": "Sword Heart", "effect": {"attack": 15}, "expRateBonus": 0.1}
    },
    "titles": {
        "inner-disciple": {"name": "Inner Disciple", "effect": {"hp": 120}, "expRateBonus": 0.05}
    }
}"#;

// ============================================================================
// Output Helpers
// ============================================================================

fn print_stats(label: &str, stats: &StatBundle) {
    println!("  {label}:");
    for stat in Stat::ALL {
        println!("    {:<9} {}", stat.to_string(), stats.get(stat));
    }
}

fn print_breakdown(resolved: &ResolvedStats) {
    print_stats("Base", &resolved.base);
    for (stage, stats) in &resolved.stages {
        println!("  after {stage}: attack {}, defense {}, maxHp {}", stats.attack, stats.defense, stats.max_hp);
    }
    if let Some(multiplier) = resolved.method_multiplier {
        println!("  method multiplier: {multiplier:.3}");
    }
    print_stats("Final", &resolved.stats);
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("=== Cultivator Progression Example ===\n");

    // ========================================================================
    // Build Engine
    // ========================================================================
    let mut catalog = ReferenceCatalog::new();
    catalog.insert(
        "Foundation Pill",
        CatalogEntry::new(
            Effect::new().with(EffectField::Exp, 500.0),
            Effect::new().with(EffectField::MaxLifespan, 50.0),
        ),
    );
    let engine = Engine::new(EngineConfig::default())
        .with_catalog(catalog)
        .with_definitions(Definitions::from_json(DEFINITIONS)?);

    // ========================================================================
    // Create Cultivator
    // ========================================================================
    println!("1. A Qi Refining disciple\n");

    let sword = Item::new("sword-1", "Verdant Spring Sword", ItemCategory::Weapon)
        .with_rarity(Rarity::Rare)
        .with_slot(EquipSlot::Weapon)
        .with_effect(Effect::new().with(EffectField::Attack, 12.0));
    let robe = Item::new("robe-1", "Cloudsilk Robe", ItemCategory::Armor)
        .with_slot(EquipSlot::Chest)
        .with_effect(
            Effect::new()
                .with(EffectField::Defense, 6.0)
                .with(EffectField::Hp, 40.0),
        );

    let mut disciple = Character::new(0, 6, StatBundle::new(14, 7, 140, 12, 12, 11))
        .with_technique("golden-bell")
        .with_active_technique("azure-cloud")
        .with_talent("sword-heart")
        .with_title("inner-disciple")
        .with_spiritual_roots(SpiritualRoots::new(0.0, 40.0, 20.0, 0.0, 0.0))
        .with_equipped(EquipSlot::Weapon, sword.clone())
        .with_equipped(EquipSlot::Chest, robe)
        .with_natal_item("sword-1");

    print_breakdown(&engine.resolve_total_stats(&disciple));

    // ========================================================================
    // Breakthrough
    // ========================================================================
    println!("\n2. Breakthrough to {}\n", engine.config().tiers.name(1));

    disciple.tier = 1;
    disciple.tier_level = 1;
    disciple.method_count = 3;
    print_breakdown(&engine.resolve_total_stats(&disciple));

    // ========================================================================
    // Items
    // ========================================================================
    println!("\n3. Items at {}\n", engine.config().tiers.name(disciple.tier));

    if let Some((low, high)) =
        engine.equipment_range(EffectField::Attack, disciple.tier, disciple.tier_level, sword.rarity)
    {
        println!("  {} attack range: {low}..={high}", sword.name);
    }

    let pill = Item::new("pill-1", "Foundation Pill", ItemCategory::Consumable)
        .with_rarity(Rarity::Legendary)
        .with_effect(Effect::new().with(EffectField::Exp, 20.0));
    let scaled = engine.scale_item(&pill, disciple.tier, disciple.tier_level);
    println!(
        "  {}: exp {:?}, max lifespan {:?}",
        scaled.name,
        scaled.effect.get(EffectField::Exp),
        scaled.permanent_effect.get(EffectField::MaxLifespan)
    );

    for item in [&sword, &scaled] {
        println!(
            "  {} sells for {}, buys for {}",
            item.name,
            engine.compute_sell_price(item),
            engine.compute_buy_price(item)
        );
    }

    // ========================================================================
    // Cultivation Speed
    // ========================================================================
    println!("\n4. Cultivation speed\n");

    disciple.dwelling = Some(Dwelling {
        exp_rate_bonus: 0.25,
        array_enhancement: Some(0.1),
    });
    let rate = engine.compute_exp_rate(&disciple);
    for entry in &rate.breakdown {
        println!(
            "  {:<9} bonus {:>6.3}  contributes {:>6.3}",
            entry.source.to_string(),
            entry.bonus,
            entry.contribution
        );
    }
    println!("  total: +{:.1}%", rate.total * 100.0);

    Ok(())
}
