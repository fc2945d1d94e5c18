//! Engine facade.
//!
//! Provides the [`Engine`] type, the main entry point. It owns the static
//! tables (configuration, reference catalog, definitions) and the
//! method-count curve, all behind `Arc` so an engine is cheap to clone and
//! safe to share between threads. Every method is a pure function of its
//! arguments and these tables.

use crate::bundle::StatBundle;
use crate::catalog::{ReferenceCatalog, ResolvedEffect};
use crate::character::Character;
use crate::config::EngineConfig;
use crate::definitions::Definitions;
use crate::effect::Effect;
use crate::exp_rate::{self, ExpRate};
use crate::item::Item;
use crate::pipeline;
use crate::rarity::Rarity;
use crate::resolved::ResolvedStats;
use crate::scaling;
use crate::stat::EffectField;
use crate::synergy::{CompoundingCurve, MethodCountCurve};
use crate::valuation;
use std::sync::Arc;

/// The attribute and item value engine.
///
/// # Examples
///
/// ```rust
/// use realmstat::*;
///
/// let engine = Engine::default();
/// let hero = Character::new(0, 1, StatBundle::new(12, 6, 120, 10, 10, 10));
///
/// let stats = engine.compute_total_stats(&hero);
/// assert_eq!(stats, hero.base);
///
/// let pill = Item::new("p1", "Qi Gathering Pill", ItemCategory::Consumable)
///     .with_effect(Effect::new().with(EffectField::Exp, 40.0));
/// assert!(engine.compute_sell_price(&pill) >= 1);
/// ```
#[derive(Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
    catalog: Arc<ReferenceCatalog>,
    definitions: Arc<Definitions>,
    method_curve: Arc<dyn MethodCountCurve>,
}

impl Engine {
    /// Create an engine with an empty catalog and no definitions.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(ReferenceCatalog::new()),
            definitions: Arc::new(Definitions::new()),
            method_curve: Arc::new(CompoundingCurve::default()),
        }
    }

    /// Replace the reference catalog.
    pub fn with_catalog(mut self, catalog: ReferenceCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Replace the technique, talent and title definitions.
    pub fn with_definitions(mut self, definitions: Definitions) -> Self {
        self.definitions = Arc::new(definitions);
        self
    }

    /// Replace the method-count bonus curve.
    pub fn with_method_curve(mut self, curve: impl MethodCountCurve + 'static) -> Self {
        self.method_curve = Arc::new(curve);
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reference catalog.
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Technique, talent and title definitions.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Method-count curve used by the synergy stage.
    pub fn method_curve(&self) -> &dyn MethodCountCurve {
        self.method_curve.as_ref()
    }

    /// Resolve an item's effects against the reference catalog.
    pub fn resolve_effect(
        &self,
        name: &str,
        procedural_effect: &Effect,
        procedural_permanent: &Effect,
    ) -> ResolvedEffect {
        self.catalog
            .resolve_effect(name, procedural_effect, procedural_permanent)
    }

    /// Rescale an equipment effect. See [`scaling::scale_equipment`].
    pub fn scale_equipment(
        &self,
        effect: &Effect,
        tier: usize,
        tier_level: u32,
        rarity: Rarity,
    ) -> Effect {
        scaling::scale_equipment(&self.config, effect, tier, tier_level, rarity)
    }

    /// Rescale consumable effects. See [`scaling::scale_consumable`].
    pub fn scale_consumable(
        &self,
        effect: &Effect,
        permanent_effect: &Effect,
        tier: usize,
        tier_level: u32,
        rarity: Rarity,
    ) -> (Effect, Effect) {
        scaling::scale_consumable(
            &self.config,
            effect,
            permanent_effect,
            tier,
            tier_level,
            rarity,
        )
    }

    /// Integer range a scaled equipment field can take.
    pub fn equipment_range(
        &self,
        field: EffectField,
        tier: usize,
        tier_level: u32,
        rarity: Rarity,
    ) -> Option<(u64, u64)> {
        scaling::equipment_range(&self.config, field, tier, tier_level, rarity)
    }

    /// Resolve an item through the catalog and scale it to a tier.
    ///
    /// Equippable items go through the equipment scaler (their permanent
    /// effect is left as resolved); everything else through the consumable
    /// scaler. The input item is not modified.
    pub fn scale_item(&self, item: &Item, tier: usize, tier_level: u32) -> Item {
        let resolved = self.resolve_effect(&item.name, &item.effect, &item.permanent_effect);
        let (effect, permanent_effect) = if item.equippable {
            (
                self.scale_equipment(&resolved.effect, tier, tier_level, item.rarity),
                resolved.permanent_effect,
            )
        } else {
            self.scale_consumable(
                &resolved.effect,
                &resolved.permanent_effect,
                tier,
                tier_level,
                item.rarity,
            )
        };
        Item {
            effect,
            permanent_effect,
            ..item.clone()
        }
    }

    /// Final combat stats of a character.
    pub fn compute_total_stats(&self, character: &Character) -> StatBundle {
        self.resolve_total_stats(character).stats
    }

    /// Final combat stats with the bundle after every stage.
    pub fn resolve_total_stats(&self, character: &Character) -> ResolvedStats {
        pipeline::resolve(self, character)
    }

    /// Cultivation speed bonus and its per-source breakdown.
    pub fn compute_exp_rate(&self, character: &Character) -> ExpRate {
        exp_rate::compute_exp_rate(self, character)
    }

    /// Sell price of an item, at least 1.
    pub fn compute_sell_price(&self, item: &Item) -> u64 {
        valuation::compute_sell_price(&self.config, item)
    }

    /// Shop buy price of an item, at least 1.
    pub fn compute_buy_price(&self, item: &Item) -> u64 {
        valuation::compute_buy_price(&self.config, item)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("tiers", &self.config.tiers.len())
            .field("catalog_entries", &self.catalog.len())
            .field("techniques", &self.definitions.techniques.len())
            .field("method_curve", &self.method_curve.description())
            .finish()
    }
}
