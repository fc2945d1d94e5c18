//! # realmstat - Deterministic Attribute & Item Value Engine
//!
//! A calculation engine for realm-progression (cultivation) games that
//! provides:
//! - **Tier scaling** of equipment and consumables, so items stay relevant as
//!   a character advances through realms
//! - **Bounded aggregation** of bonuses from techniques, equipment, talent and
//!   title, with a per-stat equipment soft cap
//! - **Damped synergy** from mastered cultivation methods
//! - **Item valuation** for shops and selling
//!
//! ## Core Concepts
//!
//! ### Stat Pipeline
//!
//! Total stats flow through a fixed pipeline:
//!
//! ```text
//! [base] → Aggregate → TechniqueFlat → TechniquePercent → Synergy → [StatBundle]
//! ```
//!
//! 1. **Aggregate** adds every flat bonus (equipment is rescaled and soft-capped)
//! 2. **Technique** stages apply the active mental technique
//! 3. **Synergy** multiplies by the damped method-count bonus
//!
//! Every stage truncates to non-negative integers. [`ResolvedStats`] keeps the
//! bundle after each stage.
//!
//! ### Key Features
//!
//! - **Pure**: every computation is a function of its inputs and the static
//!   tables held by the [`Engine`]
//! - **Never fails mid-game**: unknown tiers, rarities and definitions fall
//!   back to safe defaults; NaN is replaced by a floor value
//! - **Configurable**: all tables load from JSON via [`EngineConfig::from_json`]
//! - **Catalog-consistent**: items with the same name always resolve to the
//!   same canonical effects
//!
//! ## Example
//!
//! ```rust
//! use realmstat::*;
//!
//! let engine = Engine::default();
//!
//! let sword = Item::new("sword-1", "Iron Sword", ItemCategory::Weapon)
//!     .with_slot(EquipSlot::Weapon)
//!     .with_effect(Effect::new().with(EffectField::Attack, 10.0));
//!
//! let hero = Character::new(0, 1, StatBundle::new(12, 6, 120, 10, 10, 10))
//!     .with_equipped(EquipSlot::Weapon, sword);
//!
//! let stats = engine.compute_total_stats(&hero);
//! assert_eq!(stats.attack, 19); // 12 + scaled 7
//! ```
//!
//! ## Modules
//!
//! - [`stat`] - Stat and effect field identifiers
//! - [`effect`] - Sparse effect bundles
//! - [`bundle`] - Integer stat bundles and fractional deltas
//! - [`tier`] / [`rarity`] / [`config`] - Static tables
//! - [`catalog`] - Reference catalog and effect resolution
//! - [`scaling`] - Equipment and consumable scalers
//! - [`softcap`] - Equipment soft cap
//! - [`aggregate`] - Bonus aggregation
//! - [`technique`] - Active technique modifier
//! - [`synergy`] - Method-count synergy limiter
//! - [`pipeline`] / [`resolved`] - Total stat pipeline and its breakdown
//! - [`exp_rate`] - Cultivation speed
//! - [`valuation`] - Item prices
//! - [`engine`] - The engine facade
//! - [`cache`] - Memoized resolution
//! - [`error`] - Error types

pub mod aggregate;
pub mod bundle;
pub mod cache;
pub mod catalog;
pub mod character;
pub mod config;
pub mod definitions;
pub mod effect;
pub mod engine;
pub mod error;
pub mod exp_rate;
pub mod item;
pub mod pipeline;
pub mod rarity;
pub mod resolved;
pub mod scaling;
pub mod softcap;
pub mod stat;
pub mod synergy;
pub mod technique;
pub mod tier;
pub mod valuation;

// Re-export main types for convenience
pub use cache::StatCache;
pub use engine::Engine;
pub use error::ConfigError;
pub use resolved::ResolvedStats;

// Re-export data model types
pub use bundle::{StatBundle, StatDelta};
pub use character::{Character, Dwelling, SpiritualRoots};
pub use effect::{Effect, PercentEffect};
pub use item::{EquipSlot, Item, ItemCategory};
pub use rarity::Rarity;
pub use stat::{EffectField, Stat};

// Re-export tables
pub use catalog::{CatalogEntry, ReferenceCatalog, ResolvedEffect};
pub use config::{BalanceParams, EngineConfig, PercentRange, RarityConfig, RarityTable, ValuationTable};
pub use definitions::{Definitions, Talent, Technique, TechniqueGrade, TechniqueKind, Title};
pub use tier::{TierBase, TierScaleTable};

// Re-export computation results
pub use exp_rate::{ExpRate, ExpRateEntry, ExpSource};
pub use pipeline::Stage;
pub use synergy::{CompoundingCurve, MethodCountCurve};
pub use valuation::PriceBreakdown;
