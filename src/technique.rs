//! Technique effects.
//!
//! Known techniques contribute their flat effect to the aggregate. The one
//! *active* mental technique is handled separately: its flat effect is
//! added after aggregation, weighted by the character's spiritual-root
//! affinity, and its percentage bonuses then multiply the result.

use crate::bundle::StatBundle;
use crate::character::{Character, SpiritualRoots};
use crate::config::EngineConfig;
use crate::definitions::{Definitions, Technique, TechniqueKind};

/// Affinity multiplier of a technique for a set of spiritual roots.
///
/// `1 + max(0, weights · roots) / root_affinity_scale`, or exactly 1 for a
/// technique with no root weights.
///
/// # Examples
///
/// ```rust
/// use realmstat::technique::root_affinity;
/// use realmstat::{EngineConfig, SpiritualRoots, Technique};
///
/// let config = EngineConfig::default();
/// let mut technique = Technique::default();
/// assert_eq!(root_affinity(&config, &technique, &SpiritualRoots::default()), 1.0);
///
/// technique.root_affinity = Some(SpiritualRoots::new(0.0, 0.0, 0.0, 1.0, 0.0));
/// let fire = SpiritualRoots::new(0.0, 0.0, 0.0, 50.0, 0.0);
/// assert_eq!(root_affinity(&config, &technique, &fire), 1.5);
/// ```
pub fn root_affinity(config: &EngineConfig, technique: &Technique, roots: &SpiritualRoots) -> f64 {
    let Some(weights) = technique.root_affinity else {
        return 1.0;
    };
    let dot = weights.dot(roots);
    if !dot.is_finite() || dot <= 0.0 {
        return 1.0;
    }
    1.0 + dot / config.balance.root_affinity_scale
}

/// The character's active technique, if it is a mental technique with a
/// known definition.
pub fn active_mental_technique<'a>(
    definitions: &'a Definitions,
    character: &Character,
) -> Option<&'a Technique> {
    let id = character.active_technique.as_deref()?;
    definitions
        .technique(id)
        .filter(|technique| technique.kind == TechniqueKind::Mental)
}

/// Add the active technique's flat effect to `stats`.
pub fn apply_technique_flat(
    config: &EngineConfig,
    technique: &Technique,
    roots: &SpiritualRoots,
    stats: &StatBundle,
) -> StatBundle {
    let affinity = root_affinity(config, technique, roots);
    stats.map(|stat, value| value + technique.effect.stat_total(stat) * affinity)
}

/// Multiply `stats` by the active technique's percentage bonuses.
///
/// Each stat becomes `floor(stat × (1 + percent))`. Root affinity does not
/// apply here. A percentage below -100% zeroes the stat instead of going
/// negative.
pub fn apply_technique_percent(technique: &Technique, stats: &StatBundle) -> StatBundle {
    stats.map(|stat, value| match technique.percent.get(stat) {
        Some(percent) => value * (1.0 + percent).max(0.0),
        None => value,
    })
}

/// Apply the active mental technique (flat, then percent) to `stats`.
///
/// Returns `stats` unchanged when there is no active mental technique.
///
/// # Examples
///
/// ```rust
/// use realmstat::technique::apply_active_technique;
/// use realmstat::*;
///
/// let mut definitions = Definitions::new();
/// definitions.insert_technique(
///     "azure",
///     Technique {
///         name: "Azure Cloud Sutra".into(),
///         effect: Effect::new().with(EffectField::Attack, 10.0),
///         percent: PercentEffect::default().with(Stat::Attack, 0.5),
///         ..Technique::default()
///     },
/// );
/// let hero = Character::new(0, 1, StatBundle::default()).with_active_technique("azure");
/// let stats = StatBundle::new(100, 0, 0, 0, 0, 0);
///
/// let out = apply_active_technique(&EngineConfig::default(), &definitions, &hero, &stats);
/// assert_eq!(out.attack, 165);
/// ```
pub fn apply_active_technique(
    config: &EngineConfig,
    definitions: &Definitions,
    character: &Character,
    stats: &StatBundle,
) -> StatBundle {
    match active_mental_technique(definitions, character) {
        Some(technique) => {
            let flat = apply_technique_flat(config, technique, &character.spiritual_roots, stats);
            apply_technique_percent(technique, &flat)
        }
        None => *stats,
    }
}
