//! Total stat pipeline.
//!
//! Stages run in a fixed order:
//!
//! 1. [`Stage::Aggregate`]: base stats plus every flat bonus.
//! 2. [`Stage::TechniqueFlat`]: the active mental technique's flat effect.
//! 3. [`Stage::TechniquePercent`]: its percentage bonuses.
//! 4. [`Stage::Synergy`]: the damped method-count multiplier.
//!
//! Technique stages are skipped without an active mental technique and the
//! synergy stage without mastered methods. Every stage truncates, so each
//! intermediate bundle is already a valid stat bundle.

use crate::aggregate;
use crate::character::Character;
use crate::engine::Engine;
use crate::resolved::ResolvedStats;
use crate::synergy;
use crate::technique;
use serde::{Deserialize, Serialize};

/// A pipeline stage.
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
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Stage {
    Aggregate,
    TechniqueFlat,
    TechniquePercent,
    Synergy,
}

impl Stage {
    /// All stages in application order.
    pub const ALL: [Stage; 4] = [
        Stage::Aggregate,
        Stage::TechniqueFlat,
        Stage::TechniquePercent,
        Stage::Synergy,
    ];

    /// Position in the application order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use realmstat::pipeline::Stage;
    ///
    /// assert!(Stage::Aggregate.order() < Stage::Synergy.order());
    /// assert_eq!(Stage::TechniquePercent.to_string(), "techniquePercent");
    /// ```
    pub fn order(self) -> u8 {
        self as u8
    }
}

/// Run the full pipeline for a character.
pub fn resolve(engine: &Engine, character: &Character) -> ResolvedStats {
    let config = engine.config();
    let mut resolved = ResolvedStats::new(character.base);

    let bonuses = aggregate::aggregate_breakdown(engine, character);
    let aggregated = character.base.apply_delta(&bonuses.total());
    resolved.bonuses = bonuses;
    resolved.add_stage(Stage::Aggregate, aggregated);

    if let Some(active) = technique::active_mental_technique(engine.definitions(), character) {
        let roots = &character.spiritual_roots;
        let flat = technique::apply_technique_flat(config, active, roots, &resolved.stats);
        resolved.add_stage(Stage::TechniqueFlat, flat);
        let percent = technique::apply_technique_percent(active, &flat);
        resolved.add_stage(Stage::TechniquePercent, percent);
    }

    if let Some(outcome) = synergy::apply_method_synergy(
        config,
        engine.method_curve(),
        character.tier,
        character.tier_level,
        character.method_count,
        &resolved.stats,
    ) {
        resolved.method_multiplier = Some(outcome.effective_multiplier);
        resolved.add_stage(Stage::Synergy, outcome.stats);
    }

    tracing::trace!(
        tier = character.tier,
        stages = resolved.stages.len(),
        attack = resolved.stats.attack,
        "resolved total stats"
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;

    #[test]
    fn test_stage_order() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].order() < pair[1].order());
        }
    }

    #[test]
    fn test_bare_character_only_aggregates() {
        let hero = Character::new(1, 1, StatBundle::new(50, 25, 500, 50, 50, 30));
        let resolved = resolve(&Engine::default(), &hero);
        assert_eq!(resolved.stages.len(), 1);
        assert_eq!(resolved.stats, hero.base);
        assert!(resolved.method_multiplier.is_none());
    }

    #[test]
    fn test_methods_add_synergy_stage() {
        let hero = Character::new(1, 1, StatBundle::new(50, 25, 500, 50, 50, 30)).with_method_count(3);
        let resolved = resolve(&Engine::default(), &hero);
        assert!(resolved.stage(Stage::Synergy).is_some());
        assert!(resolved.method_multiplier.unwrap_or(0.0) > 1.0);
    }
}
