//! Resolved stat results module.
//!
//! Contains the `ResolvedStats` type, the final stat bundle of a character
//! together with the bundle after every pipeline stage.

use crate::aggregate::BonusBreakdown;
use crate::bundle::StatBundle;
use crate::pipeline::Stage;
use crate::stat::Stat;
use serde::{Deserialize, Serialize};

/// Final stats with a complete stage-by-stage breakdown.
///
/// Read-only and serializable, suitable for tooltips and replay checks.
///
/// # Examples
///
/// ```rust
/// use realmstat::pipeline::Stage;
/// use realmstat::{ResolvedStats, Stat, StatBundle};
///
/// let base = StatBundle::new(100, 0, 0, 0, 0, 0);
/// let mut resolved = ResolvedStats::new(base);
/// resolved.add_stage(Stage::Aggregate, StatBundle::new(130, 0, 0, 0, 0, 0));
/// resolved.add_stage(Stage::TechniquePercent, StatBundle::new(156, 0, 0, 0, 0, 0));
///
/// assert_eq!(resolved.stats.attack, 156);
/// assert_eq!(resolved.stage(Stage::Aggregate).map(|s| s.attack), Some(130));
/// assert_eq!(resolved.gain(Stat::Attack), 56);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStats {
    /// The final stats.
    pub stats: StatBundle,

    /// The character's base stats before any bonus.
    pub base: StatBundle,

    /// Bundle after each applied stage, in application order.
    pub stages: Vec<(Stage, StatBundle)>,

    /// Flat bonuses by source, as fed into the aggregate stage.
    pub bonuses: BonusBreakdown,

    /// Effective method-count multiplier, `None` if the synergy stage
    /// did not run.
    pub method_multiplier: Option<f64>,
}

impl ResolvedStats {
    /// Start a breakdown whose final value is the base itself.
    pub fn new(base: StatBundle) -> Self {
        Self {
            stats: base,
            base,
            ..Self::default()
        }
    }

    /// Record a stage; its output becomes the current final value.
    pub fn add_stage(&mut self, stage: Stage, stats: StatBundle) {
        self.stages.push((stage, stats));
        self.stats = stats;
    }

    /// Bundle after `stage`, `None` if that stage was not applied.
    pub fn stage(&self, stage: Stage) -> Option<&StatBundle> {
        self.stages
            .iter()
            .find(|(applied, _)| *applied == stage)
            .map(|(_, stats)| stats)
    }

    /// Final value minus base value of one stat (saturating at zero).
    pub fn gain(&self, stat: Stat) -> u64 {
        self.stats.get(stat).saturating_sub(self.base.get(stat))
    }
}
