//! Cultivation speed.
//!
//! Four independent sources each grant a fractional bonus; bonuses compound
//! multiplicatively so `total = Π(1 + bonus) - 1`. A source whose bonus is
//! negative or not finite contributes zero.

use crate::character::Character;
use crate::engine::Engine;
use serde::{Deserialize, Serialize};

/// A source of cultivation speed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpSource {
    Technique,
    Talent,
    Title,
    Dwelling,
}

impl ExpSource {
    pub const ALL: [ExpSource; 4] = [
        ExpSource::Technique,
        ExpSource::Talent,
        ExpSource::Title,
        ExpSource::Dwelling,
    ];
}

/// One line of the exp-rate breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpRateEntry {
    pub source: ExpSource,
    /// The source's own bonus, after sanitising.
    pub bonus: f64,
    /// Marginal share of the total; contributions sum to the total.
    pub contribution: f64,
}

/// Total cultivation speed bonus with its breakdown.
///
/// # Examples
///
/// ```rust
/// use realmstat::exp_rate::ExpRate;
/// use realmstat::*;
///
/// let mut definitions = Definitions::new();
/// definitions.insert_talent("quick", Talent { exp_rate_bonus: 0.2, ..Talent::default() });
/// let engine = Engine::default().with_definitions(definitions);
///
/// let hero = Character::new(0, 1, StatBundle::default())
///     .with_talent("quick")
///     .with_dwelling(Dwelling { exp_rate_bonus: 0.5, array_enhancement: None });
///
/// let rate: ExpRate = engine.compute_exp_rate(&hero);
/// assert!((rate.total - 0.8).abs() < 1e-12);
/// assert_eq!(rate.breakdown.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpRate {
    pub total: f64,
    pub breakdown: Vec<ExpRateEntry>,
}

impl ExpRate {
    /// Fold per-source bonuses into a total and marginal breakdown.
    ///
    /// Each contribution is the growth of the running product when the
    /// source is folded in, so they always sum to `total`.
    pub fn from_bonuses(bonuses: impl IntoIterator<Item = (ExpSource, f64)>) -> Self {
        let mut product = 1.0;
        let mut breakdown = Vec::new();
        for (source, bonus) in bonuses {
            let bonus = sanitize(bonus);
            let contribution = product * bonus;
            product *= 1.0 + bonus;
            breakdown.push(ExpRateEntry {
                source,
                bonus,
                contribution,
            });
        }
        Self {
            total: product - 1.0,
            breakdown,
        }
    }

    /// Bonus of a single source, zero if absent.
    pub fn bonus(&self, source: ExpSource) -> f64 {
        self.breakdown
            .iter()
            .find(|entry| entry.source == source)
            .map_or(0.0, |entry| entry.bonus)
    }
}

fn sanitize(bonus: f64) -> f64 {
    if bonus.is_finite() && bonus > 0.0 {
        bonus
    } else {
        0.0
    }
}

/// Bonus of the active technique: `exp_rate × grade multiplier × affinity`.
fn technique_bonus(engine: &Engine, character: &Character) -> f64 {
    let Some(technique) = character
        .active_technique
        .as_deref()
        .and_then(|id| engine.definitions().technique(id))
    else {
        return 0.0;
    };
    let Some(exp_rate) = technique.exp_rate else {
        return 0.0;
    };
    let config = engine.config();
    let grade_multiplier = config
        .balance
        .grade_exp_multipliers
        .get(technique.grade.index())
        .copied()
        .unwrap_or(1.0);
    let affinity = crate::technique::root_affinity(config, technique, &character.spiritual_roots);
    exp_rate * grade_multiplier * affinity
}

/// Compute a character's cultivation speed bonus.
pub fn compute_exp_rate(engine: &Engine, character: &Character) -> ExpRate {
    let definitions = engine.definitions();
    let talent = character
        .talent
        .as_deref()
        .and_then(|id| definitions.talent(id))
        .map_or(0.0, |talent| talent.exp_rate_bonus);
    let title = character
        .title
        .as_deref()
        .and_then(|id| definitions.title(id))
        .map_or(0.0, |title| title.exp_rate_bonus);
    let dwelling = character.dwelling_or_default().exp_bonus();

    ExpRate::from_bonuses([
        (ExpSource::Technique, technique_bonus(engine, character)),
        (ExpSource::Talent, talent),
        (ExpSource::Title, title),
        (ExpSource::Dwelling, dwelling),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StatBundle;
    use crate::character::{Dwelling, SpiritualRoots};
    use crate::definitions::{Definitions, Technique, TechniqueGrade, Title};

    fn engine() -> Engine {
        let mut definitions = Definitions::new();
        definitions.insert_technique(
            "heaven-sutra",
            Technique {
                name: "Heaven Sutra".into(),
                grade: TechniqueGrade::Heaven,
                exp_rate: Some(0.5),
                root_affinity: Some(SpiritualRoots::new(1.0, 0.0, 0.0, 0.0, 0.0)),
                ..Technique::default()
            },
        );
        definitions.insert_title(
            "cursed",
            Title {
                name: "Cursed One".into(),
                exp_rate_bonus: -0.4,
                ..Title::default()
            },
        );
        Engine::default().with_definitions(definitions)
    }

    #[test]
    fn test_no_sources_is_zero() {
        let rate = compute_exp_rate(&engine(), &Character::new(0, 1, StatBundle::default()));
        assert_eq!(rate.total, 0.0);
        assert!(rate.breakdown.iter().all(|entry| entry.contribution == 0.0));
    }

    #[test]
    fn test_technique_grade_and_affinity() {
        // 0.5 * 2.0 (heaven) * (1 + 20/100)
        let hero = Character::new(0, 1, StatBundle::default())
            .with_active_technique("heaven-sutra")
            .with_spiritual_roots(SpiritualRoots::new(20.0, 0.0, 0.0, 0.0, 0.0));
        let rate = compute_exp_rate(&engine(), &hero);
        assert!((rate.bonus(ExpSource::Technique) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_negative_source_clamped() {
        let hero = Character::new(0, 1, StatBundle::default()).with_title("cursed");
        let rate = compute_exp_rate(&engine(), &hero);
        assert_eq!(rate.bonus(ExpSource::Title), 0.0);
        assert_eq!(rate.total, 0.0);
    }

    #[test]
    fn test_contributions_sum_to_total() {
        let hero = Character::new(0, 1, StatBundle::default())
            .with_active_technique("heaven-sutra")
            .with_dwelling(Dwelling {
                exp_rate_bonus: 0.3,
                array_enhancement: Some(0.2),
            });
        let rate = compute_exp_rate(&engine(), &hero);
        let sum: f64 = rate.breakdown.iter().map(|entry| entry.contribution).sum();
        assert!((sum - rate.total).abs() < 1e-12);
        // (1 + 1.0) * (1 + 0.5) - 1
        assert!((rate.total - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_bonus_ignored() {
        let rate = ExpRate::from_bonuses([
            (ExpSource::Talent, f64::INFINITY),
            (ExpSource::Title, f64::NAN),
            (ExpSource::Dwelling, 0.1),
        ]);
        assert!((rate.total - 0.1).abs() < 1e-12);
    }
}
