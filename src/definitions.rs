//! Technique, talent and title definitions.
//!
//! Gameplay modules own these tables; the engine receives them once at
//! construction and looks them up by id. Unknown ids contribute nothing.

use crate::character::SpiritualRoots;
use crate::effect::{Effect, PercentEffect};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Technique quality tier.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TechniqueGrade {
    #[default]
    Yellow,
    Mystic,
    Earth,
    Heaven,
    Immortal,
}

impl TechniqueGrade {
    /// Position in grade order, from 0.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mental techniques act while active; body techniques are permanent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueKind {
    #[default]
    Mental,
    Body,
}

/// A cultivation technique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Technique {
    pub name: String,
    pub grade: TechniqueGrade,
    pub kind: TechniqueKind,
    /// Flat bonuses.
    pub effect: Effect,
    /// Percentage bonuses, applied only while the technique is active.
    pub percent: PercentEffect,
    pub exp_rate: Option<f64>,
    /// Element weights dotted with the character's spiritual roots.
    pub root_affinity: Option<SpiritualRoots>,
}

/// An innate talent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Talent {
    pub name: String,
    pub effect: Effect,
    pub exp_rate_bonus: f64,
}

/// A title.
///
/// The effect already folds in any set bonus from unlocked titles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Title {
    pub name: String,
    pub effect: Effect,
    pub exp_rate_bonus: f64,
}

/// Id-keyed definition tables.
///
/// # Examples
///
/// ```rust
/// use realmstat::Definitions;
///
/// let defs = Definitions::from_json(r#"{
///     "talents": {"sword-heart": {"name": "Sword Heart", "expRateBonus": 0.1}}
/// }"#).unwrap();
/// assert_eq!(defs.talent("sword-heart").map(|t| t.exp_rate_bonus), Some(0.1));
/// assert!(defs.technique("unknown").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    pub techniques: HashMap<String, Technique>,
    pub talents: HashMap<String, Talent>,
    pub titles: HashMap<String, Title>,
}

impl Definitions {
    /// Empty definition tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Register a technique under `id`.
    pub fn insert_technique(&mut self, id: impl Into<String>, technique: Technique) {
        self.techniques.insert(id.into(), technique);
    }

    /// Register a talent under `id`.
    pub fn insert_talent(&mut self, id: impl Into<String>, talent: Talent) {
        self.talents.insert(id.into(), talent);
    }

    /// Register a title under `id`.
    pub fn insert_title(&mut self, id: impl Into<String>, title: Title) {
        self.titles.insert(id.into(), title);
    }

    /// Technique by id.
    pub fn technique(&self, id: &str) -> Option<&Technique> {
        let found = self.techniques.get(id);
        if found.is_none() {
            tracing::trace!(technique = id, "unknown technique id");
        }
        found
    }

    /// Talent by id.
    pub fn talent(&self, id: &str) -> Option<&Talent> {
        self.talents.get(id)
    }

    /// Title by id.
    pub fn title(&self, id: &str) -> Option<&Title> {
        self.titles.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::{EffectField, Stat};

    #[test]
    fn test_grade_ordering() {
        assert!(TechniqueGrade::Yellow < TechniqueGrade::Immortal);
        assert_eq!(TechniqueGrade::Heaven.index(), 3);
        assert_eq!("EARTH".parse::<TechniqueGrade>().unwrap(), TechniqueGrade::Earth);
    }

    #[test]
    fn test_technique_json() {
        let defs = Definitions::from_json(
            r#"{"techniques": {"iron-body": {
                "name": "Iron Body",
                "grade": "mystic",
                "kind": "body",
                "effect": {"defense": 20},
                "percent": {"defensePercent": 0.1},
                "rootAffinity": {"earth": 1.0}
            }}}"#,
        )
        .unwrap();
        let technique = defs.technique("iron-body").unwrap();
        assert_eq!(technique.kind, TechniqueKind::Body);
        assert_eq!(technique.grade, TechniqueGrade::Mystic);
        assert_eq!(technique.effect.get(EffectField::Defense), Some(20.0));
        assert_eq!(technique.percent.get(Stat::Defense), Some(0.1));
        assert_eq!(technique.root_affinity.map(|r| r.earth), Some(1.0));
        assert!(technique.exp_rate.is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(Definitions::from_json("{\"techniques\": 3}").is_err());
    }

    #[test]
    fn test_insert_lookup() {
        let mut defs = Definitions::new();
        defs.insert_title(
            "sect-elder",
            Title {
                name: "Sect Elder".into(),
                effect: Effect::new().with(EffectField::Spirit, 30.0),
                exp_rate_bonus: 0.05,
            },
        );
        assert_eq!(defs.title("sect-elder").map(|t| t.exp_rate_bonus), Some(0.05));
        assert!(defs.talent("sect-elder").is_none());
    }
}
