//! Reference catalog and effect resolution.
//!
//! Items sharing a name must resolve to the same numeric contract no matter
//! what a procedural generator produced for them. The catalog maps names to
//! canonical effects; a secondary known-items table is consulted when the
//! catalog has no entry.
//!
//! Resolution is all-or-nothing per bundle: a non-empty catalog effect
//! replaces the supplied effect wholesale, fields are never merged.

use crate::effect::Effect;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical effects for a named item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    pub effect: Effect,
    pub permanent_effect: Effect,
}

impl CatalogEntry {
    /// Entry with a temporary and a permanent bundle.
    pub fn new(effect: Effect, permanent_effect: Effect) -> Self {
        Self {
            effect,
            permanent_effect,
        }
    }
}

/// The pair of bundles produced by resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEffect {
    pub effect: Effect,
    pub permanent_effect: Effect,
}

/// Name to canonical-effect lookup.
///
/// # Examples
///
/// ```rust
/// use realmstat::{CatalogEntry, Effect, EffectField, ReferenceCatalog};
///
/// let mut catalog = ReferenceCatalog::new();
/// catalog.insert(
///     "Foundation Pill",
///     CatalogEntry::new(Effect::new().with(EffectField::Exp, 500.0), Effect::new()),
/// );
///
/// let procedural = Effect::new().with(EffectField::Exp, 12.0).with(EffectField::Hp, 3.0);
/// let resolved = catalog.resolve_effect("Foundation Pill", &procedural, &Effect::new());
/// assert_eq!(resolved.effect, Effect::new().with(EffectField::Exp, 500.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceCatalog {
    entries: HashMap<String, CatalogEntry>,
    known_items: HashMap<String, CatalogEntry>,
}

impl ReferenceCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from JSON of the form
    /// `{"entries": {name: entry}, "knownItems": {name: entry}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace a primary catalog entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Add or replace a known-items entry.
    pub fn insert_known_item(&mut self, name: impl Into<String>, entry: CatalogEntry) {
        self.known_items.insert(name.into(), entry);
    }

    /// Reference entry for an item name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Known-item entry for an item name.
    pub fn get_known_item(&self, name: &str) -> Option<&CatalogEntry> {
        self.known_items.get(name)
    }

    /// Number of entries across both tables.
    pub fn len(&self) -> usize {
        self.entries.len() + self.known_items.len()
    }

    /// Whether both tables are empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.known_items.is_empty()
    }

    /// Resolve the effects of an item called `name`.
    ///
    /// Each bundle is taken from the first table that has the name with a
    /// non-empty bundle: the catalog, then known items, then the supplied
    /// procedural values.
    pub fn resolve_effect(
        &self,
        name: &str,
        procedural_effect: &Effect,
        procedural_permanent: &Effect,
    ) -> ResolvedEffect {
        let entry = self.entries.get(name);
        let known = self.known_items.get(name);

        let effect = pick(
            name,
            "effect",
            entry.map(|e| &e.effect),
            known.map(|e| &e.effect),
            procedural_effect,
        );
        let permanent_effect = pick(
            name,
            "permanentEffect",
            entry.map(|e| &e.permanent_effect),
            known.map(|e| &e.permanent_effect),
            procedural_permanent,
        );

        ResolvedEffect {
            effect,
            permanent_effect,
        }
    }
}

fn pick(
    name: &str,
    bundle: &'static str,
    catalog: Option<&Effect>,
    known: Option<&Effect>,
    procedural: &Effect,
) -> Effect {
    if let Some(effect) = catalog.filter(|e| !e.is_empty()) {
        tracing::trace!(item = name, bundle, "resolved from reference catalog");
        return effect.clone();
    }
    if let Some(effect) = known.filter(|e| !e.is_empty()) {
        tracing::trace!(item = name, bundle, "resolved from known items");
        return effect.clone();
    }
    procedural.clone()
}
