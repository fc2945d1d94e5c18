//! Memoized stat resolution.
//!
//! [`StatCache`] owns an [`Engine`] and remembers resolved stats per
//! character snapshot. Entries are keyed by the serialized snapshot itself,
//! so any change to a character produces a new key and two different
//! snapshots never share an entry. The cache holds at most
//! [`StatCache::capacity`] entries and evicts the oldest one first.
//! Results are identical with or without the cache.

use crate::bundle::StatBundle;
use crate::character::Character;
use crate::engine::Engine;
use crate::resolved::ResolvedStats;
use std::collections::{HashMap, VecDeque};

/// Default number of snapshots a [`StatCache`] keeps.
pub const DEFAULT_CAPACITY: usize = 256;

/// Cache key of a character snapshot, `None` if it cannot be serialized.
pub fn fingerprint(character: &Character) -> Option<Vec<u8>> {
    serde_json::to_vec(character).ok()
}

/// Bounded cache of resolved stats keyed by character snapshot.
///
/// # Examples
///
/// ```rust
/// use realmstat::{Character, Engine, StatBundle, StatCache};
///
/// let mut cache = StatCache::new(Engine::default());
/// let hero = Character::new(1, 2, StatBundle::new(60, 30, 600, 55, 55, 32));
///
/// let first = cache.compute_total_stats(&hero);
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.compute_total_stats(&hero), first);
/// assert_eq!(cache.len(), 1);
///
/// cache.invalidate(&hero);
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StatCache {
    engine: Engine,
    capacity: usize,
    cache: HashMap<Vec<u8>, ResolvedStats>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<Vec<u8>>,
}

impl StatCache {
    /// Create a cache holding up to [`DEFAULT_CAPACITY`] snapshots.
    pub fn new(engine: Engine) -> Self {
        Self::with_capacity(engine, DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` snapshots.
    ///
    /// A capacity of 0 disables caching; every call resolves afresh.
    pub fn with_capacity(engine: Engine, capacity: usize) -> Self {
        Self {
            engine,
            capacity,
            cache: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// The engine used for cache misses.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Maximum number of cached snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resolve a character, reusing a cached result for an identical snapshot.
    pub fn resolve(&mut self, character: &Character) -> ResolvedStats {
        let Some(key) = fingerprint(character) else {
            return self.engine.resolve_total_stats(character);
        };
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let resolved = self.engine.resolve_total_stats(character);
        self.insert(key, resolved.clone());
        resolved
    }

    fn insert(&mut self, key: Vec<u8>, resolved: ResolvedStats) {
        if self.capacity == 0 {
            return;
        }
        while self.cache.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.cache.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.cache.insert(key, resolved);
    }

    /// Total stats for a character, through the cache.
    pub fn compute_total_stats(&mut self, character: &Character) -> StatBundle {
        self.resolve(character).stats
    }

    /// Cached breakdown for a snapshot, if present.
    pub fn get_breakdown(&self, character: &Character) -> Option<&ResolvedStats> {
        fingerprint(character).and_then(|key| self.cache.get(&key))
    }

    /// Drop the cached entry of one snapshot.
    pub fn invalidate(&mut self, character: &Character) {
        if let Some(key) = fingerprint(character) {
            if self.cache.remove(&key).is_some() {
                self.order.retain(|entry| *entry != key);
            }
        }
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.order.clear();
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EquipSlot, Item, ItemCategory};

    fn hero() -> Character {
        Character::new(2, 4, StatBundle::new(220, 110, 2200, 210, 205, 85))
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(&hero()), fingerprint(&hero()));
    }

    #[test]
    fn test_any_change_changes_fingerprint() {
        let geared = hero().with_equipped(
            EquipSlot::Ring1,
            Item::new("r", "Jade Ring", ItemCategory::Ring),
        );
        assert_ne!(fingerprint(&hero()), fingerprint(&geared));
        assert_ne!(fingerprint(&hero()), fingerprint(&hero().with_method_count(1)));
    }

    #[test]
    fn test_cached_equals_uncached() {
        let engine = Engine::default();
        let mut cache = StatCache::new(engine.clone());
        let hero = hero().with_method_count(6);
        assert_eq!(cache.resolve(&hero), engine.resolve_total_stats(&hero));
        assert!(cache.get_breakdown(&hero).is_some());
        assert_eq!(cache.resolve(&hero), engine.resolve_total_stats(&hero));
    }

    #[test]
    fn test_distinct_snapshots_never_share_an_entry() {
        let engine = Engine::default();
        let mut cache = StatCache::new(engine.clone());
        let weak = hero();
        let strong = hero().with_method_count(40);
        cache.resolve(&weak);
        assert_eq!(cache.resolve(&strong), engine.resolve_total_stats(&strong));
        assert_eq!(cache.resolve(&weak), engine.resolve_total_stats(&weak));
    }

    #[test]
    fn test_capacity_bounds_growth() {
        let engine = Engine::default();
        let mut cache = StatCache::with_capacity(engine.clone(), 8);
        for methods in 0..100 {
            let snapshot = hero().with_method_count(methods);
            assert_eq!(cache.resolve(&snapshot), engine.resolve_total_stats(&snapshot));
            assert!(cache.len() <= 8);
        }
        assert_eq!(cache.len(), 8);

        // Oldest entries go first.
        assert!(cache.get_breakdown(&hero().with_method_count(0)).is_none());
        assert!(cache.get_breakdown(&hero().with_method_count(99)).is_some());
    }

    #[test]
    fn test_invalidate_frees_a_slot() {
        let mut cache = StatCache::with_capacity(Engine::default(), 2);
        cache.resolve(&hero());
        cache.resolve(&hero().with_method_count(1));
        cache.invalidate(&hero());
        cache.resolve(&hero().with_method_count(2));
        assert_eq!(cache.len(), 2);
        assert!(cache.get_breakdown(&hero().with_method_count(1)).is_some());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let mut cache = StatCache::with_capacity(Engine::default(), 0);
        cache.resolve(&hero());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cache = StatCache::new(Engine::default());
        cache.resolve(&hero());
        cache.resolve(&hero().with_method_count(2));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
