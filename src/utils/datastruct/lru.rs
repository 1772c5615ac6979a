use std::hash::Hash;

use ahash::RandomState;
use indexmap::IndexMap;
use serde::Serialize;

/// Snapshot of a cache's occupancy and counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded map with least-recently-used eviction
/// Entries are kept in recency order: index 0 is the oldest,
/// the last index is the most recently touched.
/// A capacity of 0 disables storage entirely.
///
/// # Examples
/// ```
/// use plagiarism_checker::utils::datastruct::lru::LruCache;
/// let mut cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
/// cache.put("c", 3);
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct LruCache<K, V>
where
    K: Hash + Eq,
{
    entries: IndexMap<K, V, RandomState>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq,
{
    /// Create an empty cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity.min(1024), RandomState::new()),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a key and mark it as most recently used
    ///
    /// # Arguments
    /// * `key` - key to look up
    ///
    /// # Returns
    /// * `Option<&V>` - the cached value if present
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_index_of(key) {
            Some(idx) => {
                self.hits += 1;
                let last = self.entries.len() - 1;
                self.entries.move_index(idx, last);
                self.entries.get_index(last).map(|(_, v)| v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a value, evicting the least recently used entry when full
    /// Replacing an existing key refreshes its recency.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(idx) = self.entries.get_index_of(&key) {
            let last = self.entries.len() - 1;
            self.entries.move_index(idx, last);
            if let Some((_, slot)) = self.entries.get_index_mut(last) {
                *slot = value;
            }
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }

    /// Check presence without touching recency or counters
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation or the last `clear`
    #[inline]
    pub fn counters(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Drop all entries and reset the counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
