//! Insertion-ordered hash table keyed by [`Value`].
//!
//! Backs both `Set` (`ValueTable<()>`) and `Dict` (`ValueTable<Value>`).
//! Keys are bucketed by [`Value::hash_code`] and told apart by
//! [`Value::equal`], so `Int(1)` and `Float(1.0)` name the same slot.
//!
//! Lookup (`find_by`) and mutation (`store`, `keep_only`) are separate steps.
//! Hashing and comparing a key may borrow other containers, including the one
//! that owns this table, so callers holding a `Shared` table locate the slot
//! under a shared borrow first and only then take the mutable borrow.
//!
//! A key mutated after insertion keeps its old bucket; it stays reachable by
//! iteration but not by lookup.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

use super::Value;

#[derive(Clone)]
struct Entry<V> {
    hash: u64,
    key: Value,
    value: V,
}

pub struct ValueTable<V> {
    entries: Vec<Entry<V>>,
    buckets: FxHashMap<u64, SmallVec<[usize; 2]>>,
}

impl<V> ValueTable<V> {
    pub fn new() -> Self {
        ValueTable {
            entries: Vec::new(),
            buckets: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ValueTable {
            entries: Vec::with_capacity(capacity),
            buckets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot of the first key with `hash` accepted by `matches`.
    pub fn find_by(&self, hash: u64, mut matches: impl FnMut(&Value) -> bool) -> Option<usize> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&index| matches(&self.entries[index].key))
    }

    /// Every slot whose key was stored under `hash`, in insertion order.
    pub fn slots(&self, hash: u64) -> &[usize] {
        self.buckets.get(&hash).map_or(&[], |bucket| bucket.as_slice())
    }

    /// Slot holding a key equal to `key`.
    pub fn find(&self, key: &Value) -> Option<usize> {
        self.find_by(key.hash_code(), |candidate| candidate.equal(key))
    }

    pub fn get(&self, key: &Value) -> Option<&V> {
        self.find(key).map(|index| &self.entries[index].value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.find(key).is_some()
    }

    /// Key and value at a slot returned by `find`/`find_by`.
    pub fn entry_at(&self, index: usize) -> (&Value, &V) {
        let entry = &self.entries[index];
        (&entry.key, &entry.value)
    }

    /// Write `value` into `slot`, or append a new entry when `slot` is `None`.
    ///
    /// An existing slot keeps its original key. Returns the replaced value.
    /// Runs no protocol operations.
    pub fn store(&mut self, slot: Option<usize>, hash: u64, key: Value, value: V) -> Option<V> {
        if let Some(index) = slot {
            return Some(std::mem::replace(&mut self.entries[index].value, value));
        }
        let index = self.entries.len();
        self.entries.push(Entry { hash, key, value });
        self.buckets.entry(hash).or_default().push(index);
        None
    }

    /// Insert into a table nobody else can observe yet (construction, copies).
    pub fn insert(&mut self, key: Value, value: V) -> Option<V> {
        let hash = key.hash_code();
        let slot = self.find_by(hash, |candidate| candidate.equal(&key));
        self.store(slot, hash, key, value)
    }

    /// Drop every entry whose position in `mask` is `false`.
    pub fn keep_only(&mut self, mask: &[bool]) {
        let mut position = 0;
        self.entries.retain(|_| {
            let keep = mask.get(position).copied().unwrap_or(true);
            position += 1;
            keep
        });
        self.reindex();
    }

    fn reindex(&mut self) {
        self.buckets.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            self.buckets.entry(entry.hash).or_default().push(index);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|entry| &entry.value)
    }
}

impl<V> Default for ValueTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for ValueTable<V> {
    fn clone(&self) -> Self {
        ValueTable {
            entries: self.entries.clone(),
            buckets: self.buckets.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ValueTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
