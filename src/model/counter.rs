//! Insertion-ordered frequency counter.
//!
//! Several statistics break ties by "first seen" order, so the counter must
//! remember the order in which keys were first inserted. A plain `HashMap`
//! cannot guarantee that; `CountMap` keeps entries in a `Vec` and uses a
//! side index for O(1) increments.

use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A frequency map that preserves the insertion order of its keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap<K: Eq + Hash> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> CountMap<K> {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Increment the count for `key` by one, inserting it if absent.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Add `n` to the count for `key`, inserting it if absent.
    pub fn add(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Current count for `key` (0 if absent).
    pub fn get(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no key has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Iterate `(key, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate counts in insertion order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    /// Entries sorted by count descending, optionally truncated to `limit`.
    ///
    /// The sort is stable, so keys with equal counts keep their first-seen
    /// order.
    pub fn most_common(&self, limit: Option<usize>) -> Vec<(K, u64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit {
            sorted.truncate(n);
        }
        sorted
    }

    /// The single highest-count entry (first-seen wins on ties).
    pub fn top(&self) -> Option<(&K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (k, c) in self.iter() {
            match best {
                Some((_, bc)) if bc >= c => {}
                _ => best = Some((k, c)),
            }
        }
        best
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, u64)> for CountMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, n) in iter {
            map.add(k, n);
        }
        map
    }
}

impl<K: Serialize + Eq + Hash> Serialize for CountMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, c) in &self.entries {
            map.serialize_entry(k, c)?;
        }
        map.end()
    }
}

/// A map from key to an ordered sequence of byte sizes, preserving key
/// insertion order. Companion to [`CountMap`] for the attachment
/// sizes-by-extension facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeListMap<K: Eq + Hash> {
    entries: Vec<(K, Vec<u64>)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> SizeListMap<K> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append `size` to the sequence for `key`, inserting the key if absent.
    pub fn push(&mut self, key: K, size: u64) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1.push(size),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![size]));
            }
        }
    }

    /// The size sequence for `key` (empty slice if absent).
    pub fn get(&self, key: &K) -> &[u64] {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no sizes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded sizes across all keys.
    pub fn value_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }

    /// Sum of every size across all keys.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, v)| v.iter().sum::<u64>())
            .sum()
    }

    /// Iterate `(key, sizes)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[u64])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, Vec<u64>)> for SizeListMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, Vec<u64>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, sizes) in iter {
            for s in sizes {
                map.push(k.clone(), s);
            }
        }
        map
    }
}

impl<K: Serialize + Eq + Hash> Serialize for SizeListMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_get() {
        let mut map: CountMap<String> = CountMap::new();
        map.increment("a@x.com".to_string());
        map.increment("a@x.com".to_string());
        map.increment("b@x.com".to_string());
        assert_eq!(map.get(&"a@x.com".to_string()), 2);
        assert_eq!(map.get(&"b@x.com".to_string()), 1);
        assert_eq!(map.get(&"c@x.com".to_string()), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.total(), 3);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map: CountMap<&str> = CountMap::new();
        map.increment("z");
        map.increment("a");
        map.increment("m");
        let keys: Vec<&&str> = map.keys().collect();
        assert_eq!(keys, [&"z", &"a", &"m"]);
    }

    #[test]
    fn test_most_common_sorted_descending() {
        let map: CountMap<&str> =
            [("a", 3), ("b", 10), ("c", 7)].into_iter().collect();
        let top = map.most_common(None);
        assert_eq!(top, vec![("b", 10), ("c", 7), ("a", 3)]);
    }

    #[test]
    fn test_most_common_stable_on_ties() {
        let map: CountMap<&str> =
            [("first", 5), ("second", 5), ("third", 5)].into_iter().collect();
        let top = map.most_common(Some(2));
        assert_eq!(top, vec![("first", 5), ("second", 5)]);
    }

    #[test]
    fn test_top_first_seen_wins() {
        let map: CountMap<&str> = [("x", 4), ("y", 4)].into_iter().collect();
        assert_eq!(map.top(), Some((&"x", 4)));
        let empty: CountMap<&str> = CountMap::new();
        assert_eq!(empty.top(), None);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let map: CountMap<&str> = [("b", 2), ("a", 1)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn test_size_list_map_push_and_get() {
        let mut map: SizeListMap<String> = SizeListMap::new();
        map.push(".pdf".to_string(), 1000);
        map.push(".pdf".to_string(), 2000);
        map.push(".jpg".to_string(), 500);
        assert_eq!(map.get(&".pdf".to_string()), &[1000, 2000]);
        assert_eq!(map.get(&".png".to_string()), &[] as &[u64]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.value_count(), 3);
        assert_eq!(map.total(), 3500);
    }

    #[test]
    fn test_size_list_map_serialize() {
        let mut map: SizeListMap<&str> = SizeListMap::new();
        map.push(".doc", 10);
        map.push(".doc", 20);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{".doc":[10,20]}"#);
    }
}
