//! Sparse numeric map with zero-default reads
//!
//! `Counter` doubles as a sparse vector: feature vectors, per-label weight
//! vectors, label priors and MDP value tables all share this representation
//! so that inner products and elementwise updates are well-defined between
//! them.

use std::{
    collections::HashMap,
    hash::Hash,
    ops::{AddAssign, SubAssign},
};

/// Sparse mapping from keys to `f64`, reading `0.0` for absent keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter<K: Eq + Hash> {
    entries: HashMap<K, f64>,
}

impl<K: Eq + Hash> Counter<K> {
    /// Create an empty counter
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Value stored for `key`, or `0.0` if absent
    pub fn get(&self, key: &K) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    /// Store `value` for `key`. Explicit zeros are kept as entries.
    pub fn set(&mut self, key: K, value: f64) {
        self.entries.insert(key, value);
    }

    /// Add `amount` to the value stored for `key`
    pub fn increment(&mut self, key: K, amount: f64) {
        *self.entries.entry(key).or_insert(0.0) += amount;
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }

    /// Sum of all stored values
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Inner product over the keys the two counters share
    pub fn dot(&self, other: &Counter<K>) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries
            .iter()
            .map(|(key, value)| value * large.get(key))
            .sum()
    }

    /// Squared Euclidean norm (`self · self`)
    pub fn norm_squared(&self) -> f64 {
        self.entries.values().map(|value| value * value).sum()
    }

    /// Multiply every stored value by `factor` in place
    pub fn scale(&mut self, factor: f64) {
        for value in self.entries.values_mut() {
            *value *= factor;
        }
    }

    /// Scale values so they sum to one. A zero total leaves the counter unchanged.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total == 0.0 {
            return;
        }
        self.scale(1.0 / total);
    }

    /// Key with the greatest value among `candidates`, first occurrence winning ties.
    ///
    /// Absent candidates score `0.0`. Returns `None` only when `candidates` is empty.
    pub fn arg_max_over<'a, I>(&self, candidates: I) -> Option<&'a K>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut best: Option<(&'a K, f64)> = None;
        for key in candidates {
            let value = self.get(key);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((key, value)),
            }
        }
        best.map(|(key, _)| key)
    }

    /// Entries sorted by value, largest first
    pub fn sorted_by_value(&self) -> Vec<(&K, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        entries
    }
}

impl<K: Eq + Hash + Clone> Counter<K> {
    /// Copy of this counter with every value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut copy = self.clone();
        copy.scale(factor);
        copy
    }
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> AddAssign<&Counter<K>> for Counter<K> {
    fn add_assign(&mut self, other: &Counter<K>) {
        for (key, value) in &other.entries {
            self.increment(key.clone(), *value);
        }
    }
}

impl<K: Eq + Hash + Clone> SubAssign<&Counter<K>> for Counter<K> {
    fn sub_assign(&mut self, other: &Counter<K>) {
        for (key, value) in &other.entries {
            self.increment(key.clone(), -*value);
        }
    }
}

impl<K: Eq + Hash> FromIterator<(K, f64)> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash> Extend<(K, f64)> for Counter<K> {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
