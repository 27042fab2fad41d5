//! A wrapper around a sorted vector of tuples, used to represent objects.
//!
//! Entries are kept sorted by key with no duplicates, so two maps built from
//! the same (key, value) set compare equal regardless of insertion order.
//! When a key occurs more than once in the input, the later entry wins; this
//! is where the decoder's duplicate-key rule lives.
//!
//! # Example
//!
//! ```
//! use fastbjson::vecmap::VecMap;
//!
//! // later entries overwrite earlier ones
//! let vm = VecMap::from(vec![("a", 1), ("b", 2), ("a", 3)]);
//! assert_eq!(vm.get(&"a"), Some(&3));
//!
//! // insertion order does not matter
//! let other = VecMap::from(vec![("b", 2), ("a", 3)]);
//! assert_eq!(vm, other);
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A map implemented as a sorted [`Vec`] of pairs.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Ord, V>(Vec<(K, V)>);

impl<K: Ord, V> VecMap<K, V> {
    /// Creates a [`VecMap`] from a vector of key-value pairs sorted by their
    /// first elements.
    ///
    /// # Panics
    ///
    /// This function will panic if `v` is not sorted by its first element.
    /// This requirement is strict, and keys must be unique.
    ///
    /// ```should_panic
    /// use fastbjson::vecmap::VecMap;
    ///
    /// let vmap = VecMap::from_sorted(vec![("b", ""), ("a", "")]);
    /// ```
    pub fn from_sorted(v: Vec<(K, V)>) -> Self {
        for i in 1..v.len() {
            if v[i - 1].0 >= v[i].0 {
                panic!("`Vec` is not sorted by key")
            }
        }
        VecMap(v)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key-value pairs, in key order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Returns a reference to the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.0.binary_search_by(|(k, _)| k.cmp(key)) {
            Ok(i) => Some(&self.0[i].1),
            Err(_) => None,
        }
    }

    /// Indicates whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool { self.get(key).is_some() }

    /// Inserts an entry, returning the previous value for `key` if there was
    /// one.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.binary_search_by(|(k, _)| k.cmp(&key)) {
            Ok(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            Err(i) => {
                self.0.insert(i, (key, value));
                None
            }
        }
    }
}

impl<K: Ord + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for VecMap<K, V> {
    /// Sorts the entries by key. When a key occurs more than once, the entry
    /// appearing later in `v` is kept.
    fn from(mut v: Vec<(K, V)>) -> Self {
        // stable sort preserves input order within runs of equal keys
        v.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));

        let mut out: Vec<(K, V)> = Vec::with_capacity(v.len());
        for (k, val) in v {
            match out.last_mut() {
                Some(last) if last.0 == k => last.1 = val,
                _ => out.push((k, val)),
            }
        }
        VecMap(out)
    }
}

impl<K: Ord + Hash, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self {
        let v: Vec<(K, V)> = hm.into_iter().collect();
        v.into()
    }
}

impl<K: Ord, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap::from(Vec::from_iter(iter))
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { Self::from_iter(bt) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let vm = VecMap::from(vec![("k", 1), ("k", 2), ("k", 3)]);
        assert_eq!(vm.len(), 1);
        assert_eq!(vm.get(&"k"), Some(&3));
    }

    #[test]
    fn order_independent_equality() {
        let a = VecMap::from(vec![("x", 1), ("y", 2), ("z", 3)]);
        let b = VecMap::from(vec![("z", 3), ("x", 1), ("y", 2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn insert_upserts() {
        let mut vm = VecMap::from(vec![("b", 1)]);
        assert_eq!(vm.insert("a", 2), None);
        assert_eq!(vm.insert("b", 3), Some(1));
        assert_eq!(vm.len(), 2);
        assert_eq!(vm.get(&"b"), Some(&3));
    }
}
