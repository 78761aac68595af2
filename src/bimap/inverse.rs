//! Value-to-key views over a [`BiMap`]. They hold no state of their own.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::error::Result;
use crate::map::Iter;
use crate::table::Entry;
use crate::view::{fmt_map, Map, MapMut};

use super::bimap::{put_pair, remove_pair, BiMap};
use super::cursor::BiCursorMut;

/// Shared inverse view: values become keys.
pub struct Inverse<'a, K, V, S> {
    map: &'a BiMap<K, V, S>,
}

impl<'a, K, V, S> Inverse<'a, K, V, S> {
    pub(crate) fn new(map: &'a BiMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.inverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.inverse.is_empty()
    }

    pub fn iter(&self) -> Iter<'a, V, K> {
        Iter::new(self.map.inverse.iter())
    }
}

impl<'a, K, V, S> Inverse<'a, K, V, S>
where
    K: Hash + Eq,
    V: Hash + Eq,
    S: BuildHasher,
{
    pub fn get<Q>(&self, value: &Q) -> Option<&'a K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.inverse.get(value).map(Entry::value)
    }

    pub fn contains_key<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.inverse.contains_key(value)
    }

    pub fn contains_value<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.forward.contains_key(key)
    }
}

impl<K, V, S> Map<V, K> for Inverse<'_, K, V, S>
where
    K: Hash + Eq,
    V: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.map.inverse.len()
    }

    fn get(&self, value: &V) -> Option<&K> {
        self.map.inverse.get(value).map(Entry::value)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&V, &K)) {
        for e in self.map.inverse.iter() {
            visitor(e.key(), e.value());
        }
    }

    fn contains_value(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.map.forward.contains_key(key)
    }
}

impl<K, V, S> fmt::Display for Inverse<'_, K, V, S>
where
    K: Hash + Eq + fmt::Display,
    V: Hash + Eq + fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_map::<V, K, _>(self, f)
    }
}

/// Exclusive inverse view. Inserting `(v, k)` here is inserting `(k, v)` on the map.
pub struct InverseMut<'a, K, V, S> {
    map: &'a mut BiMap<K, V, S>,
}

impl<'a, K, V, S> InverseMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut BiMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.inverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.inverse.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    pub fn iter(&self) -> Iter<'_, V, K> {
        Iter::new(self.map.inverse.iter())
    }
}

impl<K, V, S> InverseMut<'_, K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    pub fn get<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get_by_value(value)
    }

    /// Maps `value` to `key`, returning the key `value` had before.
    pub fn insert(&mut self, value: V, key: K) -> Option<K> {
        put_pair(&mut self.map.inverse, &mut self.map.forward, value, key)
    }

    pub fn remove<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        remove_pair(&mut self.map.inverse, &mut self.map.forward, value)
    }

    /// Value-to-key cursor; `remove` drops the mapping from both sides.
    pub fn cursor_mut(&mut self) -> BiCursorMut<'_, V, K, S> {
        BiCursorMut::new(&mut self.map.inverse, &mut self.map.forward)
    }
}

impl<K, V, S> Map<V, K> for InverseMut<'_, K, V, S>
where
    K: Hash + Eq,
    V: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.map.inverse.len()
    }

    fn get(&self, value: &V) -> Option<&K> {
        self.map.inverse.get(value).map(Entry::value)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&V, &K)) {
        for e in self.map.inverse.iter() {
            visitor(e.key(), e.value());
        }
    }

    fn contains_value(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.map.forward.contains_key(key)
    }
}

impl<K, V, S> MapMut<V, K> for InverseMut<'_, K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn try_insert(&mut self, value: V, key: K) -> Result<Option<K>> {
        Ok(self.insert(value, key))
    }

    fn try_remove(&mut self, value: &V) -> Result<Option<K>> {
        Ok(self.remove(value))
    }

    fn try_clear(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }
}
