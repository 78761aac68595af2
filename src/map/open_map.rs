//! General-purpose map over the open-addressing table.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops::Index;

use crate::config::ConfigTrait;
use crate::error::Result;
use crate::table::{CursorMut, DefaultHashBuilder, Entry, HashEntryTable, Keys, Pair, Values, ValuesMut};
use crate::view::{fmt_map, map_eq, map_hash_code, EntrySet, KeySet, Map, MapMut, ReadOnly, ValueCollection};

use super::iter::{IntoIter, Iter, IterMut};

/// OpenHashMap is a hash map with linear probing and backward-shift removal.
///
/// Iteration order is unspecified and may change after any insert or removal.
///
/// ```
/// use openhash::map::OpenHashMap;
///
/// let mut map = OpenHashMap::new();
/// map.insert("one", 1);
/// map.insert("two", 2);
/// assert_eq!(map.insert("one", 10), Some(1));
/// assert_eq!(map["one"], 10);
/// assert_eq!(map.len(), 2);
/// ```
pub struct OpenHashMap<K, V, S = DefaultHashBuilder> {
    table: HashEntryTable<Pair<K, V>, S>,
}

impl<K, V> OpenHashMap<K, V, DefaultHashBuilder> {
    pub fn new() -> Self {
        Self {
            table: HashEntryTable::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashEntryTable::with_capacity(capacity),
        }
    }

    /// Sizes the map from the `table.initial_capacity` setting.
    pub fn from_config(cfg: &impl ConfigTrait) -> Self {
        match cfg.table().initial_capacity {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        }
    }
}

impl<K, V> Default for OpenHashMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OpenHashMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashEntryTable::with_hasher(hash_builder),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashEntryTable::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Slot count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.table.iter())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.table.iter_mut())
    }

    pub fn keys(&self) -> Keys<'_, Pair<K, V>> {
        Keys::new(self.table.iter())
    }

    pub fn values(&self) -> Values<'_, Pair<K, V>> {
        Values::new(self.table.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, Pair<K, V>> {
        ValuesMut::new(self.table.iter_mut())
    }

    pub fn drain(&mut self) -> IntoIter<K, V> {
        IntoIter::new(self.table.drain())
    }

    /// Wraps the map so every later mutation is refused.
    pub fn read_only(self) -> ReadOnly<Self> {
        ReadOnly::new(self)
    }
}

impl<K, V, S> OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key).map(Entry::value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_mut(key).map(Entry::value_mut)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key).map(|e| (e.key(), e.value()))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// O(n) scan.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Inserts or overwrites, returning the previous value for the key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(key)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(key).map(Entry::into_parts)
    }

    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.table.get_or_insert_with(key, make).value_mut()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|e| {
            let (k, v) = e.split_mut();
            keep(k, v)
        })
    }

    /// Live view of the keys; removing through it removes mappings.
    pub fn key_set(&mut self) -> KeySet<'_, Pair<K, V>, S> {
        KeySet::new(&mut self.table)
    }

    /// Live view of the values.
    pub fn values_view(&mut self) -> ValueCollection<'_, Pair<K, V>, S> {
        ValueCollection::new(&mut self.table)
    }

    /// Live view of the mappings.
    pub fn entry_set(&mut self) -> EntrySet<'_, Pair<K, V>, S> {
        EntrySet::new(&mut self.table)
    }

    pub fn cursor_mut(&mut self) -> CursorMut<'_, Pair<K, V>, S> {
        self.table.cursor_mut()
    }

    /// Order-independent content hash shared with every other map in the crate.
    pub fn hash_code(&self) -> u64
    where
        V: Hash,
    {
        map_hash_code::<K, V, _>(self)
    }
}

impl<K, V, S> Map<K, V> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.table.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key).map(Entry::value)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V)) {
        for e in self.table.iter() {
            visitor(e.key(), e.value());
        }
    }

    fn contains_key(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }
}

impl<K, V, S> MapMut<K, V> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn try_remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(self.remove(key))
    }

    fn try_clear(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }
}

impl<K, V, S> Clone for OpenHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K, V, S> PartialEq for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        map_eq::<K, V, _, _>(self, other)
    }
}

impl<K, V, S> Eq for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Hash for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Hash,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Display for OpenHashMap<K, V, S>
where
    K: Hash + Eq + fmt::Display,
    V: fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_map::<K, V, _>(self, f)
    }
}

impl<K, V, S> fmt::Debug for OpenHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OpenHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> IntoIterator for OpenHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.table.into_iter())
    }
}

impl<'a, K, V, S> IntoIterator for &'a OpenHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OpenHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, Q, V, S> Index<&Q> for OpenHashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Panics when `key` is absent.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not present in OpenHashMap"),
        }
    }
}
