//! Bidirectional map: two tables kept as exact inverses of each other.
//
// Every mapping k -> v lives twice, as (k, v) in `forward` and (v, k) in
// `inverse`. All mutation goes through `put_pair` / `remove_pair`, which are
// written over a generic (forward, inverse) pair so the swapped view reuses
// them with the roles exchanged.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

use crate::error::Result;
use crate::map::Iter;
use crate::table::{DefaultHashBuilder, Entry, HashEntryTable, Keys, Pair};
use crate::view::{fmt_map, map_eq, map_hash_code, Map, MapMut, ReadOnly};

use super::cursor::BiCursorMut;
use super::inverse::{Inverse, InverseMut};

pub(crate) type Side<A, B, S> = HashEntryTable<Pair<A, B>, S>;

/// Maps `a` to `b` on `fwd` and `b` to `a` on `inv`, dropping whatever
/// pairing either of them had before. Returns the previous value of `a`.
pub(crate) fn put_pair<A, B, S>(fwd: &mut Side<A, B, S>, inv: &mut Side<B, A, S>, a: A, b: B) -> Option<B>
where
    A: Hash + Eq + Clone,
    B: Hash + Eq + Clone,
    S: BuildHasher,
{
    if fwd.get(&a).is_some_and(|e| *e.value() == b) {
        return Some(b);
    }
    if let Some(owner) = inv.remove(&b) {
        fwd.remove(&owner);
    }
    let previous = fwd.insert(a.clone(), b.clone());
    if let Some(stale) = &previous {
        inv.remove(stale);
    }
    inv.insert(b, a);
    previous
}

pub(crate) fn remove_pair<A, B, S, Q>(fwd: &mut Side<A, B, S>, inv: &mut Side<B, A, S>, a: &Q) -> Option<B>
where
    A: Hash + Eq + Borrow<Q>,
    B: Hash + Eq,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    let b = fwd.remove(a)?;
    inv.remove(&b);
    Some(b)
}

/// BiMap keeps keys and values unique and answers lookups in both directions.
///
/// ```
/// use openhash::bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert("A", 1);
/// map.insert("B", 1);
/// map.insert("A", 2);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.inverse().get(&1), Some(&"B"));
/// assert_eq!(map.inverse().get(&2), Some(&"A"));
/// ```
pub struct BiMap<K, V, S = DefaultHashBuilder> {
    pub(crate) forward: Side<K, V, S>,
    pub(crate) inverse: Side<V, K, S>,
}

impl<K, V> BiMap<K, V, DefaultHashBuilder> {
    pub fn new() -> Self {
        Self {
            forward: HashEntryTable::new(),
            inverse: HashEntryTable::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashEntryTable::with_capacity(capacity),
            inverse: HashEntryTable::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for BiMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S: Clone> BiMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            forward: HashEntryTable::with_hasher(hash_builder.clone()),
            inverse: HashEntryTable::with_hasher(hash_builder),
        }
    }
}

impl<K, V, S> BiMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Clears both directions together.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.forward.iter())
    }

    pub fn keys(&self) -> Keys<'_, Pair<K, V>> {
        Keys::new(self.forward.iter())
    }

    pub fn values(&self) -> Keys<'_, Pair<V, K>> {
        Keys::new(self.inverse.iter())
    }

    /// The value-to-key direction over the same tables.
    pub fn inverse(&self) -> Inverse<'_, K, V, S> {
        Inverse::new(self)
    }

    /// Mutable value-to-key direction; changes show up on both sides.
    pub fn inverse_mut(&mut self) -> InverseMut<'_, K, V, S> {
        InverseMut::new(self)
    }

    /// Swaps the roles of the two tables. No entry is copied.
    pub fn into_inverse(self) -> BiMap<V, K, S> {
        BiMap {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    /// Read-only view sharing this map's tables.
    pub fn read_only(&self) -> ReadOnly<&Self> {
        ReadOnly::new(self)
    }
}

impl<K, V, S> BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key).map(Entry::value)
    }

    pub fn get_by_value<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inverse.get(value).map(Entry::value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(key)
    }

    /// O(1): answered by the inverse table.
    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inverse.contains_key(value)
    }

    /// Maps `key` to `value`. Any other key previously mapped to `value`
    /// loses its mapping. Returns the previous value of `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        put_pair(&mut self.forward, &mut self.inverse, key, value)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        remove_pair(&mut self.forward, &mut self.inverse, key)
    }

    pub fn remove_by_value<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        remove_pair(&mut self.inverse, &mut self.forward, value)
    }

    /// Key-to-value cursor; `remove` drops the mapping from both sides.
    ///
    /// ```
    /// use openhash::bimap::BiMap;
    ///
    /// let mut map: BiMap<u32, char> = (0..6).zip("abcdef".chars()).collect();
    /// let mut cursor = map.cursor_mut();
    /// while let Some((k, _)) = cursor.next() {
    ///     if k % 2 == 0 {
    ///         cursor.remove().unwrap();
    ///     }
    /// }
    /// assert_eq!(map.len(), 3);
    /// assert!(!map.contains_value(&'a'));
    /// ```
    pub fn cursor_mut(&mut self) -> BiCursorMut<'_, K, V, S> {
        BiCursorMut::new(&mut self.forward, &mut self.inverse)
    }

    /// Keeps only the mappings accepted by `keep`, on both sides.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut dropped = Vec::new();
        self.forward.retain(|e| {
            if keep(e.key(), e.value()) {
                return true;
            }
            dropped.push(e.value().clone());
            false
        });
        for value in &dropped {
            self.inverse.remove(value);
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.forward.reserve(additional);
        self.inverse.reserve(additional);
    }

    pub fn hash_code(&self) -> u64 {
        map_hash_code::<K, V, _>(self)
    }
}

impl<K, V, S> Map<K, V> for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.forward.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key).map(Entry::value)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V)) {
        for e in self.forward.iter() {
            visitor(e.key(), e.value());
        }
    }

    fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inverse.contains_key(value)
    }
}

impl<K, V, S> MapMut<K, V> for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
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

/// Deep copy: both tables are duplicated, nothing is shared.
impl<K, V, S> Clone for BiMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            inverse: self.inverse.clone(),
        }
    }
}

impl<K, V, S> PartialEq for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        map_eq::<K, V, _, _>(self, other)
    }
}

impl<K, V, S> Eq for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
}

impl<K, V, S> Hash for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Display for BiMap<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Display,
    V: Hash + Eq + Clone + fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_map::<K, V, _>(self, f)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for BiMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for BiMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a BiMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
