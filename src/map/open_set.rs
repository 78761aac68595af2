//! Hash set over the same table engine, storing bare keys.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::table::{self, CursorMut, DefaultHashBuilder, Entry, HashEntryTable, KeyOnly, Keys};

/// OpenHashSet is a set whose slots hold keys with no value attached.
pub struct OpenHashSet<T, S = DefaultHashBuilder> {
    table: HashEntryTable<KeyOnly<T>, S>,
}

impl<T> OpenHashSet<T, DefaultHashBuilder> {
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
}

impl<T> Default for OpenHashSet<T, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> OpenHashSet<T, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashEntryTable::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn iter(&self) -> Keys<'_, KeyOnly<T>> {
        Keys::new(self.table.iter())
    }
}

impl<T, S> OpenHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Adds `value`. Returns false when it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, ()).is_none()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(value)
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(value).map(Entry::key)
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(value).is_some()
    }

    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(value).map(|e| e.into_parts().0)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.table.retain(|e| keep(e.key()))
    }

    pub fn cursor_mut(&mut self) -> CursorMut<'_, KeyOnly<T>, S> {
        self.table.cursor_mut()
    }

    pub fn is_subset<S2>(&self, other: &OpenHashSet<T, S2>) -> bool
    where
        S2: BuildHasher,
    {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Clone for OpenHashSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T, S> PartialEq for OpenHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T, S> Eq for OpenHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T: fmt::Debug, S> fmt::Debug for OpenHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for OpenHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for OpenHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Owning iterator over the members of a set.
pub struct IntoIter<T> {
    inner: table::IntoIter<KeyOnly<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|e| e.into_parts().0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, S> IntoIterator for OpenHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a OpenHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Keys<'a, KeyOnly<T>>;

    fn into_iter(self) -> Keys<'a, KeyOnly<T>> {
        self.iter()
    }
}
