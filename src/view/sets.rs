//! Live key, value and entry views over a table.
//
// A view is nothing but a borrow of the backing table: every call is
// delegated, so changes made through a view are changes to the map and the
// view can never go stale.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use crate::table::{CursorMut, Entry, HashEntryTable, Iter, Keys, Values, ValuesMut};

/// The keys of a map, viewed as a set. Removing a key removes its mapping.
pub struct KeySet<'a, E, S> {
    table: &'a mut HashEntryTable<E, S>,
}

impl<'a, E, S> KeySet<'a, E, S>
where
    E: Entry,
    E::Key: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn new(table: &'a mut HashEntryTable<E, S>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Removes the mapping for `key`. Returns whether one existed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(key).is_some()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&E::Key) -> bool,
    {
        self.table.retain(|e| keep(e.key()))
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn iter(&self) -> Keys<'_, E> {
        Keys::new(self.table.iter())
    }

    /// Cursor over the backing entries; removal drops the whole mapping.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, E, S> {
        self.table.cursor_mut()
    }
}

/// The values of a map. Removing a value removes the first mapping holding it.
pub struct ValueCollection<'a, E, S> {
    table: &'a mut HashEntryTable<E, S>,
}

impl<'a, E, S> ValueCollection<'a, E, S>
where
    E: Entry,
    E::Key: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn new(table: &'a mut HashEntryTable<E, S>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// O(n) scan.
    pub fn contains(&self, value: &E::Value) -> bool
    where
        E::Value: PartialEq,
    {
        self.table.iter().any(|e| e.value() == value)
    }

    pub fn remove(&mut self, value: &E::Value) -> bool
    where
        E::Value: PartialEq,
    {
        self.table.remove_where(|e| e.value() == value).is_some()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&E::Value) -> bool,
    {
        self.table.retain(|e| keep(e.value()))
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn iter(&self) -> Values<'_, E> {
        Values::new(self.table.iter())
    }

    pub fn iter_mut(&mut self) -> ValuesMut<'_, E> {
        ValuesMut::new(self.table.iter_mut())
    }
}

/// The mappings of a map, viewed as a set of entries.
pub struct EntrySet<'a, E, S> {
    table: &'a mut HashEntryTable<E, S>,
}

impl<'a, E, S> EntrySet<'a, E, S>
where
    E: Entry,
    E::Key: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn new(table: &'a mut HashEntryTable<E, S>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// True when `key` is mapped to exactly `value`.
    pub fn contains<Q>(&self, key: &Q, value: &E::Value) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        E::Value: PartialEq,
    {
        self.table.get(key).is_some_and(|e| e.value() == value)
    }

    /// Removes the mapping only if `key` is mapped to `value`.
    pub fn remove<Q>(&mut self, key: &Q, value: &E::Value) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        E::Value: PartialEq,
    {
        if !self.contains(key, value) {
            return false;
        }
        self.table.remove_entry(key).is_some()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&E::Key, &mut E::Value) -> bool,
    {
        self.table.retain(|e| {
            let (key, value) = e.split_mut();
            keep(key, value)
        })
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    pub fn iter(&self) -> Iter<'_, E> {
        self.table.iter()
    }

    pub fn cursor_mut(&mut self) -> CursorMut<'_, E, S> {
        self.table.cursor_mut()
    }
}
