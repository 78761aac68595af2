//! Open-addressing hash table engine.
//
// Entries live directly in a power-of-two slot array. Collisions are resolved
// by linear probing and a removal closes its hole by shifting the rest of the
// probe chain backwards, so a lookup may always stop at the first empty slot.
// There are no tombstones.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use tracing::debug;

use super::cursor::CursorMut;
use super::entry::Entry;
use super::hash::{self, DefaultHashBuilder};
use super::iter::{IntoIter, Iter, IterMut};

pub const COMP_TABLE: &str = "hash_table";

/// Slot count allocated on the first insert when no capacity was requested.
pub const DEFAULT_SLOTS: usize = 16;

/// Smallest slot array ever allocated.
const MIN_SLOTS: usize = 2;

/// Slot array plus the counters describing it.
/// Always replaced as a unit; never rebuilt in place.
#[derive(Clone)]
pub(crate) struct Slots<E> {
    pub(crate) slots: Box<[Option<E>]>,
    pub(crate) len: usize,
    pub(crate) mask: usize,
}

impl<E> Slots<E> {
    fn unallocated() -> Self {
        Self {
            slots: Vec::new().into_boxed_slice(),
            len: 0,
            mask: 0,
        }
    }

    fn allocate(count: usize) -> Self {
        debug_assert!(count.is_power_of_two());
        let mut slots = Vec::with_capacity(count);
        slots.resize_with(count, || None);
        Self {
            slots: slots.into_boxed_slice(),
            len: 0,
            mask: count - 1,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Number of slots needed to hold `entries` at a load factor of at most one half.
#[inline]
fn slots_for(entries: usize) -> usize {
    entries
        .saturating_mul(2)
        .max(MIN_SLOTS)
        .next_power_of_two()
}

#[inline]
fn home<S, Q>(hash_builder: &S, mask: usize, key: &Q) -> usize
where
    S: BuildHasher,
    Q: Hash + ?Sized,
{
    hash::mix(hash_builder.hash_one(key)) as usize & mask
}

/// Puts an entry into the first free slot of its probe chain.
#[inline]
fn place<E, S>(raw: &mut Slots<E>, hash_builder: &S, entry: E) -> usize
where
    E: Entry,
    E::Key: Hash,
    S: BuildHasher,
{
    let mask = raw.mask;
    let mut idx = home(hash_builder, mask, entry.key());
    while raw.slots[idx].is_some() {
        idx = (idx + 1) & mask;
    }
    raw.slots[idx] = Some(entry);
    idx
}

/// HashEntryTable is an open-addressing table of pluggable entries.
///
/// The slot array is allocated lazily on the first insert and doubles whenever
/// more than half of it would be occupied. It never shrinks.
pub struct HashEntryTable<E, S = DefaultHashBuilder> {
    pub(crate) raw: Slots<E>,
    initial_slots: usize,
    hash_builder: S,
}

impl<E> HashEntryTable<E, DefaultHashBuilder> {
    /// Creates an empty table; nothing is allocated until the first insert.
    pub fn new() -> Self {
        Self::with_hasher(hash::default_hash_builder())
    }

    /// Creates an empty table that will hold `capacity` entries before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, hash::default_hash_builder())
    }
}

impl<E> Default for HashEntryTable<E, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> HashEntryTable<E, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            raw: Slots::unallocated(),
            initial_slots: DEFAULT_SLOTS,
            hash_builder,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            raw: Slots::unallocated(),
            initial_slots: slots_for(capacity),
            hash_builder,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    /// Number of slots in the current array (0 before the first insert).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.raw.slots, self.raw.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, E> {
        IterMut::new(&mut self.raw.slots, self.raw.len)
    }

    /// Removes every entry. The slot array keeps its size.
    pub fn clear(&mut self) {
        if self.raw.len == 0 {
            return;
        }
        for slot in self.raw.slots.iter_mut() {
            *slot = None;
        }
        self.raw.len = 0;
    }

    /// Moves every entry out, leaving the table empty with its slot array size kept.
    pub fn drain(&mut self) -> IntoIter<E> {
        let capacity = self.raw.capacity();
        let fresh = if capacity == 0 {
            Slots::unallocated()
        } else {
            Slots::allocate(capacity)
        };
        let old = mem::replace(&mut self.raw, fresh);
        IntoIter::new(old.slots, old.len)
    }
}

impl<E, S> HashEntryTable<E, S>
where
    E: Entry,
    E::Key: Hash + Eq,
    S: BuildHasher,
{
    /// Slot index holding `key`, probing from its home slot to the first empty one.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.raw.len == 0 {
            return None;
        }
        let mask = self.raw.mask;
        let mut idx = home(&self.hash_builder, mask, key);
        loop {
            match &self.raw.slots[idx] {
                None => return None,
                Some(entry) if entry.key().borrow() == key => return Some(idx),
                Some(_) => idx = (idx + 1) & mask,
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&E>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        self.raw.slots[idx].as_ref()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut E>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        self.raw.slots[idx].as_mut()
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts or overwrites. Returns the previous value when the key was present.
    pub fn insert(&mut self, key: E::Key, value: E::Value) -> Option<E::Value> {
        if let Some(entry) = self.get_mut(&key) {
            return Some(entry.set_value(value));
        }
        self.reserve(1);
        place(&mut self.raw, &self.hash_builder, E::new(key, value));
        self.raw.len += 1;
        None
    }

    /// Returns the entry for `key`, inserting one built by `make` when absent.
    pub fn get_or_insert_with<F>(&mut self, key: E::Key, make: F) -> &mut E
    where
        F: FnOnce() -> E::Value,
    {
        let idx = match self.find(&key) {
            Some(idx) => idx,
            None => {
                self.reserve(1);
                let idx = place(&mut self.raw, &self.hash_builder, E::new(key, make()));
                self.raw.len += 1;
                idx
            }
        };
        match &mut self.raw.slots[idx] {
            Some(entry) => entry,
            None => unreachable!("slot {idx} was just located or filled"),
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<E::Value>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(Entry::into_value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<E>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        self.remove_at(idx, |_, _| {})
    }

    /// Empties slot `idx` and closes the hole. `on_move(from, to)` observes
    /// every entry the backward shift relocates.
    pub(crate) fn remove_at<F>(&mut self, idx: usize, on_move: F) -> Option<E>
    where
        F: FnMut(usize, usize),
    {
        let entry = self.raw.slots[idx].take()?;
        self.raw.len -= 1;
        self.shift_back(idx, on_move);
        Some(entry)
    }

    /// Backward-shift deletion.
    ///
    /// Walks the probe chain after `gap` up to the next empty slot. An entry
    /// whose home lies cyclically in `(gap, idx]` is still reachable and stays;
    /// any other entry would be cut off from its home by the hole, so it moves
    /// into the hole and its old slot becomes the new hole.
    fn shift_back<F>(&mut self, mut gap: usize, mut on_move: F)
    where
        F: FnMut(usize, usize),
    {
        let mask = self.raw.mask;
        let mut idx = gap;
        loop {
            idx = (idx + 1) & mask;
            let home_idx = match &self.raw.slots[idx] {
                Some(entry) => home(&self.hash_builder, mask, entry.key()),
                None => return,
            };
            let reachable = if gap <= idx {
                gap < home_idx && home_idx <= idx
            } else {
                gap < home_idx || home_idx <= idx
            };
            if reachable {
                continue;
            }
            self.raw.slots[gap] = self.raw.slots[idx].take();
            on_move(idx, gap);
            gap = idx;
        }
    }

    /// Makes room for `additional` more entries without exceeding half occupancy.
    pub fn reserve(&mut self, additional: usize) {
        let capacity = self.raw.capacity();
        if capacity == 0 {
            let wanted = self.initial_slots.max(slots_for(additional));
            self.raw = Slots::allocate(wanted);
            return;
        }
        let needed = self.raw.len.saturating_add(additional);
        if needed > capacity / 2 {
            self.resize(slots_for(needed));
        }
    }

    /// Rebuilds the table over a new slot array of the next power of two at
    /// or above `new_capacity`. The array never shrinks and always keeps room
    /// for the current entries at half occupancy.
    pub fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.raw.capacity();
        let count = new_capacity
            .max(old_capacity)
            .max(slots_for(self.raw.len))
            .next_power_of_two();

        let old = mem::replace(&mut self.raw, Slots::unallocated());
        let mut next = Slots::allocate(count);
        next.len = old.len;
        for entry in old.slots.into_vec().into_iter().flatten() {
            place(&mut next, &self.hash_builder, entry);
        }
        self.raw = next;

        debug!(
            component = COMP_TABLE,
            event = "resize",
            from = old_capacity,
            to = count,
            len = self.raw.len,
            "table resized"
        );
    }

    /// Lending iteration that can remove the entry it is positioned on.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, E, S> {
        CursorMut::new(self)
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        let mut cursor = self.cursor_mut();
        while let Some(entry) = cursor.next() {
            if !keep(entry) {
                // Positioned on the entry `next` just returned.
                let removed = cursor.remove();
                debug_assert!(removed.is_ok(), "retain cursor lost its entry");
            }
        }
    }

    /// Removes the first entry, in slot order, accepted by `matches`.
    pub fn remove_where<F>(&mut self, mut matches: F) -> Option<E>
    where
        F: FnMut(&E) -> bool,
    {
        let idx = self
            .raw
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&mut matches))?;
        self.remove_at(idx, |_, _| {})
    }

    /// Home slot of `key` under the current mask.
    #[cfg(test)]
    pub(crate) fn home_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        home(&self.hash_builder, self.raw.mask, key)
    }
}

impl<E, S> Clone for HashEntryTable<E, S>
where
    E: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            initial_slots: self.initial_slots,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<E, S> fmt::Debug for HashEntryTable<E, S>
where
    E: Entry,
    E::Key: fmt::Debug,
    E::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

impl<E, S> IntoIterator for HashEntryTable<E, S> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        IntoIter::new(self.raw.slots, self.raw.len)
    }
}

impl<'a, E, S> IntoIterator for &'a HashEntryTable<E, S> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}
