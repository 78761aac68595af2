//! Removal-capable iteration over a table.
//
// The cursor walks the slot array from the top down. Removing the current
// entry runs the backward shift, which only ever moves entries towards lower
// indices (cyclically). An entry from the unvisited low part of the array can
// therefore only jump past the cursor by wrapping around the end; such
// entries are remembered by slot and handed out once the array is done.

use std::hash::{BuildHasher, Hash};

use crate::error::{Error, Result};

use super::entry::Entry;
use super::table::HashEntryTable;

/// Lending cursor over a table's entries with in-place removal.
///
/// ```
/// use openhash::table::{Entry, HashEntryTable, Pair};
///
/// let mut table: HashEntryTable<Pair<u32, u32>> = HashEntryTable::new();
/// for i in 0..10 {
///     table.insert(i, i * 10);
/// }
/// let mut cursor = table.cursor_mut();
/// while let Some(entry) = cursor.next() {
///     if entry.key() % 2 == 1 {
///         cursor.remove().unwrap();
///     }
/// }
/// assert_eq!(table.len(), 5);
/// ```
pub struct CursorMut<'a, E, S> {
    table: &'a mut HashEntryTable<E, S>,
    /// Slots at and above `pos` have been visited.
    pos: usize,
    current: Option<usize>,
    /// Slots of entries that wrapped from below the cursor to above it.
    wrapped: Vec<usize>,
    next_wrapped: usize,
    exhausted: bool,
}

impl<'a, E, S> CursorMut<'a, E, S>
where
    E: Entry,
    E::Key: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn new(table: &'a mut HashEntryTable<E, S>) -> Self {
        let pos = table.capacity();
        Self {
            table,
            pos,
            current: None,
            wrapped: Vec::new(),
            next_wrapped: 0,
            exhausted: false,
        }
    }

    /// Advances to the next live entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut E> {
        while self.pos > 0 {
            self.pos -= 1;
            if self.table.raw.slots[self.pos].is_some() {
                self.current = Some(self.pos);
                return self.table.raw.slots[self.pos].as_mut();
            }
        }
        if let Some(&idx) = self.wrapped.get(self.next_wrapped) {
            self.next_wrapped += 1;
            self.current = Some(idx);
            return self.table.raw.slots[idx].as_mut();
        }
        self.current = None;
        self.exhausted = true;
        None
    }

    /// Removes the entry returned by the last `next` call.
    pub fn remove(&mut self) -> Result<E> {
        let idx = match self.current.take() {
            Some(idx) => idx,
            None if self.exhausted => return Err(Error::IteratorExhausted),
            None => return Err(Error::NoCurrentEntry),
        };

        // Below `floor` lie the slots the array walk has not reached yet.
        let floor = if self.next_wrapped > 0 { 0 } else { idx };
        let wrapped = &mut self.wrapped;
        let removed = self.table.remove_at(idx, |from, to| {
            let mut tracked = false;
            for slot in wrapped.iter_mut().filter(|slot| **slot == from) {
                *slot = to;
                tracked = true;
            }
            if !tracked && from < floor && to >= floor {
                wrapped.push(to);
            }
        });
        removed.ok_or(Error::NoCurrentEntry)
    }
}
