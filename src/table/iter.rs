//! Slot-skipping iterators over a table.

use std::iter::FusedIterator;
use std::slice;
use std::vec;

use super::entry::Entry;

/// Borrowing iterator over live entries, in slot order.
pub struct Iter<'a, E> {
    slots: slice::Iter<'a, Option<E>>,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(slots: &'a [Option<E>], len: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: len,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over live entries, in slot order.
pub struct IterMut<'a, E> {
    slots: slice::IterMut<'a, Option<E>>,
    remaining: usize,
}

impl<'a, E> IterMut<'a, E> {
    pub(crate) fn new(slots: &'a mut [Option<E>], len: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    fn next(&mut self) -> Option<&'a mut E> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for IterMut<'_, E> {}
impl<E> FusedIterator for IterMut<'_, E> {}

/// Owning iterator over entries.
pub struct IntoIter<E> {
    slots: vec::IntoIter<Option<E>>,
    remaining: usize,
}

impl<E> IntoIter<E> {
    pub(crate) fn new(slots: Box<[Option<E>]>, len: usize) -> Self {
        Self {
            slots: slots.into_vec().into_iter(),
            remaining: len,
        }
    }
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}
impl<E> FusedIterator for IntoIter<E> {}

/// Keys of a table's entries.
#[derive(Clone)]
pub struct Keys<'a, E> {
    inner: Iter<'a, E>,
}

impl<'a, E> Keys<'a, E> {
    pub(crate) fn new(inner: Iter<'a, E>) -> Self {
        Self { inner }
    }
}

impl<'a, E: Entry> Iterator for Keys<'a, E> {
    type Item = &'a E::Key;

    #[inline]
    fn next(&mut self) -> Option<&'a E::Key> {
        self.inner.next().map(Entry::key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E: Entry> ExactSizeIterator for Keys<'_, E> {}

/// Values of a table's entries.
#[derive(Clone)]
pub struct Values<'a, E> {
    inner: Iter<'a, E>,
}

impl<'a, E> Values<'a, E> {
    pub(crate) fn new(inner: Iter<'a, E>) -> Self {
        Self { inner }
    }
}

impl<'a, E: Entry> Iterator for Values<'a, E> {
    type Item = &'a E::Value;

    #[inline]
    fn next(&mut self) -> Option<&'a E::Value> {
        self.inner.next().map(Entry::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E: Entry> ExactSizeIterator for Values<'_, E> {}

/// Mutable values of a table's entries.
pub struct ValuesMut<'a, E> {
    inner: IterMut<'a, E>,
}

impl<'a, E> ValuesMut<'a, E> {
    pub(crate) fn new(inner: IterMut<'a, E>) -> Self {
        Self { inner }
    }
}

impl<'a, E: Entry> Iterator for ValuesMut<'a, E> {
    type Item = &'a mut E::Value;

    #[inline]
    fn next(&mut self) -> Option<&'a mut E::Value> {
        self.inner.next().map(Entry::value_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E: Entry> ExactSizeIterator for ValuesMut<'_, E> {}
