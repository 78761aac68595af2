//! Entry types stored in table slots.

use std::mem;

/// An object that lives in a table slot.
///
/// The table only needs to reach the key for hashing and comparison and to
/// swap values in place; everything else about the entry belongs to the
/// container that chose it.
pub trait Entry {
    type Key;
    type Value;

    fn new(key: Self::Key, value: Self::Value) -> Self;

    fn key(&self) -> &Self::Key;

    fn value(&self) -> &Self::Value;

    fn value_mut(&mut self) -> &mut Self::Value;

    /// Key and mutable value at once.
    fn split_mut(&mut self) -> (&Self::Key, &mut Self::Value);

    fn into_parts(self) -> (Self::Key, Self::Value);

    /// Overwrites the value in place, returning the previous one.
    #[inline]
    fn set_value(&mut self, value: Self::Value) -> Self::Value {
        mem::replace(self.value_mut(), value)
    }

    #[inline]
    fn into_value(self) -> Self::Value
    where
        Self: Sized,
    {
        self.into_parts().1
    }
}

/// Key/value map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry for Pair<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    fn split_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Set entry: a key with no value attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOnly<K> {
    key: K,
    unit: (),
}

impl<K> Entry for KeyOnly<K> {
    type Key = K;
    type Value = ();

    #[inline]
    fn new(key: K, _: ()) -> Self {
        Self { key, unit: () }
    }

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    fn value(&self) -> &() {
        &self.unit
    }

    #[inline]
    fn value_mut(&mut self) -> &mut () {
        &mut self.unit
    }

    #[inline]
    fn split_mut(&mut self) -> (&K, &mut ()) {
        (&self.key, &mut self.unit)
    }

    #[inline]
    fn into_parts(self) -> (K, ()) {
        (self.key, ())
    }
}
