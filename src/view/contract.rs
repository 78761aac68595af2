//! The associative-container contract shared by every map in the crate.

use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::table::hash::stable_hash;

/// Read side of the map contract.
///
/// Object safe, so heterogeneous maps can be compared through `&dyn Map`.
pub trait Map<K, V> {
    fn len(&self) -> usize;

    fn get(&self, key: &K) -> Option<&V>;

    /// Visits every mapping once, in unspecified order.
    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V));

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Linear scan unless the implementation indexes values.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut found = false;
        self.for_each(&mut |_, v| found = found || v == value);
        found
    }
}

/// Mutating side of the map contract.
///
/// Mutable containers always succeed; read-only ones refuse with [`Error::ReadOnly`].
pub trait MapMut<K, V>: Map<K, V> {
    fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>>;

    fn try_remove(&mut self, key: &K) -> Result<Option<V>>;

    fn try_clear(&mut self) -> Result<()>;
}

impl<K, V, M> Map<K, V> for &M
where
    M: Map<K, V> + ?Sized,
{
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        (**self).get(key)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V)) {
        (**self).for_each(visitor)
    }

    fn contains_key(&self, key: &K) -> bool {
        (**self).contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        (**self).contains_value(value)
    }
}

/// Two maps are equal when they hold the same mappings, whatever their types.
pub fn map_eq<K, V, A, B>(a: &A, b: &B) -> bool
where
    A: Map<K, V> + ?Sized,
    B: Map<K, V> + ?Sized,
    V: PartialEq,
{
    if a.len() != b.len() {
        return false;
    }
    let mut equal = true;
    a.for_each(&mut |k, v| {
        if equal && b.get(k) != Some(v) {
            equal = false;
        }
    });
    equal
}

/// Order-independent content hash: the wrapping sum of `hash(key) ^ hash(value)`.
///
/// Uses a fixed hasher, so maps that compare equal hash equal regardless of
/// their own hasher or concrete type.
pub fn map_hash_code<K, V, M>(map: &M) -> u64
where
    K: Hash,
    V: Hash,
    M: Map<K, V> + ?Sized,
{
    let mut sum = 0u64;
    map.for_each(&mut |k, v| {
        sum = sum.wrapping_add(stable_hash(k) ^ stable_hash(v));
    });
    sum
}

/// Renders `{k1=v1, k2=v2}`.
pub fn fmt_map<K, V, M>(map: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    K: fmt::Display,
    V: fmt::Display,
    M: Map<K, V> + ?Sized,
{
    f.write_str("{")?;
    let mut first = true;
    let mut result = Ok(());
    map.for_each(&mut |k, v| {
        if result.is_err() {
            return;
        }
        result = if first {
            write!(f, "{k}={v}")
        } else {
            write!(f, ", {k}={v}")
        };
        first = false;
    });
    result?;
    f.write_str("}")
}

/// Permanently read-only wrapper. Reads pass through, mutations fail.
#[derive(Debug, Clone)]
pub struct ReadOnly<M> {
    inner: M,
}

impl<M> ReadOnly<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Deref for ReadOnly<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.inner
    }
}

impl<K, V, M> Map<K, V> for ReadOnly<M>
where
    M: Map<K, V>,
{
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V)) {
        self.inner.for_each(visitor)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.contains_value(value)
    }
}

impl<K, V, M> MapMut<K, V> for ReadOnly<M>
where
    M: Map<K, V>,
{
    fn try_insert(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        Err(Error::ReadOnly)
    }

    fn try_remove(&mut self, _key: &K) -> Result<Option<V>> {
        Err(Error::ReadOnly)
    }

    fn try_clear(&mut self) -> Result<()> {
        Err(Error::ReadOnly)
    }
}

impl<M: PartialEq> PartialEq for ReadOnly<M> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<M: Eq> Eq for ReadOnly<M> {}

impl<M: Hash> Hash for ReadOnly<M> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl<M: fmt::Display> fmt::Display for ReadOnly<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
