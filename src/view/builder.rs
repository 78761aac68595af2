//! Fluent construction of any map in the crate.

use super::contract::ReadOnly;

/// Accumulates mappings and produces a mutable or a read-only container.
///
/// ```
/// use openhash::map::OpenHashMap;
/// use openhash::view::{Builder, MapMut};
///
/// let mut frozen = Builder::new()
///     .put("a", 1)
///     .put("b", 2)
///     .build_read_only::<OpenHashMap<_, _>>();
/// assert_eq!(frozen.get("a"), Some(&1));
/// assert!(frozen.try_insert("c", 3).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Builder<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Builder<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Adds a mapping. Later puts for the same key win, as with `insert`.
    pub fn put(mut self, key: K, value: V) -> Self {
        self.entries.push((key, value));
        self
    }

    pub fn put_all<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.entries.extend(entries);
        self
    }

    /// Builds a mutable container, applying the puts in order.
    pub fn build<M>(self) -> M
    where
        M: FromIterator<(K, V)>,
    {
        self.entries.into_iter().collect()
    }

    /// Builds a container that rejects every later mutation.
    pub fn build_read_only<M>(self) -> ReadOnly<M>
    where
        M: FromIterator<(K, V)>,
    {
        ReadOnly::new(self.build())
    }
}

impl<K, V> Default for Builder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
