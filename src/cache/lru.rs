//! Copy-on-write LRU cache.
//
// The whole cache state (key index plus recency list) is an immutable value
// published through an `ArcSwap`. Writers serialize on a mutex, clone the
// current state, mutate the clone and publish it in one atomic store, so a
// reader holding a snapshot never sees a half-applied change. Lookups that
// move an entry to the head change the list and therefore go through the
// writer path too.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::ConfigTrait;
use crate::error::{Error, Result};
use crate::table::{hash, DefaultHashBuilder, Entry, HashEntryTable, Pair};

use super::recency::{self, RecencyList};

pub const COMP_CACHE: &str = "lru_cache";

/// Callback invoked with every entry the cache evicts.
pub type EvictListener<K, V> = Box<dyn Fn(&K, &V) + Send + Sync>;

/// One published version of the cache.
#[derive(Clone)]
pub(crate) struct State<K, V, S> {
    /// Key to arena index in `list`.
    index: HashEntryTable<Pair<K, usize>, S>,
    list: RecencyList<K, V>,
}

impl<K, V, S> State<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn with_hasher(hash_builder: S) -> Self {
        Self {
            index: HashEntryTable::with_hasher(hash_builder),
            list: RecencyList::new(),
        }
    }

    fn slot<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|e| *e.value())
    }

    fn value<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.list.value(self.slot(key)?)
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_tail()?;
        self.index.remove(&key);
        Some((key, value))
    }
}

/// LruCache is a bounded map that evicts the least recently used entry.
///
/// Holds at most `max_size + 1` entries: a put of a new key first evicts the
/// least recently used entry whenever more than `max_size` are present.
/// Among entries never read, insertion order is recency order.
///
/// ```
/// use openhash::cache::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// for i in 1..=4 {
///     cache.put(i, i.to_string());
/// }
/// assert!(!cache.contains_key(&1));
/// assert!(cache.contains_key(&2) && cache.contains_key(&3) && cache.contains_key(&4));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    state: ArcSwap<State<K, V, S>>,
    writer: Mutex<()>,
    max_size: usize,
    listener: Option<EvictListener<K, V>>,
}

impl<K, V> LruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a cache with a fixed eviction bound. Fails when `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        Self::with_hasher(max_size, hash::default_hash_builder())
    }

    /// Creates a cache bounded by the `cache.max_size` setting.
    pub fn from_config(cfg: &impl ConfigTrait) -> Result<Self> {
        Self::new(cfg.cache().max_size)
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    pub fn with_hasher(max_size: usize, hash_builder: S) -> Result<Self> {
        if max_size == 0 {
            return Err(Error::InvalidArgument(
                "cache max_size must be positive".to_string(),
            ));
        }
        Ok(Self {
            state: ArcSwap::from_pointee(State::with_hasher(hash_builder)),
            writer: Mutex::new(()),
            max_size,
            listener: None,
        })
    }

    /// Registers a callback for evicted entries. It runs after the writer lock is released.
    pub fn on_evict<F>(mut self, listener: F) -> Self
    where
        F: Fn(&K, &V) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Private copy of the current state for a writer to mutate.
    fn fork(&self) -> State<K, V, S> {
        (**self.state.load()).clone()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.state.load().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up `key` and marks it as most recently used.
    ///
    /// A miss, or a hit on the entry that is already the most recent, takes no lock.
    /// Any other hit is a write: it takes the writer lock and publishes a fresh
    /// copy of the index and recency list, so it costs O(len) like `put`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        {
            let current = self.state.load();
            let idx = current.slot(key)?;
            if current.list.is_head(idx) {
                return current.list.value(idx).cloned();
            }
        }

        let _guard = self.writer.lock();
        let mut next = self.fork();
        let idx = next.slot(key)?;
        next.list.move_to_front(idx);
        let value = next.list.value(idx).cloned();
        self.state.store(Arc::new(next));
        value
    }

    /// Looks up `key` without touching recency. Lock-free.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.load().value(key).cloned()
    }

    /// Lock-free membership test; does not touch recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.load().index.contains_key(key)
    }

    /// Inserts or updates `key` and makes it the most recently used entry.
    /// Returns the previous value for `key`.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let (previous, evicted) = {
            let _guard = self.writer.lock();
            let mut next = self.fork();
            let outcome = match next.slot(&key) {
                Some(idx) => {
                    let previous = next.list.replace(idx, value);
                    next.list.move_to_front(idx);
                    (previous, None)
                }
                None => {
                    let evicted = if next.list.len() > self.max_size {
                        next.evict_lru()
                    } else {
                        None
                    };
                    let idx = next.list.push_front(key.clone(), value);
                    next.index.insert(key, idx);
                    (None, evicted)
                }
            };
            self.state.store(Arc::new(next));
            outcome
        };

        if let Some((key, value)) = evicted {
            trace!(
                component = COMP_CACHE,
                event = "evict",
                max_size = self.max_size,
                "least recently used entry evicted"
            );
            if let Some(listener) = &self.listener {
                listener(&key, &value);
            }
        }
        previous
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let _guard = self.writer.lock();
        let current = self.state.load_full();
        if !current.index.contains_key(key) {
            return None;
        }

        let mut next = (*current).clone();
        let idx = next.index.remove(key)?;
        let (_, value) = next.list.remove(idx)?;
        self.state.store(Arc::new(next));
        Some(value)
    }

    /// Drops every entry. Eviction listeners are not called.
    pub fn clear(&self) {
        let _guard = self.writer.lock();
        let current = self.state.load_full();
        let dropped = current.list.len();
        let hash_builder = current.index.hasher().clone();
        self.state.store(Arc::new(State::with_hasher(hash_builder)));
        debug!(component = COMP_CACHE, event = "clear", dropped, "cache cleared");
    }

    /// The current published state. Later writes never change it.
    pub fn snapshot(&self) -> Snapshot<K, V, S> {
        Snapshot {
            state: self.state.load_full(),
        }
    }

    /// True while `snapshot` is still the published state.
    #[cfg(test)]
    pub(crate) fn is_published(&self, snapshot: &Snapshot<K, V, S>) -> bool {
        Arc::ptr_eq(&self.state.load_full(), &snapshot.state)
    }

    #[cfg(test)]
    pub(crate) fn assert_linked(&self) {
        let state = self.state.load();
        state.list.assert_linked();
        assert_eq!(state.index.len(), state.list.len());
        for (key, _) in state.list.iter() {
            assert!(state.index.contains_key(key));
        }
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.state.load().list.len())
            .field("max_size", &self.max_size)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Immutable view of one published cache version.
pub struct Snapshot<K, V, S = DefaultHashBuilder> {
    state: Arc<State<K, V, S>>,
}

impl<K, V, S> Snapshot<K, V, S> {
    pub fn len(&self) -> usize {
        self.state.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> recency::Iter<'_, K, V> {
        self.state.list.iter()
    }
}

impl<K, V, S> Snapshot<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.value(key)
    }
}

impl<K, V, S> Clone for Snapshot<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V, S> crate::view::Map<K, V> for Snapshot<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.state.list.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.state.value(key)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&K, &V)) {
        for (k, v) in self.state.list.iter() {
            visitor(k, v);
        }
    }
}

impl<K, V, S> fmt::Display for Snapshot<K, V, S>
where
    K: Hash + Eq + fmt::Display,
    V: fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::view::fmt_map::<K, V, _>(self, f)
    }
}
