//! Bounded LRU cache with copy-on-write state publication.

pub mod lru;
pub mod recency;

#[cfg(test)]
mod lru_test;

// Re-export main types
pub use lru::{EvictListener, LruCache, Snapshot};
