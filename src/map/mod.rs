//! Map and set containers built on the table engine.

pub mod iter;
pub mod open_map;
pub mod open_set;

#[cfg(test)]
mod map_test;

// Re-export main types
pub use iter::{IntoIter, Iter, IterMut};
pub use open_map::OpenHashMap;
pub use open_set::OpenHashSet;
