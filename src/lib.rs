#[path = "shared/logs/mod.rs"]
pub mod logs;
#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod bimap;
pub mod cache;
pub mod config;
pub mod error;
pub mod map;
pub mod table;
pub mod view;
pub mod workload;

pub use bimap::BiMap;
pub use cache::LruCache;
pub use error::{Error, Result};
pub use map::{OpenHashMap, OpenHashSet};
pub use view::{Builder, Map, MapMut, ReadOnly};
