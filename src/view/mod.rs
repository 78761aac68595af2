//! Map contract and the views that translate it onto a table.

pub mod builder;
pub mod contract;
pub mod sets;


// Re-export main types
pub use builder::Builder;
pub use contract::{fmt_map, map_eq, map_hash_code, Map, MapMut, ReadOnly};
pub use sets::{EntrySet, KeySet, ValueCollection};
