//! Open-addressing hash table engine shared by every container in the crate.

pub mod cursor;
pub mod entry;
pub mod hash;
pub mod iter;
pub mod table;

#[cfg(test)]
mod table_test;

// Re-export main types
pub use cursor::CursorMut;
pub use entry::{Entry, KeyOnly, Pair};
pub use hash::DefaultHashBuilder;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use table::HashEntryTable;
