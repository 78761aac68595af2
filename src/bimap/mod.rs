//! Bidirectional map with unique keys and unique values.

pub mod bimap;
pub mod cursor;
pub mod inverse;


// Re-export main types
pub use bimap::BiMap;
pub use cursor::BiCursorMut;
pub use inverse::{Inverse, InverseMut};
