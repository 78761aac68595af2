//! Removal-capable iteration over one direction of a [`BiMap`](super::BiMap).

use std::hash::{BuildHasher, Hash};

use crate::error::Result;
use crate::table::{CursorMut, Entry, Pair};

use super::bimap::Side;

/// Walks the `a -> b` side. Removing the current mapping also drops its
/// mirror `b -> a` from the other side.
///
/// Entries are handed out by shared reference: rewriting a value in place
/// would leave the other side stale.
pub struct BiCursorMut<'a, A, B, S> {
    cursor: CursorMut<'a, Pair<A, B>, S>,
    mirror: &'a mut Side<B, A, S>,
}

impl<'a, A, B, S> BiCursorMut<'a, A, B, S>
where
    A: Hash + Eq,
    B: Hash + Eq,
    S: BuildHasher,
{
    pub(crate) fn new(side: &'a mut Side<A, B, S>, mirror: &'a mut Side<B, A, S>) -> Self {
        Self {
            cursor: side.cursor_mut(),
            mirror,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&A, &B)> {
        self.cursor.next().map(|e| (e.key(), e.value()))
    }

    /// Removes the mapping returned by the last `next` call from both sides.
    pub fn remove(&mut self) -> Result<(A, B)> {
        let (a, b) = self.cursor.remove()?.into_parts();
        self.mirror.remove(&b);
        Ok((a, b))
    }
}
