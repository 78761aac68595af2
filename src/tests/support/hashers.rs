// Deterministic hashers for forcing probe-chain layouts.

use std::hash::{BuildHasher, Hasher};

use crate::table::hash::mix;

/// Every key hashes to the same value, so every key shares one home slot.
#[derive(Debug, Clone, Copy)]
pub struct FixedState(pub u64);

impl BuildHasher for FixedState {
    type Hasher = FixedHasher;

    fn build_hasher(&self) -> FixedHasher {
        FixedHasher(self.0)
    }
}

pub struct FixedHasher(u64);

impl Hasher for FixedHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

/// Keys fall into `buckets` groups; `salt` scatters the groups over the slots.
/// Produces long, overlapping, wrapping probe chains.
#[derive(Debug, Clone, Copy)]
pub struct ClusterState {
    pub buckets: u64,
    pub salt: u64,
}

impl BuildHasher for ClusterState {
    type Hasher = ClusterHasher;

    fn build_hasher(&self) -> ClusterHasher {
        ClusterHasher {
            state: *self,
            acc: 0,
        }
    }
}

pub struct ClusterHasher {
    state: ClusterState,
    acc: u64,
}

impl Hasher for ClusterHasher {
    fn finish(&self) -> u64 {
        (self.acc % self.state.buckets.max(1)).wrapping_mul(self.state.salt)
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.acc = self.acc.wrapping_mul(31).wrapping_add(u64::from(*b));
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.acc = self.acc.wrapping_mul(31).wrapping_add(n);
    }
}

/// Smallest raw hash whose mixed form lands on `slot` in a `capacity`-slot array.
pub fn hash_landing_on(slot: usize, capacity: usize) -> u64 {
    let mask = capacity - 1;
    (0u64..)
        .find(|h| mix(*h) as usize & mask == slot)
        .expect("some hash lands on every slot")
}
