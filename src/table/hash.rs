//! Hash mixing for slot selection.

use std::hash::{BuildHasher, Hash};

use xxhash_rust::xxh3::Xxh3Builder;

/// Hasher builder used when a container is created without an explicit one.
pub type DefaultHashBuilder = Xxh3Builder;

/// Returns a fresh default hasher builder.
#[inline]
pub fn default_hash_builder() -> DefaultHashBuilder {
    Xxh3Builder::new()
}

/// Folds a 64-bit hash to 32 bits and avalanches it with two xor-shift rounds.
///
/// Weak hash functions tend to differ only in their high bits; the shifts
/// pull those bits down into the range the slot mask keeps.
#[inline]
pub fn mix(hash: u64) -> u32 {
    let mut h = (hash ^ (hash >> 32)) as u32;
    h ^= (h >> 20) ^ (h >> 12);
    h ^ (h >> 7) ^ (h >> 4)
}

/// Hashes a value with a fixed, seedless hasher.
///
/// Used where the result must not depend on the container's own hasher,
/// e.g. order-independent content hashes that two different maps must agree on.
#[inline]
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    Xxh3Builder::new().hash_one(value)
}
