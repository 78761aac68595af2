//! Tests for the open-addressing engine: probing, growth and backward-shift deletion.

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::support::{hash_landing_on, FixedState};
    use crate::table::{Entry, HashEntryTable, Pair};

    type Table<K, V> = HashEntryTable<Pair<K, V>>;

    #[test]
    fn test_new_table_allocates_nothing() {
        let mut table: Table<u64, u64> = Table::new();
        assert_eq!(table.capacity(), 0);
        assert!(table.is_empty());
        assert!(table.get(&1).is_none());
        assert!(table.remove(&1).is_none());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_first_insert_allocates_default_slots() {
        let mut table: Table<u64, u64> = Table::new();
        table.insert(1, 10);
        assert_eq!(table.capacity(), crate::table::table::DEFAULT_SLOTS);
        assert_eq!(table.get(&1).map(|e| *e.value()), Some(10));
    }

    #[test]
    fn test_insert_existing_key_overwrites_in_place() {
        let mut table: Table<&str, u32> = Table::new();
        assert_eq!(table.insert("a", 1), None);
        assert_eq!(table.insert("a", 2), Some(1));
        assert_eq!(table.len(), 1, "re-inserting a key must not change size");
        assert_eq!(table.get("a").map(|e| *e.value()), Some(2));
    }

    #[test]
    fn test_grows_when_more_than_half_full() {
        let mut table: Table<u64, ()> = Table::new();
        for i in 0..8 {
            table.insert(i, ());
        }
        assert_eq!(table.capacity(), 16, "8 of 16 slots is exactly half");

        table.insert(8, ());
        assert_eq!(table.capacity(), 32);
        for i in 0..9 {
            assert!(table.contains_key(&i), "key {i} lost across resize");
        }
    }

    #[test]
    fn test_with_capacity_holds_requested_entries_without_growing() {
        let mut table: Table<u64, ()> = Table::with_capacity(100);
        table.insert(0, ());
        let slots = table.capacity();
        assert_eq!(slots, 256);
        for i in 1..100 {
            table.insert(i, ());
        }
        assert_eq!(table.capacity(), slots);
    }

    #[test]
    fn test_resize_safety_with_random_keys() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut table: Table<u64, u64> = Table::new();
        let mut expected = HashSet::new();
        while expected.len() < 1000 {
            let key: u64 = rng.gen();
            if expected.insert(key) {
                table.insert(key, key ^ 0xFF);
            }
        }

        assert_eq!(table.len(), 1000);
        let seen: Vec<u64> = table.iter().map(|e| *e.key()).collect();
        assert_eq!(seen.len(), 1000, "iteration must not duplicate or skip");
        let seen: HashSet<u64> = seen.into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_random_operations_match_std_hashmap() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut table: Table<u32, u32> = Table::new();
        let mut model: HashMap<u32, u32> = HashMap::new();

        for step in 0..20_000u32 {
            let key = rng.gen_range(0..512);
            if rng.gen_bool(0.6) {
                assert_eq!(table.insert(key, step), model.insert(key, step));
            } else {
                assert_eq!(table.remove(&key), model.remove(&key));
            }
            assert_eq!(table.len(), model.len());
        }

        for key in 0..512 {
            assert_eq!(table.get(&key).map(|e| *e.value()), model.get(&key).copied());
        }
    }

    #[test]
    fn test_removing_middle_of_collision_chain_keeps_tail_reachable() {
        let mut table: HashEntryTable<Pair<&str, u32>, _> = HashEntryTable::with_hasher(FixedState(3));
        table.insert("first", 1);
        table.insert("second", 2);
        table.insert("third", 3);

        assert_eq!(table.remove("second"), Some(2));
        assert_eq!(table.get("third").map(|e| *e.value()), Some(3));
        assert_eq!(table.get("first").map(|e| *e.value()), Some(1));
        assert_eq!(table.len(), 2);

        // The hole was closed, so the chain is contiguous again.
        let home = table.home_of("third");
        assert!(table.raw.slots[home].is_some());
        assert!(table.raw.slots[(home + 1) & table.raw.mask].is_some());
        assert!(table.raw.slots[(home + 2) & table.raw.mask].is_none());
    }

    #[test]
    fn test_removing_middle_of_same_home_keys_with_default_hasher() {
        let mut table: Table<u64, u64> = Table::new();
        table.insert(u64::MAX, 0);
        table.clear();

        let target = table.home_of(&0u64);
        let colliding: Vec<u64> = (0u64..)
            .filter(|k| table.home_of(k) == target)
            .take(3)
            .collect();
        for key in &colliding {
            table.insert(*key, *key);
        }
        assert_eq!(table.capacity(), 16);

        table.remove(&colliding[1]);
        assert_eq!(table.get(&colliding[2]).map(|e| *e.value()), Some(colliding[2]));
        assert_eq!(table.get(&colliding[0]).map(|e| *e.value()), Some(colliding[0]));
        assert!(table.get(&colliding[1]).is_none());
    }

    #[test]
    fn test_backward_shift_across_the_array_end() {
        let last = hash_landing_on(15, 16);
        let mut table: HashEntryTable<Pair<u32, u32>, _> = HashEntryTable::with_hasher(FixedState(last));
        for i in 0..4 {
            table.insert(i, i);
        }
        // Chain occupies slots 15, 0, 1, 2.
        assert!(table.raw.slots[15].is_some());
        assert!(table.raw.slots[2].is_some());

        assert_eq!(table.remove(&0), Some(0));
        for i in 1..4 {
            assert_eq!(table.get(&i).map(|e| *e.value()), Some(i), "key {i} unreachable");
        }
        assert!(table.raw.slots[2].is_none(), "tail slot must be vacated");
    }

    #[test]
    fn test_entries_with_other_homes_are_not_shifted_past_their_home() {
        let mut table: Table<u64, u64> = Table::new();
        table.insert(u64::MAX, 0);
        table.clear();

        // Two keys at home 4, then one key whose home is 5 (lands in 6).
        let at = |slot: usize| (0u64..).find(|k| table.home_of(k) == slot).unwrap();
        let a = at(4);
        let b = (a + 1..).find(|k| table.home_of(k) == 4).unwrap();
        let c = at(5);
        table.insert(a, 1);
        table.insert(b, 2);
        table.insert(c, 3);

        table.remove(&a);
        assert_eq!(table.get(&b).map(|e| *e.value()), Some(2));
        assert_eq!(table.get(&c).map(|e| *e.value()), Some(3));
        assert_eq!(table.find(&b), Some(4));
        assert_eq!(table.find(&c), Some(5));
    }

    #[test]
    fn test_clear_keeps_slot_array() {
        let mut table: Table<u64, u64> = Table::new();
        for i in 0..100 {
            table.insert(i, i);
        }
        let slots = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), slots);
        assert!(table.get(&5).is_none());
        table.insert(5, 5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_drain_moves_everything_out() {
        let mut table: Table<u64, u64> = Table::new();
        for i in 0..20 {
            table.insert(i, i * 2);
        }
        let mut drained: Vec<(u64, u64)> = table.drain().map(Entry::into_parts).collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..20).map(|i| (i, i * 2)).collect::<Vec<_>>());
        assert!(table.is_empty());
        assert!(table.capacity() >= 32);
    }

    #[test]
    fn test_retain_drops_rejected_entries() {
        let mut table: Table<u64, u64> = Table::new();
        for i in 0..300 {
            table.insert(i, i);
        }
        table.retain(|e| e.key() % 3 == 0);
        assert_eq!(table.len(), 100);
        for i in 0..300 {
            assert_eq!(table.contains_key(&i), i % 3 == 0);
        }
    }

    #[test]
    fn test_get_or_insert_with_only_builds_missing_values() {
        let mut table: Table<&str, Vec<u32>> = Table::new();
        table.get_or_insert_with("a", Vec::new).value_mut().push(1);
        table.get_or_insert_with("a", || unreachable!()).value_mut().push(2);
        assert_eq!(table.get("a").map(|e| e.value().clone()), Some(vec![1, 2]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_where_takes_first_match() {
        let mut table: Table<u64, &str> = Table::new();
        table.insert(1, "x");
        table.insert(2, "y");
        let removed = table.remove_where(|e| *e.value() == "y").map(Entry::into_parts);
        assert_eq!(removed, Some((2, "y")));
        assert!(table.remove_where(|e| *e.value() == "y").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_explicit_resize_never_shrinks() {
        let mut table: Table<u64, u64> = Table::new();
        for i in 0..40 {
            table.insert(i, i);
        }
        let slots = table.capacity();
        table.resize(4);
        assert_eq!(table.capacity(), slots);
        table.resize(slots * 4);
        assert_eq!(table.capacity(), slots * 4);
        for i in 0..40 {
            assert!(table.contains_key(&i));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut table: Table<u64, u64> = Table::new();
        table.insert(1, 1);
        let mut copy = table.clone();
        copy.insert(2, 2);
        copy.remove(&1);
        assert!(table.contains_key(&1));
        assert!(!table.contains_key(&2));
        assert_eq!(copy.len(), 1);
    }
}
