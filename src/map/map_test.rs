//! Tests for OpenHashMap as a general-purpose map.

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;
    use std::hash::{Hash, Hasher};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::test_config::new_test_config;
    use crate::error::Error;
    use crate::map::OpenHashMap;
    use crate::support::FixedState;
    use crate::table::Entry;
    use crate::view::{Map, MapMut};

    #[test]
    fn test_insert_get_remove() {
        let mut map = OpenHashMap::new();
        assert_eq!(map.insert("a".to_string(), 1), None);
        assert_eq!(map.insert("b".to_string(), 2), None);
        assert_eq!(map.insert("a".to_string(), 3), Some(1));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.get_key_value("b"), Some((&"b".to_string(), &2)));
        assert_eq!(map.remove("a"), Some(3));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("a"));
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&3));
    }

    #[test]
    fn test_get_mut_and_get_or_insert_with() {
        let mut map: OpenHashMap<u32, Vec<u32>> = OpenHashMap::new();
        map.get_or_insert_with(1, Vec::new).push(10);
        map.get_or_insert_with(1, Vec::new).push(11);
        if let Some(list) = map.get_mut(&1) {
            list.push(12);
        }
        assert_eq!(map[&1], vec![10, 11, 12]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    #[should_panic(expected = "key not present")]
    fn test_index_panics_on_missing_key() {
        let map: OpenHashMap<u32, u32> = OpenHashMap::new();
        let _ = map[&7];
    }

    #[test]
    fn test_matches_std_hash_map_under_random_ops() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut map: OpenHashMap<u16, u32> = OpenHashMap::new();
        let mut model: HashMap<u16, u32> = HashMap::new();

        for step in 0..30_000u32 {
            let key = rng.gen_range(0..512u16);
            match rng.gen_range(0..4) {
                0 | 1 => assert_eq!(map.insert(key, step), model.insert(key, step)),
                2 => assert_eq!(map.remove(&key), model.remove(&key)),
                _ => assert_eq!(map.get(&key), model.get(&key)),
            }
            assert_eq!(map.len(), model.len());
        }

        let mut collected: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<_> = model.into_iter().collect();
        collected.sort_unstable();
        expected.sort_unstable();
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_iterators_cover_every_mapping() {
        let mut map: OpenHashMap<u32, u32> = (0..100).map(|i| (i, i * 2)).collect();
        assert_eq!(map.iter().len(), 100);
        assert_eq!(map.keys().copied().sum::<u32>(), (0..100).sum::<u32>());
        assert_eq!(map.values().copied().sum::<u32>(), (0..100).map(|i| i * 2).sum::<u32>());

        for (_, v) in map.iter_mut() {
            *v += 1;
        }
        for v in map.values_mut() {
            *v += 1;
        }
        for (k, v) in &map {
            assert_eq!(*v, k * 2 + 2);
        }

        let mut owned: Vec<_> = map.into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned.len(), 100);
        assert_eq!(owned[5], (5, 12));
    }

    #[test]
    fn test_drain_empties_but_keeps_capacity() {
        let mut map: OpenHashMap<u32, u32> = (0..20).map(|i| (i, i)).collect();
        let capacity = map.capacity();
        let drained: Vec<_> = map.drain().collect();
        assert_eq!(drained.len(), 20);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        map.insert(1, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_retain_with_colliding_keys() {
        let mut map = OpenHashMap::with_hasher(FixedState(9));
        for i in 0..12u32 {
            map.insert(i, i);
        }
        map.retain(|k, v| {
            *v += 100;
            k % 3 == 0
        });
        assert_eq!(map.len(), 4);
        for k in [0, 3, 6, 9] {
            assert_eq!(map.get(&k), Some(&(k + 100)));
        }
        for k in [1, 2, 4, 11] {
            assert!(!map.contains_key(&k));
        }
    }

    #[test]
    fn test_cursor_removal_through_map() {
        let mut map: OpenHashMap<u32, u32> = (0..50).map(|i| (i, i)).collect();
        let mut cursor = map.cursor_mut();
        while let Some(entry) = cursor.next() {
            if entry.value() % 2 == 0 {
                cursor.remove().unwrap();
            }
        }
        assert_eq!(map.len(), 25);
        assert!(map.keys().all(|k| k % 2 == 1));
    }

    #[test]
    fn test_equality_ignores_insertion_order_and_capacity() {
        let a: OpenHashMap<u32, &str> = [(1, "x"), (2, "y"), (3, "z")].into_iter().collect();
        let mut b = OpenHashMap::with_capacity(1000);
        b.insert(3, "z");
        b.insert(1, "x");
        b.insert(2, "y");
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());

        b.insert(2, "w");
        assert_ne!(a, b);
        b.remove(&2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_std_hash_agrees_with_equality() {
        fn std_hash<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }
        let a: OpenHashMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
        let b: OpenHashMap<u32, u32> = (0..10).rev().map(|i| (i, i)).collect();
        assert_eq!(std_hash(&a), std_hash(&b));
    }

    #[test]
    fn test_display_and_debug() {
        let mut map: OpenHashMap<&str, u32> = OpenHashMap::new();
        assert_eq!(map.to_string(), "{}");
        map.insert("k", 1);
        assert_eq!(map.to_string(), "{k=1}");
        assert_eq!(format!("{map:?}"), "{\"k\": 1}");

        map.insert("j", 2);
        let rendered = map.to_string();
        assert!(rendered == "{k=1, j=2}" || rendered == "{j=2, k=1}", "{rendered}");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a: OpenHashMap<u32, String> = OpenHashMap::new();
        a.insert(1, "one".to_string());
        let mut b = a.clone();
        b.insert(2, "two".to_string());
        b.get_mut(&1).unwrap().push('!');
        assert_eq!(a.len(), 1);
        assert_eq!(a[&1], "one");
        assert_eq!(b[&1], "one!");
    }

    #[test]
    fn test_contract_calls() {
        let mut map: OpenHashMap<u32, u32> = OpenHashMap::new();
        assert_eq!(map.try_insert(1, 1), Ok(None));
        assert_eq!(map.try_insert(1, 2), Ok(Some(1)));
        assert_eq!(map.try_remove(&1), Ok(Some(2)));
        map.insert(5, 5);
        assert_eq!(map.try_clear(), Ok(()));
        assert!(map.is_empty());
    }

    #[test]
    fn test_read_only_map_rejects_mutation() {
        let map: OpenHashMap<u32, u32> = [(1, 1)].into_iter().collect();
        let mut frozen = map.read_only();
        assert_eq!(frozen.get(&1), Some(&1));
        assert_eq!(frozen.try_insert(2, 2), Err(Error::ReadOnly));
        assert_eq!(frozen.try_remove(&1), Err(Error::ReadOnly));
        assert_eq!(frozen.try_clear(), Err(Error::ReadOnly));
        assert_eq!(frozen.len(), 1);
    }

    #[test]
    fn test_from_config_presizes_table() {
        let cfg = new_test_config();
        let mut map: OpenHashMap<u32, u32> = OpenHashMap::from_config(&cfg);
        map.insert(0, 0);
        assert_eq!(map.capacity(), 128, "64 entries at half load need 128 slots");
        for i in 1..64 {
            map.insert(i, i);
        }
        assert_eq!(map.capacity(), 128);
    }
}
