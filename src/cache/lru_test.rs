//! Tests for LRU eviction order and snapshot publication.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::cache::LruCache;
    use crate::config::test_config::new_test_config;
    use crate::error::Error;
    use crate::view::Map;

    fn cache(max_size: usize) -> LruCache<u32, String> {
        LruCache::new(max_size).expect("positive bound")
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        let err = LruCache::<u32, u32>::new(0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_eviction_follows_insertion_order() {
        let cache = cache(2);
        for i in 1..=4 {
            cache.put(i, i.to_string());
        }
        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&2));
        assert!(cache.contains_key(&3));
        assert!(cache.contains_key(&4));

        cache.put(5, "5".to_string());
        assert!(!cache.contains_key(&2), "2 is now the least recently used");
        assert!(cache.contains_key(&3));
        assert!(cache.contains_key(&5));
        cache.assert_linked();
    }

    #[test]
    fn test_eviction_follows_use() {
        let cache = cache(2);
        cache.put(1, "1".to_string());
        cache.put(2, "2".to_string());
        cache.put(3, "3".to_string());

        assert_eq!(cache.get(&3).as_deref(), Some("3"));
        assert_eq!(cache.get(&2).as_deref(), Some("2"));
        assert!(cache.get(&9).is_none());

        cache.put(4, "4".to_string());
        assert!(!cache.contains_key(&1), "1 was never read");
        assert!(cache.contains_key(&2));
        assert!(cache.contains_key(&3));
        assert!(cache.contains_key(&4));

        let order: Vec<u32> = cache.snapshot().iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec![4, 2, 3]);
        cache.assert_linked();
    }

    #[test]
    fn test_touching_protects_from_eviction() {
        let cache = cache(1);
        cache.put(1, "a".to_string());
        cache.put(2, "b".to_string());
        cache.get(&1);
        cache.put(3, "c".to_string());
        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
    }

    #[test]
    fn test_peek_and_contains_do_not_touch() {
        let cache = cache(1);
        cache.put(1, "a".to_string());
        cache.put(2, "b".to_string());
        assert_eq!(cache.peek(&1).as_deref(), Some("a"));
        assert!(cache.contains_key(&1));
        cache.put(3, "c".to_string());
        assert!(!cache.contains_key(&1), "peek must not refresh recency");
    }

    #[test]
    fn test_update_moves_to_front_without_growing() {
        let cache = cache(2);
        cache.put(1, "a".to_string());
        cache.put(2, "b".to_string());
        cache.put(3, "c".to_string());
        assert_eq!(cache.put(1, "a2".to_string()).as_deref(), Some("a"));
        assert_eq!(cache.len(), 3);

        cache.put(4, "d".to_string());
        assert!(!cache.contains_key(&2));
        assert_eq!(cache.peek(&1).as_deref(), Some("a2"));
        cache.assert_linked();
    }

    #[test]
    fn test_only_non_head_hits_publish_state() {
        let cache = cache(4);
        cache.put(1, "a".to_string());
        cache.put(2, "b".to_string());

        let before = cache.snapshot();
        assert_eq!(cache.get(&2).as_deref(), Some("b"));
        assert_eq!(cache.get(&9), None);
        assert!(cache.is_published(&before));

        assert_eq!(cache.get(&1).as_deref(), Some("a"));
        assert!(!cache.is_published(&before));
        let order: Vec<u32> = cache.snapshot().iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = cache(4);
        for i in 0..4 {
            cache.put(i, i.to_string());
        }
        assert_eq!(cache.remove(&2).as_deref(), Some("2"));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 3);
        cache.assert_linked();

        cache.clear();
        assert!(cache.is_empty());
        cache.put(7, "7".to_string());
        assert_eq!(cache.len(), 1);
        cache.assert_linked();
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let cache = cache(8);
        cache.put(1, "a".to_string());
        let before = cache.snapshot();
        cache.put(2, "b".to_string());
        cache.remove(&1);

        assert_eq!(before.len(), 1);
        assert_eq!(before.get(&1).map(String::as_str), Some("a"));
        assert!(Map::get(&before, &2).is_none());
        assert_eq!(before.to_string(), "{1=a}");

        let after = cache.snapshot();
        assert_eq!(after.len(), 1);
        assert!(after.get(&1).is_none());
    }

    #[test]
    fn test_listener_sees_every_eviction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cache = LruCache::new(2)
            .unwrap()
            .on_evict(move |k: &u32, _v: &u32| sink.lock().unwrap().push(*k));
        for i in 0..6 {
            cache.put(i, i);
        }
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_random_ops_keep_list_linked() {
        let mut rng = StdRng::seed_from_u64(3);
        let cache: LruCache<u16, u16> = LruCache::new(16).unwrap();
        for step in 0..5_000u16 {
            let key = rng.gen_range(0..64);
            match rng.gen_range(0..4) {
                0 | 1 => {
                    cache.put(key, step);
                }
                2 => {
                    cache.get(&key);
                }
                _ => {
                    cache.remove(&key);
                }
            }
            assert!(cache.len() <= cache.max_size() + 1);
        }
        cache.assert_linked();
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let cache: LruCache<u64, u64> = LruCache::new(64).unwrap();
        let evicted = AtomicUsize::new(0);

        thread::scope(|s| {
            for t in 0..4u64 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..2_000u64 {
                        let key = t * 10_000 + i % 200;
                        cache.put(key, key);
                        if let Some(v) = cache.get(&key) {
                            assert_eq!(v, key);
                        }
                    }
                });
            }
            for _ in 0..2 {
                s.spawn(|| {
                    for _ in 0..500 {
                        let snapshot = cache.snapshot();
                        let walked = snapshot.iter().count();
                        assert_eq!(walked, snapshot.len());
                        if walked > 65 {
                            evicted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(evicted.load(Ordering::Relaxed), 0, "bound exceeded in a snapshot");
        assert!(cache.len() <= 65);
        cache.assert_linked();
    }

    #[test]
    fn test_from_config_uses_configured_bound() {
        let cfg = new_test_config();
        let cache: LruCache<u32, u32> = LruCache::from_config(&cfg).unwrap();
        assert_eq!(cache.max_size(), 128);
    }
}
