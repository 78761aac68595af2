//! Seeded synthetic workloads that drive each container end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::bimap::BiMap;
use crate::cache::LruCache;
use crate::config::{ConfigTrait, Workload};
use crate::map::OpenHashMap;

pub const COMP_WORKLOAD: &str = "workload";

/// Outcome of one workload run.
#[derive(Debug, Clone)]
pub struct Report {
    pub container: &'static str,
    pub operations: usize,
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    pub final_len: usize,
    pub elapsed: Duration,
}

impl Report {
    fn new(container: &'static str) -> Self {
        Self {
            container,
            operations: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
            final_len: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.operations as f64 / secs
    }
}

/// Rejects workloads that cannot draw a key or would run no thread.
fn check(workload: &Workload) -> Result<()> {
    if workload.key_space == 0 {
        anyhow::bail!("workload.key_space must be positive");
    }
    if workload.threads == 0 {
        anyhow::bail!("workload.threads must be positive");
    }
    Ok(())
}

/// Mixed insert/lookup/remove traffic against an OpenHashMap.
pub fn run_map(workload: &Workload, initial_capacity: Option<usize>) -> Result<Report> {
    check(workload)?;
    let mut rng = StdRng::seed_from_u64(workload.seed);
    let mut map: OpenHashMap<u64, u64> = match initial_capacity {
        Some(capacity) => OpenHashMap::with_capacity(capacity),
        None => OpenHashMap::new(),
    };
    let mut report = Report::new("map");
    let started = Instant::now();

    for op in 0..workload.operations {
        let key = rng.gen_range(0..workload.key_space);
        match rng.gen_range(0..10) {
            0..=3 => {
                map.insert(key, op as u64);
            }
            4..=8 => match map.get(&key) {
                Some(_) => report.hits += 1,
                None => report.misses += 1,
            },
            _ => {
                map.remove(&key);
            }
        }
    }

    report.operations = workload.operations;
    report.final_len = map.len();
    report.elapsed = started.elapsed();
    debug!(
        component = COMP_WORKLOAD,
        event = "map_done",
        capacity = map.capacity(),
        len = map.len(),
        "map workload finished"
    );
    Ok(report)
}

/// Puts with colliding values so that pairings are constantly reassigned.
pub fn run_bimap(workload: &Workload) -> Result<Report> {
    check(workload)?;
    let mut rng = StdRng::seed_from_u64(workload.seed);
    let mut map: BiMap<u64, u64> = BiMap::new();
    let mut report = Report::new("bimap");
    let started = Instant::now();

    for _ in 0..workload.operations {
        let key = rng.gen_range(0..workload.key_space);
        let value = rng.gen_range(0..workload.key_space);
        match rng.gen_range(0..4) {
            0 | 1 => {
                map.insert(key, value);
            }
            2 => match map.get_by_value(&value) {
                Some(_) => report.hits += 1,
                None => report.misses += 1,
            },
            _ => {
                map.remove(&key);
            }
        }
    }

    report.operations = workload.operations;
    report.final_len = map.len();
    report.elapsed = started.elapsed();
    Ok(report)
}

/// Shared cache hammered by `workload.threads` threads, each with its own seed.
pub fn run_cache(workload: &Workload, max_size: usize) -> Result<Report> {
    check(workload)?;
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache: LruCache<u64, u64> = LruCache::new(max_size)
        .context("build cache")?
        .on_evict(move |_, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
    let hits = AtomicUsize::new(0);
    let misses = AtomicUsize::new(0);
    let per_thread = workload.operations / workload.threads;
    let started = Instant::now();

    thread::scope(|s| {
        for t in 0..workload.threads as u64 {
            let (cache, hits, misses) = (&cache, &hits, &misses);
            let seed = workload.seed.wrapping_add(t);
            let key_space = workload.key_space;
            s.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..per_thread {
                    let key = rng.gen_range(0..key_space);
                    if rng.gen_bool(0.7) {
                        match cache.get(&key) {
                            Some(_) => hits.fetch_add(1, Ordering::Relaxed),
                            None => misses.fetch_add(1, Ordering::Relaxed),
                        };
                    } else {
                        cache.put(key, key);
                    }
                }
            });
        }
    });

    let mut report = Report::new("cache");
    report.operations = per_thread * workload.threads;
    report.hits = hits.into_inner();
    report.misses = misses.into_inner();
    report.final_len = cache.len();
    report.evictions = evictions.load(Ordering::Relaxed);
    report.elapsed = started.elapsed();
    Ok(report)
}

/// Runs every workload configured in `cfg` and logs one line per container.
pub fn run_all(cfg: &impl ConfigTrait) -> Result<Vec<Report>> {
    let workload = cfg.workload();
    info!(
        component = COMP_WORKLOAD,
        event = "start",
        operations = workload.operations,
        key_space = workload.key_space,
        threads = workload.threads,
        "running workloads"
    );

    let reports = vec![
        run_map(&workload, cfg.table().initial_capacity)?,
        run_bimap(&workload)?,
        run_cache(&workload, cfg.cache().max_size)?,
    ];

    for report in &reports {
        info!(
            component = COMP_WORKLOAD,
            event = "report",
            container = report.container,
            operations = report.operations,
            hits = report.hits,
            misses = report.misses,
            evictions = report.evictions,
            final_len = report.final_len,
            elapsed_ms = report.elapsed.as_millis() as u64,
            ops_per_sec = report.ops_per_sec() as u64,
            "workload finished"
        );
    }
    Ok(reports)
}
