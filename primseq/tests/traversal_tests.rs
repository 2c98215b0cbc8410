//! Parallel traversal over lists and sorted sets

use std::collections::HashMap;
use std::sync::Mutex;

use primseq::{
    ConfigError, FloatList, IntSortedSet, LongList, Traversal, TraversalConfig,
    traversal::{par_for_each, par_iter, par_map_reduce},
};
use rayon::iter::ParallelIterator;

fn config_from(pairs: &[(&str, &str)]) -> Result<TraversalConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TraversalConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_from_lookup_sizes_pool() {
    let config = config_from(&[
        (TraversalConfig::MIN_SPLIT_SIZE_ENV, "100"),
        (TraversalConfig::MAX_THREADS_ENV, "3"),
    ])
    .unwrap();
    let traversal = Traversal::new(config).unwrap();
    assert_eq!(traversal.threads(), 3);
    assert_eq!(traversal.config().min_split_size, 100);

    let list = LongList::copy_of(0..1000);
    let count = traversal.map_reduce(list.spliterator(), 0usize, |_| 1, |a, b| a + b);
    assert_eq!(count, 1000);
}

#[test]
fn test_config_rejects_zero_threads() {
    let err = config_from(&[(TraversalConfig::MAX_THREADS_ENV, "0")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_sorted_set_views_traverse_in_parallel() {
    let set = IntSortedSet::copy_of((0..5000).rev());
    let window = set.sub_set(1000, 4000).unwrap();
    let config = TraversalConfig {
        min_split_size: 64,
        max_threads: 4,
    };
    let total = par_map_reduce(window.spliterator(), &config, 0i64, i64::from, |a, b| a + b);
    assert_eq!(total, (1000..4000).map(i64::from).sum::<i64>());
}

#[test]
fn test_par_for_each_sees_every_float() {
    let list = FloatList::copy_of((0..300).map(|i| i as f32 * 0.5));
    let seen = Mutex::new(Vec::new());
    let config = TraversalConfig {
        min_split_size: 10,
        max_threads: 6,
    };
    par_for_each(list.spliterator(), &config, |v| seen.lock().unwrap().push(v));

    let mut seen = seen.into_inner().unwrap();
    seen.sort_by(f32::total_cmp);
    assert_eq!(seen, list.to_vec());
}

#[test]
fn test_par_iter_composes_with_rayon_adapters() {
    let list = LongList::copy_of(0..2000);
    let config = TraversalConfig {
        min_split_size: 32,
        max_threads: 4,
    };
    let evens = par_iter(list.spliterator(), &config)
        .filter(|v| v % 2 == 0)
        .count();
    assert_eq!(evens, 1000);
}
