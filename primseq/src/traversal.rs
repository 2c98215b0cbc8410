//! Parallel traversal driven by spliterator splitting.
//!
//! A [`Spliterator`] is exposed to `rayon` as an unindexed producer: rayon
//! asks it to split while there is idle capacity, and each split hands off
//! the first half of the remaining range. Pieces at or below
//! [`TraversalConfig::min_split_size`] are never split, and pieces cover
//! disjoint ranges so they need no coordination.
//!
//! The free functions run on the current rayon pool (the global pool unless
//! called inside [`rayon::ThreadPool::install`]). [`Traversal`] owns a pool
//! sized by [`TraversalConfig::max_threads`] and reuses it across calls.

use rayon::{
    ThreadPool, ThreadPoolBuilder,
    iter::{
        ParallelIterator,
        plumbing::{Folder, UnindexedConsumer, UnindexedProducer, bridge_unindexed},
    },
};

use crate::{
    config::{ConfigError, ConfigResult, TraversalConfig},
    kind::Element,
    list::Spliterator,
};

/// Parallel iterator over the elements a spliterator has left.
#[derive(Debug, Clone)]
pub struct ParSpliterator<T: Element> {
    root: Spliterator<T>,
    min_split_size: usize,
}

/// Wraps `root` as a rayon parallel iterator, split no finer than `config` allows.
pub fn par_iter<T: Element>(root: Spliterator<T>, config: &TraversalConfig) -> ParSpliterator<T> {
    ParSpliterator {
        root,
        min_split_size: config.min_split_size,
    }
}

impl<T: Element> ParallelIterator for ParSpliterator<T> {
    type Item = T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        let producer = SpliteratorProducer {
            piece: self.root,
            min_split_size: self.min_split_size,
        };
        bridge_unindexed(producer, consumer)
    }
}

struct SpliteratorProducer<T: Element> {
    piece: Spliterator<T>,
    min_split_size: usize,
}

impl<T: Element> UnindexedProducer for SpliteratorProducer<T> {
    type Item = T;

    fn split(mut self) -> (Self, Option<Self>) {
        if self.piece.estimate_size() <= self.min_split_size {
            return (self, None);
        }
        match self.piece.try_split() {
            Some(prefix) => {
                tracing::trace!(
                    kind = T::KIND,
                    prefix = prefix.estimate_size(),
                    rest = self.piece.estimate_size(),
                    "split spliterator"
                );
                let prefix = Self {
                    piece: prefix,
                    min_split_size: self.min_split_size,
                };
                (prefix, Some(self))
            }
            None => (self, None),
        }
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self.piece)
    }
}

/// Calls `action` on every element on the current rayon pool.
///
/// Elements within one piece are visited in order; there is no ordering
/// between pieces.
pub fn par_for_each<T, F>(root: Spliterator<T>, config: &TraversalConfig, action: F)
where
    T: Element,
    F: Fn(T) + Send + Sync,
{
    par_iter(root, config).for_each(action)
}

/// Maps every element and folds the results on the current rayon pool.
///
/// Pieces are combined in source order, so an associative `reduce` yields
/// the same value as a sequential fold even if it is not commutative.
pub fn par_map_reduce<T, R, M, F>(
    root: Spliterator<T>,
    config: &TraversalConfig,
    identity: R,
    map: M,
    reduce: F,
) -> R
where
    T: Element,
    R: Clone + Send + Sync,
    M: Fn(T) -> R + Send + Sync,
    F: Fn(R, R) -> R + Send + Sync,
{
    par_iter(root, config)
        .map(map)
        .reduce(|| identity.clone(), reduce)
}

/// Traversal executor with its own thread pool.
///
/// # Example
///
/// ```
/// use primseq::{LongList, TraversalConfig, traversal::Traversal};
///
/// let traversal = Traversal::new(TraversalConfig { min_split_size: 64, max_threads: 2 })?;
/// let list = LongList::copy_of(1..=1000);
/// let sum = traversal.map_reduce(list.spliterator(), 0, |v| v, |a, b| a + b);
/// assert_eq!(sum, 500_500);
/// # Ok::<(), primseq::ConfigError>(())
/// ```
pub struct Traversal {
    pool: ThreadPool,
    config: TraversalConfig,
}

impl Traversal {
    /// Builds a pool of `config.max_threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThreadPool`] if the workers cannot be spawned.
    pub fn new(config: TraversalConfig) -> ConfigResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.max_threads)
            .thread_name(|i| format!("primseq-traversal-{i}"))
            .build()
            .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;
        tracing::debug!(
            threads = pool.current_num_threads(),
            min_split_size = config.min_split_size,
            "built traversal pool"
        );
        Ok(Self { pool, config })
    }

    /// Settings this executor was built from.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// [`par_for_each`] on this executor's pool.
    pub fn for_each<T, F>(&self, root: Spliterator<T>, action: F)
    where
        T: Element,
        F: Fn(T) + Send + Sync,
    {
        self.pool
            .install(|| par_for_each(root, &self.config, action))
    }

    /// [`par_map_reduce`] on this executor's pool.
    pub fn map_reduce<T, R, M, F>(&self, root: Spliterator<T>, identity: R, map: M, reduce: F) -> R
    where
        T: Element,
        R: Clone + Send + Sync,
        M: Fn(T) -> R + Send + Sync,
        F: Fn(R, R) -> R + Send + Sync,
    {
        self.pool
            .install(|| par_map_reduce(root, &self.config, identity, map, reduce))
    }
}

impl std::fmt::Debug for Traversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("threads", &self.threads())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;
    use crate::ImmutableList;

    fn config(min_split_size: usize, max_threads: usize) -> TraversalConfig {
        TraversalConfig {
            min_split_size,
            max_threads,
        }
    }

    #[test]
    fn test_small_sources_stay_whole() {
        let list = ImmutableList::of(&[1i64, 2, 3]);
        let producer = SpliteratorProducer {
            piece: list.spliterator(),
            min_split_size: 8,
        };
        let (whole, rest) = producer.split();
        assert!(rest.is_none());
        assert_eq!(whole.piece.estimate_size(), 3);
    }

    #[test]
    fn test_split_hands_off_prefix() {
        let values: Vec<i32> = (0..10).collect();
        let list = ImmutableList::of(&values);
        let producer = SpliteratorProducer {
            piece: list.spliterator(),
            min_split_size: 1,
        };
        let (prefix, rest) = producer.split();
        assert_eq!(prefix.piece.collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(rest.unwrap().piece.collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_par_map_reduce_sum() {
        let values: Vec<i64> = (1..=10_000).collect();
        let list = ImmutableList::from_vec(values);
        let sum = par_map_reduce(list.spliterator(), &config(100, 8), 0i64, |v| v, |a, b| a + b);
        assert_eq!(sum, 50_005_000);
    }

    #[test]
    fn test_par_map_reduce_preserves_order() {
        let list = ImmutableList::of(&['a', 'b', 'c', 'd', 'e', 'f']);
        let joined = par_map_reduce(
            list.spliterator(),
            &config(1, 4),
            String::new(),
            |c| c.to_string(),
            |mut a, b| {
                a.push_str(&b);
                a
            },
        );
        assert_eq!(joined, "abcdef");
    }

    #[test]
    fn test_par_for_each_visits_everything() {
        let list = ImmutableList::of(&[1i32; 257]);
        let count = AtomicUsize::new(0);
        par_for_each(list.spliterator(), &config(16, 8), |_| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(count.load(Ordering::Relaxed), 257);
    }

    #[test]
    fn test_traversal_runs_on_its_own_pool() {
        let traversal = Traversal::new(config(4, 2)).unwrap();
        assert_eq!(traversal.threads(), 2);

        let list = ImmutableList::copy_of(0..512i32);
        let workers = Mutex::new(HashSet::new());
        traversal.for_each(list.spliterator(), |_| {
            let name = std::thread::current().name().map(str::to_owned);
            workers.lock().unwrap().insert(name);
        });

        let workers = workers.into_inner().unwrap();
        assert!(!workers.is_empty() && workers.len() <= 2);
        assert!(workers.iter().all(|name| {
            name.as_deref()
                .is_some_and(|n| n.starts_with("primseq-traversal-"))
        }));
    }

    #[test]
    fn test_traversal_pool_is_reused() {
        let traversal = Traversal::new(config(8, 3)).unwrap();
        let list = ImmutableList::copy_of(1..=100i64);
        for _ in 0..4 {
            let sum = traversal.map_reduce(list.spliterator(), 0, |v| v, |a, b| a + b);
            assert_eq!(sum, 5050);
        }
        assert_eq!(traversal.threads(), 3);
    }
}
