//! Immutable collections of unboxed scalar values.
//!
//! This crate provides list and sorted-set semantics over eight scalar kinds
//! (`bool`, `i8`, `i16`, `char`, `i32`, `i64`, `f32`, `f64`) without boxing.
//! One generic engine is written against the [`Element`] trait and
//! monomorphized per kind.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the collections as plain sequences
//! - `yaml`: load [`TraversalConfig`] from YAML
//! - `logging`: [`logger::init_logging`] installs a `tracing` subscriber
//!
//! # Collections
//!
//! - [`ImmutableList`]: fixed-length list; `sub_list` returns views that
//!   share the parent's buffer
//! - [`ImmutableSortedSet`]: strictly ascending list plus an ordering, with
//!   `head_set`/`tail_set`/`sub_set` views
//! - [`BoolSortedSet`]: storage-free boolean sets with canonical instances
//!
//! Mutating-shaped methods (`add`, `remove`, `clear`, ...) only succeed when
//! the call would not change anything; otherwise they return
//! [`Error::UnsupportedMutation`].
//!
//! ```
//! use primseq::{DoubleList, Error};
//!
//! let list = DoubleList::of(&[0.5, 1.5, 2.5]);
//! assert_eq!(list.sub_list(1, 3)?.to_vec(), vec![1.5, 2.5]);
//! assert_eq!(list.remove_all([]), Ok(false));
//! assert!(matches!(list.clear(), Err(Error::UnsupportedMutation { .. })));
//! # Ok::<(), primseq::Error>(())
//! ```

mod bool_set;
mod comparator;
pub mod config;
mod error;
pub mod kind;
pub mod list;
#[cfg(feature = "logging")]
pub mod logger;
#[cfg(feature = "serde")]
mod serde_impl;
mod sorted_set;
pub mod traversal;

pub use bool_set::{BoolIter, BoolShape, BoolSortedSet};
pub use comparator::Comparator;
pub use config::{ConfigError, ConfigResult, TraversalConfig};
pub use error::{Error, IllegalRange, Result};
pub use kind::{Element, SortedElement};
pub use list::{Characteristics, DequeView, ImmutableList, ListCursor, Spliterator};
pub use sorted_set::ImmutableSortedSet;
pub use traversal::Traversal;

// ============================================================================
// Per-kind aliases
// ============================================================================

/// List of `bool`.
pub type BoolList = ImmutableList<bool>;
/// List of `i8`.
pub type ByteList = ImmutableList<i8>;
/// List of `i16`.
pub type ShortList = ImmutableList<i16>;
/// List of `char`.
pub type CharList = ImmutableList<char>;
/// List of `i32`.
pub type IntList = ImmutableList<i32>;
/// List of `i64`.
pub type LongList = ImmutableList<i64>;
/// List of `f32`.
pub type FloatList = ImmutableList<f32>;
/// List of `f64`.
pub type DoubleList = ImmutableList<f64>;

/// Sorted set of `i8`.
pub type ByteSortedSet = ImmutableSortedSet<i8>;
/// Sorted set of `i16`.
pub type ShortSortedSet = ImmutableSortedSet<i16>;
/// Sorted set of `char`.
pub type CharSortedSet = ImmutableSortedSet<char>;
/// Sorted set of `i32`.
pub type IntSortedSet = ImmutableSortedSet<i32>;
/// Sorted set of `i64`.
pub type LongSortedSet = ImmutableSortedSet<i64>;
/// Sorted set of `f32`.
pub type FloatSortedSet = ImmutableSortedSet<f32>;
/// Sorted set of `f64`.
pub type DoubleSortedSet = ImmutableSortedSet<f64>;
