//! Sorted sets over the two-valued boolean domain.
//!
//! A set of booleans is one of three shapes, so it never needs storage.
//! Under the natural ordering the four possible sets are process-wide
//! constants; building the same set twice returns the same `Arc`.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use once_cell::sync::Lazy;

use crate::{
    comparator::{Comparator, compare_with},
    error::{Error, IllegalRange, Result},
    list::{Characteristics, DequeView, ImmutableList, Spliterator},
};

/// Which of the boolean values a [`BoolSortedSet`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolShape {
    /// Neither value.
    Empty,
    /// Exactly the given value.
    Singleton(bool),
    /// Both values.
    Full,
}

/// Iterator over the values of a [`BoolSortedSet`].
pub type BoolIter = std::iter::Take<std::array::IntoIter<bool, 2>>;

/// An immutable sorted set of booleans.
///
/// # Example
///
/// ```
/// use primseq::BoolSortedSet;
/// use std::sync::Arc;
///
/// let set = BoolSortedSet::copy_of([true, true, false]);
/// assert!(Arc::ptr_eq(&set, &BoolSortedSet::full()));
/// assert_eq!(set.head_set(true).len(), 1);
/// assert_eq!(set.remove_all([]), Ok(false));
/// ```
#[derive(Clone)]
pub struct BoolSortedSet {
    shape: BoolShape,
    comparator: Option<Comparator<bool>>,
}

static EMPTY: Lazy<Arc<BoolSortedSet>> = Lazy::new(|| BoolSortedSet::natural(BoolShape::Empty));
static ONLY_FALSE: Lazy<Arc<BoolSortedSet>> =
    Lazy::new(|| BoolSortedSet::natural(BoolShape::Singleton(false)));
static ONLY_TRUE: Lazy<Arc<BoolSortedSet>> =
    Lazy::new(|| BoolSortedSet::natural(BoolShape::Singleton(true)));
static FULL: Lazy<Arc<BoolSortedSet>> = Lazy::new(|| BoolSortedSet::natural(BoolShape::Full));

/// Every list a boolean set can present, indexed by [`BoolSortedSet::list_slot`].
static LISTS: Lazy<[ImmutableList<bool>; 5]> = Lazy::new(|| {
    [
        ImmutableList::empty(),
        ImmutableList::of(&[false]),
        ImmutableList::of(&[true]),
        ImmutableList::of(&[false, true]),
        ImmutableList::of(&[true, false]),
    ]
});

impl BoolSortedSet {
    fn natural(shape: BoolShape) -> Arc<Self> {
        Arc::new(Self {
            shape,
            comparator: None,
        })
    }

    /// The canonical set holding the given values.
    ///
    /// Natural ordering returns a shared constant; a custom comparator gets
    /// a fresh instance.
    fn canonical(
        has_false: bool,
        has_true: bool,
        comparator: Option<&Comparator<bool>>,
    ) -> Arc<Self> {
        let shape = match (has_false, has_true) {
            (false, false) => BoolShape::Empty,
            (true, false) => BoolShape::Singleton(false),
            (false, true) => BoolShape::Singleton(true),
            (true, true) => BoolShape::Full,
        };
        match comparator {
            None => Self::constant(shape),
            Some(cmp) => Arc::new(Self {
                shape,
                comparator: Some(cmp.clone()),
            }),
        }
    }

    fn constant(shape: BoolShape) -> Arc<Self> {
        let set = match shape {
            BoolShape::Empty => &EMPTY,
            BoolShape::Singleton(false) => &ONLY_FALSE,
            BoolShape::Singleton(true) => &ONLY_TRUE,
            BoolShape::Full => &FULL,
        };
        Arc::clone(&**set)
    }

    /// The shared empty set.
    pub fn empty() -> Arc<Self> {
        Self::constant(BoolShape::Empty)
    }

    /// The shared set holding only `value`.
    pub fn singleton(value: bool) -> Arc<Self> {
        Self::constant(BoolShape::Singleton(value))
    }

    /// The shared set holding both values.
    pub fn full() -> Arc<Self> {
        Self::constant(BoolShape::Full)
    }

    /// This set as a shared handle.
    ///
    /// Under the natural ordering this is one of the process-wide constants,
    /// so a set rebuilt by value (for example after deserialization) regains
    /// its canonical identity.
    pub fn to_shared(&self) -> Arc<Self> {
        match &self.comparator {
            None => Self::constant(self.shape),
            Some(_) => Arc::new(self.clone()),
        }
    }

    /// Creates a set from `values` under the natural ordering.
    pub fn of(values: &[bool]) -> Arc<Self> {
        Self::copy_of(values.iter().copied())
    }

    /// Creates a set under the natural ordering.
    ///
    /// Stops reading `values` as soon as both values have been seen.
    pub fn copy_of<I>(values: I) -> Arc<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        Self::canonical_from(values, None)
    }

    /// Creates a set under `comparator`.
    ///
    /// If the comparator considers `false` and `true` equal, only the first
    /// value read is kept.
    pub fn copy_of_with<I>(values: I, comparator: Comparator<bool>) -> Arc<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        Self::canonical_from(values, Some(&comparator))
    }

    fn canonical_from<I>(values: I, comparator: Option<&Comparator<bool>>) -> Arc<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let (has_false, has_true) =
            if compare_with(comparator, false, true) == Ordering::Equal {
                match values.into_iter().next() {
                    Some(v) => (!v, v),
                    None => (false, false),
                }
            } else {
                scan(values)
            };
        Self::canonical(has_false, has_true, comparator)
    }

    /// The shape of this set.
    pub fn shape(&self) -> BoolShape {
        self.shape
    }

    /// The ordering of this set; `None` is the natural ordering.
    pub fn comparator(&self) -> Option<&Comparator<bool>> {
        self.comparator.as_ref()
    }

    /// Number of elements: 0, 1 or 2.
    pub fn len(&self) -> usize {
        match self.shape {
            BoolShape::Empty => 0,
            BoolShape::Singleton(_) => 1,
            BoolShape::Full => 2,
        }
    }

    /// Returns true for the empty shape.
    pub fn is_empty(&self) -> bool {
        self.shape == BoolShape::Empty
    }

    /// Returns true if an element compares equal to `value` under the ordering.
    pub fn contains(&self, value: bool) -> bool {
        self.index_of(value).is_some()
    }

    /// Literal membership, ignoring the ordering.
    fn holds(&self, value: bool) -> bool {
        match self.shape {
            BoolShape::Empty => false,
            BoolShape::Singleton(v) => v == value,
            BoolShape::Full => true,
        }
    }

    #[inline]
    fn compare(&self, a: bool, b: bool) -> Ordering {
        compare_with(self.comparator.as_ref(), a, b)
    }

    /// The value a full set yields first under this set's ordering.
    fn leading(&self) -> bool {
        compare_with(self.comparator.as_ref(), false, true) == Ordering::Greater
    }

    fn values(&self) -> ([bool; 2], usize) {
        match self.shape {
            BoolShape::Empty => ([false; 2], 0),
            BoolShape::Singleton(v) => ([v, v], 1),
            BoolShape::Full => {
                let first = self.leading();
                ([first, !first], 2)
            }
        }
    }

    /// Element at `index` in set order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<bool> {
        let (values, len) = self.values();
        if index < len {
            Ok(values[index])
        } else {
            Err(Error::out_of_range(index, len))
        }
    }

    /// Position of the element comparing equal to `value`.
    pub fn index_of(&self, value: bool) -> Option<usize> {
        self.iter()
            .position(|e| self.compare(e, value) == Ordering::Equal)
    }

    /// First element in set order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] on the empty set.
    pub fn first(&self) -> Result<bool> {
        self.get(0).map_err(|_| Error::NoSuchElement)
    }

    /// Last element in set order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] on the empty set.
    pub fn last(&self) -> Result<bool> {
        match self.len() {
            0 => Err(Error::NoSuchElement),
            n => self.get(n - 1),
        }
    }

    fn retain<F>(&self, keep: F) -> Arc<Self>
    where
        F: Fn(bool) -> bool,
    {
        let has_false = self.holds(false) && keep(false);
        let has_true = self.holds(true) && keep(true);
        Self::canonical(has_false, has_true, self.comparator.as_ref())
    }

    /// Elements strictly less than `to`.
    pub fn head_set(&self, to: bool) -> Arc<Self> {
        let cmp = self.comparator.as_ref();
        self.retain(|v| compare_with(cmp, v, to) == Ordering::Less)
    }

    /// Elements greater than or equal to `from`.
    pub fn tail_set(&self, from: bool) -> Arc<Self> {
        let cmp = self.comparator.as_ref();
        self.retain(|v| compare_with(cmp, v, from) != Ordering::Less)
    }

    /// Elements in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalRange`] if `from` sorts after `to`.
    pub fn sub_set(&self, from: bool, to: bool) -> Result<Arc<Self>> {
        let cmp = self.comparator.as_ref();
        if compare_with(cmp, from, to) == Ordering::Greater {
            return Err(IllegalRange::Bounds {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }
        Ok(self.retain(|v| {
            compare_with(cmp, v, from) != Ordering::Less && compare_with(cmp, v, to) == Ordering::Less
        }))
    }

    /// Iterates in set order.
    pub fn iter(&self) -> BoolIter {
        let (values, len) = self.values();
        values.into_iter().take(len)
    }

    fn list_slot(&self) -> usize {
        match self.values() {
            (_, 0) => 0,
            ([false, _], 1) => 1,
            ([true, _], 1) => 2,
            ([false, _], _) => 3,
            ([true, _], _) => 4,
        }
    }

    /// The elements as a list, in set order.
    ///
    /// The five possible lists are allocated once per process and shared by
    /// every boolean set.
    pub fn as_list(&self) -> &'static ImmutableList<bool> {
        &LISTS[self.list_slot()]
    }

    /// The elements as an owned list handle.
    pub fn to_list(&self) -> ImmutableList<bool> {
        self.as_list().clone()
    }

    /// Deque-shaped read access in set order.
    pub fn deque(&self) -> DequeView<'static, bool> {
        self.as_list().deque()
    }

    /// A splittable cursor reporting `SORTED` and `DISTINCT`.
    pub fn spliterator(&self) -> Spliterator<bool> {
        Spliterator::new(self.to_list(), Characteristics::SORTED_SET)
    }

    /// Greatest element strictly less than `value`.
    pub fn lower(&self, value: bool) -> Option<bool> {
        self.iter()
            .filter(|e| self.compare(*e, value) == Ordering::Less)
            .last()
    }

    /// Greatest element less than or equal to `value`.
    pub fn floor(&self, value: bool) -> Option<bool> {
        self.iter()
            .filter(|e| self.compare(*e, value) != Ordering::Greater)
            .last()
    }

    /// Least element greater than or equal to `value`.
    pub fn ceiling(&self, value: bool) -> Option<bool> {
        self.iter()
            .find(|e| self.compare(*e, value) != Ordering::Less)
    }

    /// Least element strictly greater than `value`.
    pub fn higher(&self, value: bool) -> Option<bool> {
        self.iter()
            .find(|e| self.compare(*e, value) == Ordering::Greater)
    }

    /// Lexicographic comparison of the elements, as for lists.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.as_list().compare_to(other.as_list())
    }

    /// Structural hash code of the elements, as for lists.
    pub fn hash_code(&self) -> i32 {
        self.as_list().hash_code()
    }

    /// Succeeds with `false` if `value` is already present.
    pub fn add(&self, value: bool) -> Result<bool> {
        if self.contains(value) {
            Ok(false)
        } else {
            Err(Error::unsupported("add"))
        }
    }

    /// Succeeds with `false` if `value` is not present.
    pub fn remove(&self, value: bool) -> Result<bool> {
        if self.contains(value) {
            Err(Error::unsupported("remove"))
        } else {
            Ok(false)
        }
    }

    /// Succeeds with `false` if every one of `values` is already present.
    pub fn add_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = bool>,
    {
        if values.into_iter().all(|v| self.contains(v)) {
            Ok(false)
        } else {
            Err(Error::unsupported("add_all"))
        }
    }

    /// Succeeds with `false` if none of `values` is present.
    pub fn remove_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = bool>,
    {
        if values.into_iter().any(|v| self.contains(v)) {
            Err(Error::unsupported("remove_all"))
        } else {
            Ok(false)
        }
    }

    /// Succeeds with `false` if every element is among `values`.
    pub fn retain_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = bool>,
    {
        let keep = Self::canonical_from(values, self.comparator.as_ref());
        if self.iter().all(|e| keep.contains(e)) {
            Ok(false)
        } else {
            Err(Error::unsupported("retain_all"))
        }
    }

    /// Succeeds if the set is already empty.
    pub fn clear(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::unsupported("clear"))
        }
    }
}

/// Reports which values occur, stopping once both have been seen.
fn scan<I>(values: I) -> (bool, bool)
where
    I: IntoIterator<Item = bool>,
{
    let mut has_false = false;
    let mut has_true = false;
    for v in values {
        if v {
            has_true = true;
        } else {
            has_false = true;
        }
        if has_false && has_true {
            break;
        }
    }
    (has_false, has_true)
}

impl PartialEq for BoolSortedSet {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for BoolSortedSet {}

impl Hash for BoolSortedSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Debug for BoolSortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoolSortedSet")
            .field("shape", &self.shape)
            .field("comparator", &self.comparator)
            .finish()
    }
}

impl fmt::Display for BoolSortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_list(), f)
    }
}

impl<'a> IntoIterator for &'a BoolSortedSet {
    type Item = bool;
    type IntoIter = BoolIter;

    fn into_iter(self) -> BoolIter {
        self.iter()
    }
}
