//! Immutable sorted-set engine.
//!
//! An [`ImmutableSortedSet`] is an [`ImmutableList`] whose elements are
//! strictly ascending under an ordering, paired with that ordering. Range
//! operations locate their boundaries by binary search and hand out
//! `sub_list` views, so they never copy.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    comparator::{Comparator, compare_with},
    error::{Error, IllegalRange, Result},
    kind::SortedElement,
    list::{Characteristics, DequeView, ImmutableList, Iter, Spliterator},
};

/// An immutable set of unboxed scalar values kept in sorted order.
///
/// # Example
///
/// ```
/// use primseq::IntSortedSet;
///
/// let set = IntSortedSet::of(&[5, 1, 3, 1]);
/// assert_eq!(set.as_list().to_vec(), vec![1, 3, 5]);
/// assert_eq!(set.head_set(4).len(), 2);
/// assert_eq!(set.tail_set(3).first()?, 3);
/// # Ok::<(), primseq::Error>(())
/// ```
#[derive(Clone)]
pub struct ImmutableSortedSet<T: SortedElement> {
    list: ImmutableList<T>,
    comparator: Option<Comparator<T>>,
}

impl<T: SortedElement> ImmutableSortedSet<T> {
    /// The empty set under the natural ordering.
    pub fn empty() -> Self {
        Self::empty_with(None)
    }

    /// The empty set under `comparator`.
    pub fn empty_with(comparator: Option<Comparator<T>>) -> Self {
        Self {
            list: ImmutableList::empty(),
            comparator,
        }
    }

    /// Creates a set from `values` under the natural ordering.
    pub fn of(values: &[T]) -> Self {
        Self::copy_of(values.iter().copied())
    }

    /// Creates a set from any source of elements under the natural ordering.
    ///
    /// Elements are sorted and duplicates (under the ordering) dropped.
    pub fn copy_of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::build(values.into_iter().collect(), None)
    }

    /// Creates a set from any source of elements under `comparator`.
    pub fn copy_of_with<I>(values: I, comparator: Comparator<T>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::build(values.into_iter().collect(), Some(comparator))
    }

    fn build(mut values: Vec<T>, comparator: Option<Comparator<T>>) -> Self {
        let cmp = comparator.as_ref();
        values.sort_by(|a, b| compare_with(cmp, *a, *b));
        values.dedup_by(|a, b| compare_with(cmp, *a, *b) == Ordering::Equal);
        Self {
            list: ImmutableList::from_vec(values),
            comparator,
        }
    }

    fn with_list(&self, list: ImmutableList<T>) -> Self {
        Self {
            list,
            comparator: self.comparator.clone(),
        }
    }

    #[inline]
    fn compare(&self, a: T, b: T) -> Ordering {
        compare_with(self.comparator.as_ref(), a, b)
    }

    /// Index of the first element not less than `value`.
    fn lower_bound(&self, value: T) -> usize {
        self.list
            .as_slice()
            .partition_point(|e| self.compare(*e, value) == Ordering::Less)
    }

    /// Index of the first element greater than `value`.
    fn upper_bound(&self, value: T) -> usize {
        self.list
            .as_slice()
            .partition_point(|e| self.compare(*e, value) != Ordering::Greater)
    }

    /// The ordering of this set; `None` is the natural ordering.
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        self.comparator.as_ref()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Element at position `index` in ascending order.
    pub fn get(&self, index: usize) -> Result<T> {
        self.list.get(index)
    }

    /// Returns true if an element compares equal to `value` under the ordering.
    pub fn contains(&self, value: T) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the element comparing equal to `value`.
    pub fn index_of(&self, value: T) -> Option<usize> {
        let idx = self.lower_bound(value);
        match self.list.get(idx) {
            Ok(e) if self.compare(e, value) == Ordering::Equal => Some(idx),
            _ => None,
        }
    }

    /// Smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] on an empty set.
    pub fn first(&self) -> Result<T> {
        self.list.first().ok_or(Error::NoSuchElement)
    }

    /// Largest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] on an empty set.
    pub fn last(&self) -> Result<T> {
        self.list.last().ok_or(Error::NoSuchElement)
    }

    /// Elements strictly less than `to`.
    pub fn head_set(&self, to: T) -> Self {
        let end = self.lower_bound(to);
        self.slice(0, end)
    }

    /// Elements greater than or equal to `from`.
    pub fn tail_set(&self, from: T) -> Self {
        let start = self.lower_bound(from);
        self.slice(start, self.len())
    }

    /// Elements in `[from, to)`.
    ///
    /// `from == to` under the ordering yields the empty set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalRange`] if `from` sorts after `to`.
    pub fn sub_set(&self, from: T, to: T) -> Result<Self> {
        match self.compare(from, to) {
            Ordering::Greater => Err(IllegalRange::Bounds {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into()),
            Ordering::Equal => Ok(Self::empty_with(self.comparator.clone())),
            Ordering::Less => {
                let start = self.lower_bound(from);
                let end = self.lower_bound(to);
                Ok(self.slice(start, end))
            }
        }
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        // Both bounds come from binary searches over this set, so the range is valid.
        match self.list.sub_list(start, end) {
            Ok(list) => self.with_list(list),
            Err(_) => Self::empty_with(self.comparator.clone()),
        }
    }

    /// Greatest element strictly less than `value`.
    pub fn lower(&self, value: T) -> Option<T> {
        self.lower_bound(value)
            .checked_sub(1)
            .and_then(|i| self.list.get(i).ok())
    }

    /// Greatest element less than or equal to `value`.
    pub fn floor(&self, value: T) -> Option<T> {
        self.upper_bound(value)
            .checked_sub(1)
            .and_then(|i| self.list.get(i).ok())
    }

    /// Least element greater than or equal to `value`.
    pub fn ceiling(&self, value: T) -> Option<T> {
        self.list.get(self.lower_bound(value)).ok()
    }

    /// Least element strictly greater than `value`.
    pub fn higher(&self, value: T) -> Option<T> {
        self.list.get(self.upper_bound(value)).ok()
    }

    /// Iterates in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// A splittable cursor reporting `SORTED` and `DISTINCT`.
    pub fn spliterator(&self) -> Spliterator<T> {
        Spliterator::new(self.list.clone(), Characteristics::SORTED_SET)
    }

    /// The elements as a list.
    pub fn as_list(&self) -> &ImmutableList<T> {
        &self.list
    }

    /// Consumes the set, returning its elements as a list.
    pub fn into_list(self) -> ImmutableList<T> {
        self.list
    }

    /// Deque-shaped read access in ascending order.
    pub fn deque(&self) -> DequeView<'_, T> {
        self.list.deque()
    }

    /// Lexicographic comparison of the elements, as for lists.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.list.compare_to(&other.list)
    }

    /// Structural hash code of the elements, as for lists.
    pub fn hash_code(&self) -> i32 {
        self.list.hash_code()
    }

    /// Succeeds with `false` if `value` is already present.
    pub fn add(&self, value: T) -> Result<bool> {
        if self.contains(value) {
            Ok(false)
        } else {
            Err(Error::unsupported("add"))
        }
    }

    /// Succeeds with `false` if `value` is not present.
    pub fn remove(&self, value: T) -> Result<bool> {
        if self.contains(value) {
            Err(Error::unsupported("remove"))
        } else {
            Ok(false)
        }
    }

    /// Succeeds with `false` if every one of `values` is already present.
    pub fn add_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
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
        I: IntoIterator<Item = T>,
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
        I: IntoIterator<Item = T>,
    {
        let keep = Self::build(values.into_iter().collect(), self.comparator.clone());
        if self.iter().all(|e| keep.contains(e)) {
            Ok(false)
        } else {
            Err(Error::unsupported("retain_all"))
        }
    }

    /// Succeeds if the set is already empty.
    pub fn clear(&self) -> Result<()> {
        self.list.clear()
    }
}

impl<T: SortedElement> Default for ImmutableSortedSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: SortedElement> PartialEq for ImmutableSortedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T: SortedElement> Eq for ImmutableSortedSet<T> {}

impl<T: SortedElement> Hash for ImmutableSortedSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.hash(state);
    }
}

impl<T: SortedElement> fmt::Debug for ImmutableSortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: SortedElement> fmt::Display for ImmutableSortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<T: SortedElement> FromIterator<T> for ImmutableSortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::copy_of(iter)
    }
}

impl<'a, T: SortedElement> IntoIterator for &'a ImmutableSortedSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_distinct() {
        let set = ImmutableSortedSet::of(&[3i16, 1, 2, 3, 1]);
        assert_eq!(set.as_list().to_vec(), vec![1, 2, 3]);
        assert!(set.comparator().is_none());
    }

    #[test]
    fn test_float_set_collapses_nans() {
        let set = ImmutableSortedSet::of(&[f64::NAN, 0.0, -0.0, f64::NAN]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.first().unwrap().to_bits(), (-0.0f64).to_bits());
        assert!(set.last().unwrap().is_nan());
        assert!(set.contains(f64::NAN));
    }

    #[test]
    fn test_range_views_share_storage() {
        let set = ImmutableSortedSet::of(&[10, 20, 30, 40, 50]);
        let sub = set.sub_set(15, 45).unwrap();
        assert_eq!(sub.as_list().to_vec(), vec![20, 30, 40]);
        assert!(sub.as_list().is_view());
        assert_eq!(set.head_set(30).as_list().to_vec(), vec![10, 20]);
        assert_eq!(set.tail_set(30).as_list().to_vec(), vec![30, 40, 50]);
        assert!(set.head_set(5).is_empty());
    }

    #[test]
    fn test_sub_set_bounds() {
        let set = ImmutableSortedSet::of(&['a', 'b', 'c']);
        assert!(set.sub_set('b', 'b').unwrap().is_empty());
        assert!(matches!(
            set.sub_set('c', 'a'),
            Err(Error::IllegalRange(IllegalRange::Bounds { .. }))
        ));
    }

    #[test]
    fn test_custom_comparator() {
        let set = ImmutableSortedSet::copy_of_with([1i64, 5, 3], Comparator::reverse_natural());
        assert_eq!(set.as_list().to_vec(), vec![5, 3, 1]);
        assert_eq!(set.head_set(3).as_list().to_vec(), vec![5]);
        assert_eq!(set.tail_set(3).as_list().to_vec(), vec![3, 1]);
        assert!(set.sub_set(1, 5).is_err());
        assert!(set.comparator().is_some());
        assert!(set.head_set(3).comparator().is_some());
    }

    #[test]
    fn test_navigation() {
        let set = ImmutableSortedSet::of(&[2i32, 4, 6]);
        assert_eq!(set.lower(4), Some(2));
        assert_eq!(set.floor(4), Some(4));
        assert_eq!(set.ceiling(5), Some(6));
        assert_eq!(set.higher(6), None);
        assert_eq!(set.lower(2), None);
        assert_eq!(set.index_of(6), Some(2));
        assert_eq!(set.index_of(5), None);
    }

    #[test]
    fn test_first_last_empty() {
        let set = ImmutableSortedSet::<i8>::empty();
        assert_eq!(set.first(), Err(Error::NoSuchElement));
        assert_eq!(set.last(), Err(Error::NoSuchElement));
    }

    #[test]
    fn test_set_mutation_no_ops() {
        let set = ImmutableSortedSet::of(&[1i32, 2]);
        assert_eq!(set.add(1), Ok(false));
        assert!(set.add(3).is_err());
        assert_eq!(set.remove(3), Ok(false));
        assert_eq!(set.add_all([2, 1]), Ok(false));
        assert_eq!(set.retain_all([1, 2, 3]), Ok(false));
        assert!(set.retain_all([1]).is_err());
        assert!(set.clear().is_err());
    }

    #[test]
    fn test_spliterator_is_sorted() {
        let set = ImmutableSortedSet::of(&[1i32, 2]);
        let s = set.spliterator();
        assert!(s.characteristics().contains(Characteristics::SORTED | Characteristics::DISTINCT));
    }
}
