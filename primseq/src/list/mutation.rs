//! Mutating-shaped operations on immutable lists.
//!
//! These exist so generic code can hand an immutable list an empty delta
//! without special-casing it. A call succeeds only when, given its
//! arguments, it would leave the list unchanged; anything else fails with
//! [`Error::UnsupportedMutation`].

use std::cmp::Ordering;

use crate::{
    comparator::{Comparator, compare_with},
    error::{Error, Result},
    kind::Element,
};

use super::ImmutableList;

impl<T: Element> ImmutableList<T> {
    /// Appending always changes the list, so this always fails.
    pub fn add(&self, _value: T) -> Result<bool> {
        Err(Error::unsupported("add"))
    }

    /// Inserting always changes the list, so this always fails.
    ///
    /// An out-of-range `index` is reported as [`Error::IndexOutOfRange`].
    pub fn add_at(&self, index: usize, _value: T) -> Result<()> {
        if index > self.len() {
            return Err(Error::out_of_range(index, self.len()));
        }
        Err(Error::unsupported("add_at"))
    }

    /// Succeeds with `false` if `values` is empty.
    pub fn add_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        match values.into_iter().next() {
            None => Ok(false),
            Some(_) => Err(Error::unsupported("add_all")),
        }
    }

    /// Succeeds with `false` if `values` is empty.
    pub fn add_all_at<I>(&self, index: usize, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len() {
            return Err(Error::out_of_range(index, self.len()));
        }
        match values.into_iter().next() {
            None => Ok(false),
            Some(_) => Err(Error::unsupported("add_all_at")),
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

    /// Removing by position always changes the list, so this always fails.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.get(index)?;
        Err(Error::unsupported("remove_at"))
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

    /// Succeeds with `false` if `predicate` matches no element.
    pub fn remove_if<F>(&self, predicate: F) -> Result<bool>
    where
        F: FnMut(T) -> bool,
    {
        if self.iter().any(predicate) {
            Err(Error::unsupported("remove_if"))
        } else {
            Ok(false)
        }
    }

    /// Succeeds with `false` if every element is among `values`.
    pub fn retain_all<I>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let keep: Vec<T> = values.into_iter().collect();
        let all_kept = self
            .iter()
            .all(|e| keep.iter().any(|k| k.kind_eq(e)));
        if all_kept {
            Ok(false)
        } else {
            Err(Error::unsupported("retain_all"))
        }
    }

    /// Succeeds, returning the current element, if it already equals `value`.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        let current = self.get(index)?;
        if current.kind_cmp(value) == Ordering::Equal {
            Ok(current)
        } else {
            Err(Error::unsupported("set"))
        }
    }

    /// Succeeds if `operator` maps every element to itself.
    pub fn replace_all<F>(&self, mut operator: F) -> Result<()>
    where
        F: FnMut(T) -> T,
    {
        if self
            .iter()
            .all(|e| operator(e).kind_cmp(e) == Ordering::Equal)
        {
            Ok(())
        } else {
            Err(Error::unsupported("replace_all"))
        }
    }

    /// Succeeds if the list is already sorted under `comparator`.
    ///
    /// `None` sorts by the natural ordering.
    pub fn sort(&self, comparator: Option<&Comparator<T>>) -> Result<()> {
        let sorted = self
            .as_slice()
            .windows(2)
            .all(|w| compare_with(comparator, w[0], w[1]) != Ordering::Greater);
        if sorted {
            Ok(())
        } else {
            Err(Error::unsupported("sort"))
        }
    }

    /// Succeeds if the list is already empty.
    pub fn clear(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::unsupported("clear"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsupported<R: std::fmt::Debug>(result: Result<R>) -> bool {
        matches!(result, Err(Error::UnsupportedMutation { .. }))
    }

    #[test]
    fn test_clear() {
        assert!(ImmutableList::<i32>::empty().clear().is_ok());
        assert!(unsupported(ImmutableList::of(&[1]).clear()));
    }

    #[test]
    fn test_bulk_no_ops() {
        let list = ImmutableList::of(&[1i64, 2, 3]);
        assert_eq!(list.remove_all([]), Ok(false));
        assert_eq!(list.remove_all([7, 8]), Ok(false));
        assert!(unsupported(list.remove_all([2])));
        assert_eq!(list.add_all([]), Ok(false));
        assert!(unsupported(list.add_all([4])));
        assert_eq!(list.retain_all([3, 2, 1, 0]), Ok(false));
        assert!(unsupported(list.retain_all([1])));
    }

    #[test]
    fn test_single_element_no_ops() {
        let list = ImmutableList::of(&['x', 'y']);
        assert_eq!(list.remove('z'), Ok(false));
        assert!(unsupported(list.remove('x')));
        assert_eq!(list.set(1, 'y'), Ok('y'));
        assert!(unsupported(list.set(1, 'q')));
        assert!(matches!(list.set(5, 'q'), Err(Error::IndexOutOfRange { .. })));
        assert!(unsupported(list.add('z')));
        assert!(matches!(list.add_at(3, 'z'), Err(Error::IndexOutOfRange { .. })));
        assert!(unsupported(list.add_at(2, 'z')));
        assert!(unsupported(list.remove_at(0)));
    }

    #[test]
    fn test_predicates_and_sort() {
        let list = ImmutableList::of(&[1.0f64, 2.0, 2.0]);
        assert_eq!(list.remove_if(|v| v > 5.0), Ok(false));
        assert!(unsupported(list.remove_if(|v| v > 1.5)));
        assert!(list.replace_all(|v| v).is_ok());
        assert!(unsupported(list.replace_all(|v| v * 2.0)));
        assert!(list.sort(None).is_ok());
        let descending = Comparator::reverse_natural();
        assert!(unsupported(list.sort(Some(&descending))));
    }
}
