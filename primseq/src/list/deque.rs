//! Deque-shaped adapter over an immutable list.

use crate::{
    error::{Error, Result},
    kind::Element,
};

use super::{ImmutableList, Iter};

/// Read-only double-ended queue view of a list.
#[derive(Debug, Clone, Copy)]
pub struct DequeView<'a, T: Element> {
    list: &'a ImmutableList<T>,
}

impl<'a, T: Element> DequeView<'a, T> {
    pub(crate) fn new(list: &'a ImmutableList<T>) -> Self {
        Self { list }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the deque has no elements.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Head of the deque.
    pub fn peek_first(&self) -> Option<T> {
        self.list.first()
    }

    /// Tail of the deque.
    pub fn peek_last(&self) -> Option<T> {
        self.list.last()
    }

    /// Iterates from tail to head.
    pub fn descending_iter(&self) -> std::iter::Rev<Iter<'a, T>> {
        self.list.iter().rev()
    }

    /// Succeeds with `None` on an empty deque, fails otherwise.
    pub fn pop_first(&self) -> Result<Option<T>> {
        self.pop("pop_first")
    }

    /// Succeeds with `None` on an empty deque, fails otherwise.
    pub fn pop_last(&self) -> Result<Option<T>> {
        self.pop("pop_last")
    }

    /// Always fails.
    pub fn push_first(&self, _value: T) -> Result<()> {
        Err(Error::unsupported("push_first"))
    }

    /// Always fails.
    pub fn push_last(&self, _value: T) -> Result<()> {
        Err(Error::unsupported("push_last"))
    }

    fn pop(&self, operation: &'static str) -> Result<Option<T>> {
        if self.is_empty() {
            Ok(None)
        } else {
            Err(Error::unsupported(operation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deque_view() {
        let list = ImmutableList::of(&[1i32, 2, 3]);
        let deque = list.deque();
        assert_eq!(deque.peek_first(), Some(1));
        assert_eq!(deque.peek_last(), Some(3));
        assert_eq!(deque.descending_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert!(deque.pop_first().is_err());
        assert!(deque.push_last(4).is_err());
    }

    #[test]
    fn test_empty_deque_pop() {
        let list = ImmutableList::<bool>::empty();
        assert_eq!(list.deque().pop_last(), Ok(None));
        assert_eq!(list.deque().peek_first(), None);
    }
}
