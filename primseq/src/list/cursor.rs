//! Bidirectional list cursor.

use crate::{
    error::{Error, Result},
    kind::Element,
};

/// A cursor that walks a list in both directions.
///
/// The cursor sits between elements: `next` returns the element after it and
/// moves forward, `previous` returns the element before it and moves back.
/// It also works as a plain forward [`Iterator`].
///
/// # Example
///
/// ```
/// use primseq::CharList;
///
/// let list = CharList::of(&['a', 'b', 'c']);
/// let mut cursor = list.list_iter(3)?;
/// assert_eq!(cursor.previous(), Some('c'));
/// assert_eq!(cursor.next_index(), 2);
/// assert_eq!(cursor.previous_index(), Some(1));
/// # Ok::<(), primseq::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ListCursor<'a, T: Element> {
    items: &'a [T],
    position: usize,
}

impl<'a, T: Element> ListCursor<'a, T> {
    pub(crate) fn new(items: &'a [T], position: usize) -> Self {
        debug_assert!(position <= items.len());
        Self { items, position }
    }

    /// Returns true if `next` would yield an element.
    pub fn has_next(&self) -> bool {
        self.position < self.items.len()
    }

    /// Returns true if `previous` would yield an element.
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Moves back one element and returns it.
    pub fn previous(&mut self) -> Option<T> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.items[self.position])
    }

    /// Index of the element `next` would return.
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// Index of the element `previous` would return, `None` at the start.
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Always fails: elements cannot be removed through the cursor.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::unsupported("cursor_remove"))
    }

    /// Always fails: elements cannot be replaced through the cursor.
    pub fn set(&mut self, _value: T) -> Result<()> {
        Err(Error::unsupported("cursor_set"))
    }

    /// Always fails: elements cannot be inserted through the cursor.
    pub fn add(&mut self, _value: T) -> Result<()> {
        Err(Error::unsupported("cursor_add"))
    }
}

impl<T: Element> Iterator for ListCursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.items.get(self.position).copied()?;
        self.position += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T: Element> ExactSizeIterator for ListCursor<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::ImmutableList;

    #[test]
    fn test_forward_and_backward() {
        let list = ImmutableList::of(&[10i32, 20, 30]);
        let mut cursor = list.cursor();
        assert!(!cursor.has_previous());
        assert_eq!(cursor.previous_index(), None);
        assert_eq!(cursor.next(), Some(10));
        assert_eq!(cursor.next(), Some(20));
        assert_eq!(cursor.previous(), Some(20));
        assert_eq!(cursor.previous(), Some(10));
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.next_index(), 0);
    }

    #[test]
    fn test_cursor_on_view() {
        let list = ImmutableList::of(&[1i64, 2, 3, 4]);
        let view = list.sub_list(1, 3).unwrap();
        let cursor = view.list_iter(0).unwrap();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_list_iter_bounds() {
        let list = ImmutableList::of(&[1i8]);
        assert!(list.list_iter(1).is_ok());
        assert!(list.list_iter(2).is_err());
    }

    #[test]
    fn test_cursor_mutation_rejected() {
        let list = ImmutableList::of(&[1.5f32]);
        let mut cursor = list.cursor();
        assert!(cursor.set(2.0).is_err());
        assert!(cursor.add(2.0).is_err());
        assert!(cursor.remove().is_err());
    }
}
