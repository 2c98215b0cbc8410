//! Immutable sequence engine.
//!
//! [`ImmutableList`] is a cheap handle over a shared, never-mutated buffer.
//! A list either owns its whole buffer or is a view over a sub-range of a
//! parent's buffer. Views keep the buffer alive through shared ownership, so
//! a view stays valid after every other handle to its parent is dropped.

mod cursor;
mod deque;
mod mutation;
mod spliterator;

pub use cursor::ListCursor;
pub use deque::DequeView;
pub use spliterator::{Characteristics, Spliterator};

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use once_cell::sync::OnceCell;

use crate::{
    error::{Error, Result},
    kind::Element,
};

/// Iterator over the elements of a list, by value.
pub type Iter<'a, T> = std::iter::Copied<std::slice::Iter<'a, T>>;

/// Backing storage of a list.
#[derive(Clone)]
enum Storage<T> {
    /// Exclusively represents the whole buffer it was built from.
    Owned(Arc<Vec<T>>),
    /// `[from, from + len)` of a parent buffer.
    View {
        parent: Arc<Vec<T>>,
        from: usize,
        len: usize,
    },
}

impl<T> Storage<T> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        match self {
            Storage::Owned(buf) => buf.as_slice(),
            Storage::View { parent, from, len } => &parent[*from..*from + *len],
        }
    }

    fn buffer(&self) -> &Arc<Vec<T>> {
        match self {
            Storage::Owned(buf) => buf,
            Storage::View { parent, .. } => parent,
        }
    }

    fn offset(&self) -> usize {
        match self {
            Storage::Owned(_) => 0,
            Storage::View { from, .. } => *from,
        }
    }
}

/// An immutable, fixed-length list of unboxed scalar values.
///
/// Equality, ordering and hashing are structural: two lists with the same
/// elements in the same order are equal and hash alike, whether they own
/// their storage or are views.
///
/// # Example
///
/// ```
/// use primseq::IntList;
///
/// let list = IntList::of(&[1, 2, 3, 4]);
/// let tail = list.sub_list(1, 4)?;
/// assert_eq!(tail.get(0)?, 2);
/// assert_eq!(tail, IntList::of(&[2, 3, 4]));
/// assert_eq!(list.hash_code(), 955_331);
/// # Ok::<(), primseq::Error>(())
/// ```
#[derive(Clone)]
pub struct ImmutableList<T: Element> {
    storage: Storage<T>,
    hash: OnceCell<i32>,
}

impl<T: Element> ImmutableList<T> {
    fn from_storage(storage: Storage<T>) -> Self {
        Self {
            storage,
            hash: OnceCell::new(),
        }
    }

    /// The shared empty list of this kind.
    pub fn empty() -> Self {
        Self::from_storage(Storage::Owned(T::empty_buffer()))
    }

    /// Creates a list holding a copy of `values`.
    ///
    /// An empty slice yields the shared empty list.
    pub fn of(values: &[T]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }
        let mut buf = vec![T::zero(); values.len()];
        T::copy_into(values, &mut buf);
        Self::from_storage(Storage::Owned(Arc::new(buf)))
    }

    /// Creates a list from any source of elements, materializing it once.
    pub fn copy_of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(values.into_iter().collect())
    }

    /// Adopts `values` as the backing buffer without copying elements.
    ///
    /// The vector is moved in, so no other holder can mutate it afterwards.
    pub fn from_vec(values: Vec<T>) -> Self {
        if values.is_empty() {
            return Self::empty();
        }
        tracing::trace!(kind = T::KIND, len = values.len(), "adopting buffer");
        Self::from_storage(Storage::Owned(Arc::new(values)))
    }

    /// Copies another list.
    ///
    /// An owning list is already an immutable snapshot and is shared as is.
    /// A view is compacted into a fresh buffer so the copy does not pin the
    /// parent's storage.
    pub fn copy_of_list(list: &ImmutableList<T>) -> Self {
        match &list.storage {
            Storage::Owned(_) => list.clone(),
            Storage::View { .. } => {
                tracing::trace!(kind = T::KIND, len = list.len(), "compacting view");
                Self::of(list.as_slice())
            }
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Owned(buf) => buf.len(),
            Storage::View { len, .. } => *len,
        }
    }

    /// Returns true if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this list is a view over another list's buffer.
    pub fn is_view(&self) -> bool {
        matches!(self.storage, Storage::View { .. })
    }

    /// Borrows the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(index, self.len()))
    }

    /// First element, if any.
    pub fn first(&self) -> Option<T> {
        self.as_slice().first().copied()
    }

    /// Last element, if any.
    pub fn last(&self) -> Option<T> {
        self.as_slice().last().copied()
    }

    /// Returns true if some element equals `value` under [`Element::kind_eq`].
    pub fn contains(&self, value: T) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: T) -> Option<usize> {
        self.as_slice().iter().position(|e| e.kind_eq(value))
    }

    /// Position of the last element equal to `value`.
    pub fn last_index_of(&self, value: T) -> Option<usize> {
        self.as_slice().iter().rposition(|e| e.kind_eq(value))
    }

    /// A view over `[from, to)`.
    ///
    /// Runs in constant time and space: no element is copied, and a view of a
    /// view points straight at the root buffer. An empty range yields the
    /// shared empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalRange`] unless `from <= to <= len()`.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::illegal_indices(from, to, len));
        }
        if from == to {
            return Ok(Self::empty());
        }
        let parent = Arc::clone(self.storage.buffer());
        Ok(Self::from_storage(Storage::View {
            parent,
            from: self.storage.offset() + from,
            len: to - from,
        }))
    }

    /// Iterates over the elements by value.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter().copied()
    }

    /// A bidirectional cursor positioned before the first element.
    pub fn cursor(&self) -> ListCursor<'_, T> {
        ListCursor::new(self.as_slice(), 0)
    }

    /// A bidirectional cursor positioned before element `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > len()`.
    pub fn list_iter(&self, index: usize) -> Result<ListCursor<'_, T>> {
        if index > self.len() {
            return Err(Error::out_of_range(index, self.len()));
        }
        Ok(ListCursor::new(self.as_slice(), index))
    }

    /// A splittable cursor over the whole list.
    pub fn spliterator(&self) -> Spliterator<T> {
        Spliterator::new(self.clone(), Characteristics::LIST)
    }

    /// Deque-shaped read access to this list.
    pub fn deque(&self) -> DequeView<'_, T> {
        DequeView::new(self)
    }

    /// Copies the elements into the prefix of `dest`.
    ///
    /// If `dest` is shorter than the list, a new buffer of exactly `len()`
    /// elements is allocated instead. Elements of `dest` past `len()` are
    /// left untouched.
    pub fn to_array(&self, mut dest: Vec<T>) -> Vec<T> {
        if dest.len() < self.len() {
            dest = vec![T::zero(); self.len()];
        }
        T::copy_into(self.as_slice(), &mut dest);
        dest
    }

    /// Copies the elements into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.to_array(Vec::new())
    }

    /// Lexicographic comparison under [`Element::kind_cmp`].
    ///
    /// When one list is a prefix of the other, the shorter one sorts first.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        compare_elements(self.as_slice(), other.as_slice())
    }

    /// Structural hash code: `h = 31 * h + hash(e)` over the elements, from `1`.
    ///
    /// Computed at most once per handle.
    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| polynomial_hash(self.as_slice()))
    }

    /// Returns true if both handles address the same elements of the same buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(a.storage.buffer(), b.storage.buffer())
            && a.storage.offset() == b.storage.offset()
            && a.len() == b.len()
    }
}

/// Lexicographic comparison over the common prefix, then by length.
pub(crate) fn compare_elements<T: Element>(a: &[T], b: &[T]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.kind_cmp(*y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Polynomial hash accumulation starting at `1`.
pub(crate) fn polynomial_hash<T: Element>(elements: &[T]) -> i32 {
    elements.iter().fold(1i32, |h, e| {
        h.wrapping_mul(31).wrapping_add(e.kind_hash())
    })
}

impl<T: Element> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> PartialEq for ImmutableList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.compare_to(other) == Ordering::Equal
    }
}

impl<T: Element> Eq for ImmutableList<T> {}

impl<T: Element> PartialOrd for ImmutableList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for ImmutableList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl<T: Element> Hash for ImmutableList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<T: Element> fmt::Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element> fmt::Display for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}

impl<T: Element> From<Vec<T>> for ImmutableList<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Element> From<&[T]> for ImmutableList<T> {
    fn from(values: &[T]) -> Self {
        Self::of(values)
    }
}

impl<T: Element> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::copy_of(iter)
    }
}

impl<'a, T: Element> IntoIterator for &'a ImmutableList<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
