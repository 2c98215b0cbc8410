//! Splittable cursors for parallel traversal.

use std::ops::BitOr;

use crate::{ImmutableList, kind::Element};

/// Traversal properties reported by a [`Spliterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Characteristics(u32);

impl Characteristics {
    /// Elements have a defined encounter order.
    pub const ORDERED: Self = Self(0x0000_0010);
    /// Elements are unique under the collection's ordering.
    pub const DISTINCT: Self = Self(0x0000_0001);
    /// Elements are sorted under the collection's ordering.
    pub const SORTED: Self = Self(0x0000_0004);
    /// `estimate_size` is exact.
    pub const SIZED: Self = Self(0x0000_0040);
    /// Elements are never absent.
    pub const NONNULL: Self = Self(0x0000_0100);
    /// The source cannot change.
    pub const IMMUTABLE: Self = Self(0x0000_0400);
    /// Every split piece is `SIZED` too.
    pub const SUBSIZED: Self = Self(0x0000_4000);

    /// Characteristics of a list spliterator.
    pub const LIST: Self = Self(
        Self::ORDERED.0 | Self::SIZED.0 | Self::SUBSIZED.0 | Self::IMMUTABLE.0 | Self::NONNULL.0,
    );

    /// Characteristics of a sorted-set spliterator.
    pub const SORTED_SET: Self = Self(Self::LIST.0 | Self::SORTED.0 | Self::DISTINCT.0);

    /// Returns true if every flag of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw flag bits.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A cursor over `[index, fence)` of a list that can hand off a prefix.
///
/// Each spliterator holds its own handle to the list, so pieces can be moved
/// to other threads and traversed without coordination.
///
/// # Example
///
/// ```
/// use primseq::IntList;
///
/// let list = IntList::of(&[1, 2, 3, 4, 5]);
/// let mut rest = list.spliterator();
/// let prefix = rest.try_split().expect("five elements split");
/// assert_eq!(prefix.collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(rest.collect::<Vec<_>>(), vec![3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct Spliterator<T: Element> {
    owner: ImmutableList<T>,
    index: usize,
    fence: usize,
    characteristics: Characteristics,
}

impl<T: Element> Spliterator<T> {
    pub(crate) fn new(owner: ImmutableList<T>, characteristics: Characteristics) -> Self {
        let fence = owner.len();
        Self {
            owner,
            index: 0,
            fence,
            characteristics,
        }
    }

    /// Number of elements left to traverse. Always exact.
    pub fn estimate_size(&self) -> usize {
        self.fence - self.index
    }

    /// Same as [`estimate_size`](Self::estimate_size); the size is always known.
    pub fn exact_size_if_known(&self) -> Option<usize> {
        Some(self.estimate_size())
    }

    /// Traversal properties of this spliterator.
    pub fn characteristics(&self) -> Characteristics {
        self.characteristics
    }

    /// Splits off the first half of the unconsumed range.
    ///
    /// The returned spliterator covers `[index, mid)` and this one shrinks to
    /// `[mid, fence)`. Returns `None` when fewer than two elements remain.
    pub fn try_split(&mut self) -> Option<Self> {
        let lo = self.index;
        let mid = lo + (self.fence - lo) / 2;
        if lo >= mid {
            return None;
        }
        self.index = mid;
        Some(Self {
            owner: self.owner.clone(),
            index: lo,
            fence: mid,
            characteristics: self.characteristics,
        })
    }

    /// Feeds the next element to `action`. Returns false when exhausted.
    pub fn try_advance<F>(&mut self, action: F) -> bool
    where
        F: FnOnce(T),
    {
        match self.next() {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }

    /// Feeds every remaining element to `action`, in order.
    pub fn for_each_remaining<F>(&mut self, mut action: F)
    where
        F: FnMut(T),
    {
        let slice = &self.owner.as_slice()[self.index..self.fence];
        self.index = self.fence;
        slice.iter().copied().for_each(&mut action);
    }
}

impl<T: Element> Iterator for Spliterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.fence {
            return None;
        }
        let value = self.owner.as_slice()[self.index];
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.estimate_size();
        (n, Some(n))
    }
}

impl<T: Element> ExactSizeIterator for Spliterator<T> {}
