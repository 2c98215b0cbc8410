//! Orderings for sorted collections.

use std::{cmp::Ordering, fmt, sync::Arc};

use crate::kind::Element;

/// A shareable, thread-safe ordering over one element kind.
///
/// Sorted collections store `Option<Comparator<T>>`; `None` means the kind's
/// natural ordering ([`Element::kind_cmp`]).
///
/// # Example
///
/// ```
/// use primseq::Comparator;
/// use std::cmp::Ordering;
///
/// let descending = Comparator::new(|a: i32, b: i32| b.cmp(&a));
/// assert_eq!(descending.compare(1, 2), Ordering::Greater);
/// ```
pub struct Comparator<T> {
    compare: Arc<dyn Fn(T, T) -> Ordering + Send + Sync>,
}

impl<T> Comparator<T> {
    /// Wraps a comparison function.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(T, T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// Compares two elements.
    #[inline]
    pub fn compare(&self, a: T, b: T) -> Ordering {
        (self.compare)(a, b)
    }

    /// Returns true if both handles wrap the same comparison function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.compare, &other.compare)
    }
}

impl<T: Element> Comparator<T> {
    /// The reverse of the natural ordering.
    pub fn reverse_natural() -> Self {
        Self::new(|a: T, b: T| b.kind_cmp(a))
    }

    /// This ordering reversed.
    pub fn reversed(&self) -> Self {
        let inner = self.clone();
        Self::new(move |a: T, b: T| inner.compare(b, a))
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("ptr", &Arc::as_ptr(&self.compare).cast::<()>())
            .finish()
    }
}

/// Compares under `comparator`, or the natural ordering when absent.
#[inline]
pub(crate) fn compare_with<T: Element>(comparator: Option<&Comparator<T>>, a: T, b: T) -> Ordering {
    match comparator {
        Some(c) => c.compare(a, b),
        None => a.kind_cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_natural() {
        let cmp = Comparator::<f64>::reverse_natural();
        assert_eq!(cmp.compare(1.0, 2.0), Ordering::Greater);
        assert_eq!(cmp.compare(f64::NAN, 0.0), Ordering::Less);
    }

    #[test]
    fn test_reversed_twice_is_original_order() {
        let cmp = Comparator::<i32>::reverse_natural().reversed();
        assert_eq!(cmp.compare(1, 2), Ordering::Less);
    }

    #[test]
    fn test_ptr_eq() {
        let a = Comparator::<i8>::reverse_natural();
        let b = a.clone();
        let c = Comparator::<i8>::reverse_natural();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn test_compare_with_natural() {
        assert_eq!(compare_with::<char>(None, 'a', 'b'), Ordering::Less);
    }
}
