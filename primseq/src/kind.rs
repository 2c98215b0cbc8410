//! Element kinds supported by the immutable collections.
//!
//! Every collection in this crate is written once against [`Element`] and
//! monomorphized per scalar kind. The trait carries the only behavior that
//! differs between kinds: equality, ordering, per-element hash contribution,
//! the zero value and bulk copy.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    sync::Arc,
};

use num_traits::Zero;
use once_cell::sync::Lazy;

mod private {
    pub trait Sealed {}
}

/// A scalar kind that can be stored unboxed in an immutable collection.
///
/// Implemented for `bool`, `i8`, `i16`, `char`, `i32`, `i64`, `f32` and `f64`.
/// The trait is sealed.
pub trait Element: Copy + Debug + Display + Send + Sync + 'static + private::Sealed {
    /// Human readable kind name, e.g. `"int"`.
    const KIND: &'static str;

    /// The zero value of this kind (`false`, `0`, `'\0'`, `0.0`).
    fn zero() -> Self;

    /// Value equality used by `contains`, `index_of` and `last_index_of`.
    ///
    /// Floating point kinds follow IEEE semantics: `NaN != NaN` and
    /// `-0.0 == 0.0`.
    fn kind_eq(self, other: Self) -> bool;

    /// Total ordering used by `compare_to`, structural equality and sorted sets.
    ///
    /// Floating point kinds order `-0.0` before `0.0` and every `NaN` after
    /// positive infinity, with all `NaN`s equal to each other.
    fn kind_cmp(self, other: Self) -> Ordering;

    /// Contribution of a single element to a structural hash code.
    fn kind_hash(self) -> i32;

    /// Copies `src` into the prefix of `dst`.
    ///
    /// `dst` must be at least as long as `src`.
    #[inline]
    fn copy_into(src: &[Self], dst: &mut [Self]) {
        dst[..src.len()].copy_from_slice(src);
    }

    /// Shared zero-length buffer for this kind.
    #[doc(hidden)]
    fn empty_buffer() -> Arc<Vec<Self>>;
}

/// A kind stored in an array-backed [`ImmutableSortedSet`](crate::ImmutableSortedSet).
///
/// Every kind except `bool`, whose sets have at most two elements and are
/// the storage-free [`BoolSortedSet`](crate::BoolSortedSet) instead:
///
/// ```compile_fail
/// let set = primseq::ImmutableSortedSet::<bool>::of(&[true, false]);
/// ```
pub trait SortedElement: Element {}

impl SortedElement for i8 {}
impl SortedElement for i16 {}
impl SortedElement for char {}
impl SortedElement for i32 {}
impl SortedElement for i64 {}
impl SortedElement for f32 {}
impl SortedElement for f64 {}

macro_rules! def_empty_buffer {
    ($ty:ty) => {
        fn empty_buffer() -> Arc<Vec<Self>> {
            static EMPTY: Lazy<Arc<Vec<$ty>>> = Lazy::new(|| Arc::new(Vec::new()));
            Arc::clone(&*EMPTY)
        }
    };
}

// ============================================================================
// Integral kinds
// ============================================================================

macro_rules! def_integral_kind {
    ($ty:ty, $kind:literal, |$v:ident| $hash:expr) => {
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const KIND: &'static str = $kind;

            fn zero() -> Self {
                <$ty as Zero>::zero()
            }

            #[inline]
            fn kind_eq(self, other: Self) -> bool {
                self == other
            }

            #[inline]
            fn kind_cmp(self, other: Self) -> Ordering {
                self.cmp(&other)
            }

            #[inline]
            fn kind_hash(self) -> i32 {
                let $v = self;
                $hash
            }

            def_empty_buffer!($ty);
        }
    };
}

def_integral_kind!(i8, "byte", |v| i32::from(v));
def_integral_kind!(i16, "short", |v| i32::from(v));
def_integral_kind!(i32, "int", |v| v);
def_integral_kind!(i64, "long", |v| (v ^ (((v as u64) >> 32) as i64)) as i32);

impl private::Sealed for bool {}

impl Element for bool {
    const KIND: &'static str = "boolean";

    fn zero() -> Self {
        false
    }

    #[inline]
    fn kind_eq(self, other: Self) -> bool {
        self == other
    }

    #[inline]
    fn kind_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }

    #[inline]
    fn kind_hash(self) -> i32 {
        if self { 1231 } else { 1237 }
    }

    def_empty_buffer!(bool);
}

impl private::Sealed for char {}

impl Element for char {
    const KIND: &'static str = "char";

    fn zero() -> Self {
        '\0'
    }

    #[inline]
    fn kind_eq(self, other: Self) -> bool {
        self == other
    }

    #[inline]
    fn kind_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }

    #[inline]
    fn kind_hash(self) -> i32 {
        // Scalar values top out at 0x10FFFF.
        u32::from(self) as i32
    }

    def_empty_buffer!(char);
}

// ============================================================================
// Floating point kinds
// ============================================================================

trait CanonicalBits {
    type Bits;

    /// Raw bits with every `NaN` collapsed onto the canonical quiet `NaN`.
    fn canonical_bits(self) -> Self::Bits;
}

macro_rules! def_float_kind {
    ($ty:ty, $bits:ty, $signed:ty, $nan_bits:expr, $kind:literal, |$b:ident| $hash:expr) => {
        impl private::Sealed for $ty {}

        impl CanonicalBits for $ty {
            type Bits = $bits;

            #[inline]
            fn canonical_bits(self) -> $bits {
                if self.is_nan() { $nan_bits } else { self.to_bits() }
            }
        }

        impl Element for $ty {
            const KIND: &'static str = $kind;

            fn zero() -> Self {
                <$ty as Zero>::zero()
            }

            #[inline]
            fn kind_eq(self, other: Self) -> bool {
                self == other
            }

            fn kind_cmp(self, other: Self) -> Ordering {
                if self < other {
                    Ordering::Less
                } else if self > other {
                    Ordering::Greater
                } else {
                    // Equal values, signed zeros or NaN.
                    let lhs = self.canonical_bits() as $signed;
                    let rhs = other.canonical_bits() as $signed;
                    lhs.cmp(&rhs)
                }
            }

            #[inline]
            fn kind_hash(self) -> i32 {
                let $b: $bits = self.canonical_bits();
                $hash
            }

            def_empty_buffer!($ty);
        }
    };
}

def_float_kind!(f32, u32, i32, 0x7fc0_0000, "float", |b| b as i32);
def_float_kind!(f64, u64, i64, 0x7ff8_0000_0000_0000, "double", |b| (b ^ (b >> 32)) as i32);
