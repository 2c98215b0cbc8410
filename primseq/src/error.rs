//! Error types for immutable collection operations.

use thiserror::Error;

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Details of an invalid range request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalRange {
    /// Index bounds that do not satisfy `0 <= from <= to <= len`.
    #[error("[{from}, {to}) is not a valid range for length {len}")]
    Indices {
        /// Inclusive lower index
        from: usize,
        /// Exclusive upper index
        to: usize,
        /// Length of the collection
        len: usize,
    },

    /// Element bounds where the lower bound sorts after the upper bound.
    #[error("lower bound {from} sorts after upper bound {to}")]
    Bounds {
        /// Rendered lower bound
        from: String,
        /// Rendered upper bound
        to: String,
    },
}

/// Errors raised by immutable collections.
///
/// Every variant is a caller error. Operations that fail leave the collection
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Index outside of the valid positions.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the collection
        len: usize,
    },

    /// Invalid sub-range request.
    #[error(transparent)]
    IllegalRange(#[from] IllegalRange),

    /// A structural change was requested on an immutable collection.
    #[error("unsupported mutation '{operation}' on an immutable collection")]
    UnsupportedMutation {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// `first`/`last` on an empty collection.
    #[error("no such element: collection is empty")]
    NoSuchElement,
}

impl Error {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        tracing::trace!(operation, "rejected mutation of immutable collection");
        Error::UnsupportedMutation { operation }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    pub(crate) fn illegal_indices(from: usize, to: usize, len: usize) -> Self {
        Error::IllegalRange(IllegalRange::Indices { from, to, len })
    }
}
