//! Errors returned by [ByteArrayView](crate::ByteArrayView).

/// Everything that can go wrong while reading or writing a view.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index falls outside `[0, length)` after negative-index adjustment.
    #[error("Index {index} out of range for length {length}.")]
    IndexOutOfRange {
        /// Index as given by the caller.
        index: i64,
        /// Length of the view.
        length: u64,
    },
    /// A single index was assigned something other than exactly one byte.
    #[error("Single index assignment expects one byte, got {len}.")]
    InvalidValue {
        /// Number of bytes given.
        len: usize,
    },
    /// A slice was assigned a different number of values than it selects.
    #[error("Cannot assign {actual} values to a slice of {expected}.")]
    LengthMismatch {
        /// Number of indices the slice selects.
        expected: u64,
        /// Number of values given.
        actual: usize,
    },
    /// The declared length cannot be held in memory on this platform.
    #[error("Length {length} is too large.")]
    LengthTooLarge {
        /// Length as given in the options.
        length: u64,
    },
    /// An index could not be understood, or a slice step was zero.
    #[error("Invalid index: {0}.")]
    InvalidIndexType(String),
    /// The backing store failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),
}

/// Result with [Error] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
