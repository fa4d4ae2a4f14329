/// Length of a view when none is given.
pub const DEFAULT_LENGTH: u64 = 4096;

/// Options for opening a [ByteArrayView](crate::ByteArrayView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Number of bytes the view exposes. Fixed for the lifetime of the view.
    pub length: u64,
}

impl Options {
    /// Create options for a view of `length` bytes.
    pub fn new(length: u64) -> Self {
        Self { length }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}
