//! Slice bounds and their resolution against a fixed length.
//!
//! Bounds behave like Python slices: negative bounds count from the end,
//! out of range bounds are clamped, and a negative step walks backwards.

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Unresolved slice bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    /// First index, or the natural start for the step when `None`.
    pub start: Option<i64>,
    /// Exclusive end, or the natural end for the step when `None`.
    pub stop: Option<i64>,
    /// Distance between selected indices, `1` when `None`.
    pub step: Option<i64>,
}

impl Slice {
    /// Create a new [Slice].
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Same bounds, different step.
    pub fn with_step(self, step: i64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Resolve the bounds against `length`.
    ///
    /// Fails with [Error::InvalidIndexType] when the step is zero.
    pub fn resolve(&self, length: u64) -> Result<Span> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::InvalidIndexType("slice step cannot be zero".into()));
        }
        let length = length.min(i64::MAX as u64) as i64;
        let (lower, upper) = if step < 0 {
            (-1, length - 1)
        } else {
            (0, length)
        };
        let clamp = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(bound) if bound < 0 => (bound + length).max(lower),
            Some(bound) => bound.min(upper),
        };
        let (start, stop) = if step < 0 {
            (clamp(self.start, upper), clamp(self.stop, lower))
        } else {
            (clamp(self.start, lower), clamp(self.stop, upper))
        };

        let len = match step {
            s if s > 0 && start < stop => (stop - start - 1) as u64 / s as u64 + 1,
            s if s < 0 && stop < start => (start - stop - 1) as u64 / s.unsigned_abs() + 1,
            _ => 0,
        };
        Ok(Span {
            start,
            stop,
            step,
            len,
        })
    }
}

impl From<Range<i64>> for Slice {
    fn from(range: Range<i64>) -> Self {
        Self::new(Some(range.start), Some(range.end), None)
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(range: RangeFrom<i64>) -> Self {
        Self::new(Some(range.start), None, None)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(range: RangeTo<i64>) -> Self {
        Self::new(None, Some(range.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::default()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<i64>| b.map(|b| b.to_string()).unwrap_or_default();
        write!(f, "{}:{}", bound(self.start), bound(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

/// A [Slice] resolved against a length. Every selected index is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: i64,
    stop: i64,
    step: i64,
    len: u64,
}

impl Span {
    /// Resolved start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Resolved exclusive stop. `-1` for a backwards slice reaching index 0.
    pub fn stop(&self) -> i64 {
        self.stop
    }

    /// Step, never zero.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of selected indices.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected indices, in selection order.
    pub fn indices(&self) -> impl Iterator<Item = u64> {
        let Span {
            start, step, len, ..
        } = *self;
        (0..len as i64).map(move |i| (start + i * step) as u64)
    }

    /// Smallest selected index.
    pub fn lowest(&self) -> Option<u64> {
        match self.len {
            0 => None,
            _ if self.step > 0 => Some(self.start as u64),
            n => Some((self.start + (n as i64 - 1) * self.step) as u64),
        }
    }

    /// Contiguous inclusive window `(first, last)` spanning the slice.
    ///
    /// A forward slice covers `[start, stop - 1]`, a backward one
    /// `[stop + 1, start]`.
    pub fn window(&self) -> Option<(u64, u64)> {
        match self.len {
            0 => None,
            _ if self.step > 0 => Some((self.start as u64, (self.stop - 1) as u64)),
            _ => Some(((self.stop + 1) as u64, self.start as u64)),
        }
    }
}

/// A single index or a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// One byte; negative values count from the end.
    Byte(i64),
    /// A run of bytes.
    Slice(Slice),
}

impl From<i64> for Index {
    fn from(index: i64) -> Self {
        Index::Byte(index)
    }
}

impl From<Slice> for Index {
    fn from(slice: Slice) -> Self {
        Index::Slice(slice)
    }
}

impl From<Range<i64>> for Index {
    fn from(range: Range<i64>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeFrom<i64>> for Index {
    fn from(range: RangeFrom<i64>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeTo<i64>> for Index {
    fn from(range: RangeTo<i64>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeFull> for Index {
    fn from(range: RangeFull) -> Self {
        Index::Slice(range.into())
    }
}

/// Parses `"5"`, `"-1"`, `"2:6"`, `":4"` or `"8:0:-2"`.
impl FromStr for Index {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidIndexType(format!("{:?}", s));
        let bound = |part: &str| -> Result<Option<i64>> {
            match part.trim() {
                "" => Ok(None),
                part => part.parse().map(Some).map_err(|_| invalid()),
            }
        };

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [index] => bound(*index)?.map(Index::Byte).ok_or_else(invalid),
            [start, stop] => Ok(Index::Slice(Slice::new(bound(*start)?, bound(*stop)?, None))),
            [start, stop, step] => Ok(Index::Slice(Slice::new(
                bound(*start)?,
                bound(*stop)?,
                bound(*step)?,
            ))),
            _ => Err(invalid()),
        }
    }
}

/// What a read through an [Index] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Result of reading an [Index::Byte].
    Byte(u8),
    /// Result of reading an [Index::Slice].
    Bytes(Vec<u8>),
}
