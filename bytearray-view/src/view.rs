//! Main `ByteArrayView` abstraction.
//! Exposes one key of a key-value store as a fixed-length byte array.

use anyhow::anyhow;
use log::{debug, trace};
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::slice::{Index, Slice, Value};
use crate::RangeStorage;

/// Fixed-length byte array stored under a single key.
///
/// Opening a view makes sure the value at `key` holds at least `length`
/// bytes, padding it with zeros if it is shorter. After that every read and
/// write turns into range calls on the store, and only `[0, length)` is ever
/// touched. Bytes past `length` in a longer pre-existing value stay as they
/// are.
///
/// The store handle is shared. The view never opens, closes or reconfigures
/// the connection behind it, and it takes no lock on the key, so other
/// writers can interleave with it between any two store calls.
#[derive(Debug)]
pub struct ByteArrayView<S>
where
    S: Debug,
{
    store: S,
    key: String,
    length: u64,
}

impl<S> ByteArrayView<S>
where
    S: RangeStorage<Error = Box<dyn StdError + Send + Sync>> + Debug + Send,
{
    /// Open a view of [DEFAULT_LENGTH](crate::DEFAULT_LENGTH) bytes.
    pub async fn open(store: S, key: impl Into<String>) -> Result<Self> {
        Self::open_with(store, key, Options::default()).await
    }

    /// Open a view with custom options.
    pub async fn open_with(
        mut store: S,
        key: impl Into<String>,
        options: Options,
        ) -> Result<Self>
    {
        let key = key.into();
        let length = options.length;
        let target = usize::try_from(length)
            .map_err(|_| Error::LengthTooLarge { length })?;

        let current = store.get(&key).await.map_err(unavailable)?;
        let padded = match current {
            None => Some(Vec::new()),
            Some(value) if (value.len() as u64) < length => Some(value),
            Some(_) => None,
        };
        if let Some(mut value) = padded {
            debug!("padding {} from {} to {} bytes", key, value.len(), length);
            value
                .try_reserve_exact(target - value.len())
                .map_err(|_| Error::LengthTooLarge { length })?;
            value.resize(target, 0);
            store.set(&key, &value).await.map_err(unavailable)?;
        }

        Ok(Self { store, key, length })
    }

    /// Read one byte. Negative indices count from the end.
    pub async fn get(&mut self, index: i64) -> Result<u8> {
        let index = self.resolve(index)?;
        trace!("get {}[{}]", self.key, index);
        let data = self.store
            .get_range(&self.key, index, index)
            .await.map_err(unavailable)?;
        Ok(data.first().copied().unwrap_or(0))
    }

    /// Read the bytes selected by `slice`.
    ///
    /// Always issues at most one range read. Strided slices fetch the whole
    /// window and pick every `step`-th byte from it.
    pub async fn get_slice(&mut self, slice: impl Into<Slice>) -> Result<Vec<u8>> {
        let slice = slice.into();
        let span = slice.resolve(self.length)?;
        let (first, last) = match span.window() {
            Some(window) => window,
            None => return Ok(Vec::new()),
        };
        trace!("get {}[{}] as {}..={}", self.key, slice, first, last);
        let window = self.store
            .get_range(&self.key, first, last)
            .await.map_err(unavailable)?;

        let step = usize::try_from(span.step().unsigned_abs()).unwrap_or(usize::MAX);
        let bytes = if span.step() > 0 {
            window.into_iter().step_by(step).collect()
        } else {
            window.into_iter().rev().step_by(step).collect()
        };
        Ok(bytes)
    }

    /// Write one byte. `value` must be exactly one byte long.
    pub async fn set(&mut self, index: i64, value: &[u8]) -> Result<()> {
        let index = self.resolve(index)?;
        if value.len() != 1 {
            return Err(Error::InvalidValue { len: value.len() });
        }
        trace!("set {}[{}]", self.key, index);
        self.store
            .set_range(&self.key, index, value)
            .await.map_err(unavailable)
    }

    /// Write `values` to the indices selected by `slice`, in order.
    ///
    /// Nothing is written unless `values` has exactly one byte per selected
    /// index. Slices with a step of `1` or `-1` are one range write. Any
    /// other step writes byte by byte in ascending index order, and a failure
    /// part way leaves the earlier bytes written.
    pub async fn set_slice(
        &mut self,
        slice: impl Into<Slice>,
        values: &[u8],
        ) -> Result<()>
    {
        let slice = slice.into();
        let span = slice.resolve(self.length)?;
        if values.len() as u64 != span.len() {
            return Err(Error::LengthMismatch {
                expected: span.len(),
                actual: values.len(),
            });
        }
        let lowest = match span.lowest() {
            Some(lowest) => lowest,
            None => return Ok(()),
        };
        trace!("set {}[{}]", self.key, slice);

        match span.step() {
            1 => self.store
                .set_range(&self.key, lowest, values)
                .await.map_err(unavailable),
            -1 => {
                let reversed: Vec<u8> = values.iter().rev().copied().collect();
                self.store
                    .set_range(&self.key, lowest, &reversed)
                    .await.map_err(unavailable)
            }
            step => {
                let mut writes: Vec<(u64, u8)> =
                    span.indices().zip(values.iter().copied()).collect();
                if step < 0 {
                    writes.reverse();
                }
                for (index, byte) in writes {
                    self.store
                        .set_range(&self.key, index, &[byte])
                        .await.map_err(unavailable)?;
                }
                Ok(())
            }
        }
    }

    /// Read through a tagged [Index].
    pub async fn read(&mut self, index: impl Into<Index>) -> Result<Value> {
        match index.into() {
            Index::Byte(index) => self.get(index).await.map(Value::Byte),
            Index::Slice(slice) => self.get_slice(slice).await.map(Value::Bytes),
        }
    }

    /// Write through a tagged [Index].
    pub async fn write(&mut self, index: impl Into<Index>, values: &[u8]) -> Result<()> {
        match index.into() {
            Index::Byte(index) => self.set(index, values).await,
            Index::Slice(slice) => self.set_slice(slice, values).await,
        }
    }

    /// Read the whole array.
    pub async fn to_vec(&mut self) -> Result<Vec<u8>> {
        self.get_slice(..).await
    }

    /// Overwrite the whole array. `values` must be exactly `len()` bytes.
    pub async fn copy_from_slice(&mut self, values: &[u8]) -> Result<()> {
        self.set_slice(.., values).await
    }

    fn resolve(&self, index: i64) -> Result<u64> {
        let length = i128::from(self.length);
        let adjusted = match i128::from(index) {
            i if i < 0 => i + length,
            i => i,
        };
        if adjusted < 0 || adjusted >= length {
            return Err(Error::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(adjusted as u64)
    }
}

impl<S> ByteArrayView<S>
where
    S: Debug,
{
    /// Key of the backing value.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of bytes in the array.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the array has no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl<S> Display for ByteArrayView<S>
where
    S: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteArrayView(key={}, length={})", self.key, self.length)
    }
}

#[inline]
fn unavailable(err: Box<dyn StdError + Send + Sync>) -> Error {
    Error::StoreUnavailable(anyhow!(err))
}
