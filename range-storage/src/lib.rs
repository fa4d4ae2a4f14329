#![forbid(unsafe_code, bad_style, nonstandard_style, future_incompatible)]
#![forbid(rust_2018_idioms, rust_2021_compatibility)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, deny(warnings))]

//! Abstract interface to a key-value string store with byte-range access.
//! Values are plain byte strings addressed by a key, and every value can be
//! read or overwritten one contiguous window of bytes at a time.
//! By having a shared interface, backends (in-memory, Redis, ...) can be
//! swapped without touching the code layered on top.

/// The `RangeStorage` trait allows reading and writing whole values, and
/// byte ranges within a value, of a key-value string store.
///
/// Range semantics follow Redis `GETRANGE` / `SETRANGE`.
#[async_trait::async_trait]
pub trait RangeStorage {
  /// An error.
  type Error;

  /// Read the whole value stored at `key`, or `None` if the key is absent.
  async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

  /// Replace the whole value stored at `key`.
  async fn set(&mut self, key: &str, data: &[u8]) -> Result<(), Self::Error>;

  /// Read the bytes of `key` between `start` and `end` (both inclusive).
  ///
  /// The window is clipped to the stored length. Reading an absent key,
  /// or a window entirely past the end, yields no bytes.
  async fn get_range(
    &mut self,
    key: &str,
    start: u64,
    end: u64,
  ) -> Result<Vec<u8>, Self::Error>;

  /// Write `data` into `key` starting at byte `offset`.
  ///
  /// The value is extended when needed, and any gap between its previous
  /// end and `offset` is filled with zero bytes.
  async fn set_range(
    &mut self,
    key: &str,
    offset: u64,
    data: &[u8],
  ) -> Result<(), Self::Error>;
}
