#![forbid(unsafe_code, bad_style, nonstandard_style, future_incompatible)]
#![forbid(rust_2018_idioms, rust_2021_compatibility)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, deny(warnings))]

//! ## Introduction
//! A fixed-length, byte-addressable array backed by one key of a remote
//! key-value string store.
//! Reads and writes of single bytes, contiguous slices and strided slices
//! are translated into range reads and range writes on the store.
//! The primary way to use this crate is through the [ByteArrayView] struct.
//!
//! ## Example
//! ```rust
//! use range_memory::RangeMemory;
//! use bytearray_view::{ByteArrayView, Options, Slice};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! # async_std::task::block_on(async {
//! let mut view = ByteArrayView::open_with(
//!     RangeMemory::new(), "mybytearray", Options::new(16)).await?;
//!
//! view.set(0, &[0xff]).await?;
//! view.set_slice(2..6, &[1, 2, 3, 4]).await?;
//! view.set_slice(Slice::from(8..16).with_step(2), &[9, 9, 9, 9]).await?;
//!
//! assert_eq!(view.len(), 16);
//! assert_eq!(view.get(0).await?, 0xff);
//! assert_eq!(view.get(-1).await?, 0);
//! assert_eq!(view.get_slice(2..6).await?, vec![1, 2, 3, 4]);
//! assert_eq!(
//!     view.get_slice(Slice::from(8..).with_step(2)).await?,
//!     vec![9, 9, 9, 9]);
//! # Ok(())
//! # })
//! # }
//! ```

mod error;
mod options;
mod slice;
mod view;

pub use range_storage::RangeStorage;
pub use error::{Error, Result};
pub use options::{Options, DEFAULT_LENGTH};
pub use slice::{Index, Slice, Span, Value};
pub use view::ByteArrayView;
