#![forbid(unsafe_code, bad_style, nonstandard_style, future_incompatible)]
#![forbid(rust_2018_idioms, rust_2021_compatibility)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, deny(warnings))]

//! Keep key-value strings in memory and access them by byte range.
//!
//! Every clone of a [RangeMemory] shares the same map, the way every handle
//! onto a remote store sees the same keys.

use anyhow::anyhow;
use async_std::sync::{Arc, Mutex};
use range_storage::RangeStorage;
use std::collections::HashMap;

/// Largest value a single key may hold, same as a Redis string.
pub const MAX_VALUE_LENGTH: u64 = 512 * 1024 * 1024;

/// Shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct RangeMemory {
  values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl RangeMemory {
  /// Create a new, empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of keys currently stored.
  pub async fn len(&self) -> usize {
    self.values.lock().await.len()
  }

  /// Whether no key is stored.
  pub async fn is_empty(&self) -> bool {
    self.values.lock().await.is_empty()
  }

  /// Remove `key`, returning its previous value.
  pub async fn remove(&self, key: &str) -> Option<Vec<u8>> {
    self.values.lock().await.remove(key)
  }
}

#[async_trait::async_trait]
impl RangeStorage for RangeMemory {
  type Error = Box<dyn std::error::Error + Send + Sync>;

  async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
    Ok(self.values.lock().await.get(key).cloned())
  }

  async fn set(&mut self, key: &str, data: &[u8]) -> Result<(), Self::Error> {
    if data.len() as u64 > MAX_VALUE_LENGTH {
      return Err(anyhow!("String exceeds maximum allowed size.").into());
    }
    self.values.lock().await.insert(key.to_owned(), data.to_vec());
    Ok(())
  }

  async fn get_range(
    &mut self,
    key: &str,
    start: u64,
    end: u64,
  ) -> Result<Vec<u8>, Self::Error> {
    let values = self.values.lock().await;
    let value = match values.get(key) {
      Some(value) => value,
      None => return Ok(Vec::new()),
    };

    let length = value.len() as u64;
    if start > end || start >= length {
      return Ok(Vec::new());
    }
    let end = end.min(length - 1);
    Ok(value[start as usize..=end as usize].to_vec())
  }

  async fn set_range(
    &mut self,
    key: &str,
    offset: u64,
    data: &[u8],
  ) -> Result<(), Self::Error> {
    // An empty write neither creates nor extends the value.
    if data.is_empty() {
      return Ok(());
    }
    let new_len = offset
      .checked_add(data.len() as u64)
      .filter(|len| *len <= MAX_VALUE_LENGTH)
      .ok_or_else(|| anyhow!("String exceeds maximum allowed size."))?;

    let mut values = self.values.lock().await;
    let value = values.entry(key.to_owned()).or_default();
    if (value.len() as u64) < new_len {
      value.resize(new_len as usize, 0);
    }
    value[offset as usize..new_len as usize].copy_from_slice(data);
    Ok(())
  }
}
