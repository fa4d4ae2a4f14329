#![forbid(unsafe_code, bad_style, nonstandard_style, future_incompatible)]
#![forbid(rust_2018_idioms, rust_2021_compatibility)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, deny(warnings))]

//! Access Redis string values by byte range.
//!
//! [RangeRedis] maps [RangeStorage] onto `GET`, `SET`, `GETRANGE` and
//! `SETRANGE`. It wraps a multiplexed connection, so clones are cheap and
//! all of them talk over the same socket. Connection lifetime, reconnects and
//! timeouts are left to the `redis` client.

use anyhow::{Context, Result};
use log::debug;
use range_storage::RangeStorage;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::fmt;

/// Server used when nothing else is configured.
pub const DEFAULT_URL: &str = "redis://127.0.0.1/";
/// Environment variable read by [RangeRedis::from_env].
pub const URL_ENV: &str = "REDIS_URL";

/// [RangeStorage] over a Redis connection.
#[derive(Clone)]
pub struct RangeRedis {
    connection: MultiplexedConnection,
}

impl RangeRedis {
    /// Connect to the server at `url`.
    pub async fn open(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .with_context(|| format!("Invalid redis url {}.", url))?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .with_context(|| format!("Could not connect to {}.", url))?;
        debug!("connected to {}", url);
        Ok(Self::from_connection(connection))
    }

    /// Connect to the server named by `REDIS_URL`, or [DEFAULT_URL].
    pub async fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV)
            .unwrap_or_else(|_| DEFAULT_URL.to_owned());
        Self::open(&url).await
    }

    /// Delete `key`, returning whether it existed.
    pub async fn remove(&mut self, key: &str) -> Result<bool> {
        let removed: i64 = self.connection
            .del(key)
            .await
            .with_context(|| format!("Could not delete {}.", key))?;
        Ok(removed > 0)
    }

    /// Wrap an already established connection.
    pub fn from_connection(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }
}

impl fmt::Debug for RangeRedis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeRedis").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl RangeStorage for RangeRedis {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    async fn get(
        &mut self,
        key: &str,
        ) -> Result<Option<Vec<u8>>, Self::Error>
    {
        let value: Option<Vec<u8>> = self.connection.get(key).await?;
        Ok(value)
    }

    async fn set(
        &mut self,
        key: &str,
        data: &[u8],
        ) -> Result<(), Self::Error>
    {
        let () = self.connection.set(key, data).await?;
        Ok(())
    }

    async fn get_range(
        &mut self,
        key: &str,
        start: u64,
        end: u64,
        ) -> Result<Vec<u8>, Self::Error>
    {
        // GETRANGE reads negative offsets from the end, so an inverted
        // window has to be answered here.
        if start > end {
            return Ok(Vec::new());
        }
        let start = isize::try_from(start)?;
        let end = isize::try_from(end)?;
        let data: Vec<u8> = self.connection.getrange(key, start, end).await?;
        Ok(data)
    }

    async fn set_range(
        &mut self,
        key: &str,
        offset: u64,
        data: &[u8],
        ) -> Result<(), Self::Error>
    {
        let offset = isize::try_from(offset)?;
        let _length: i64 = self.connection.setrange(key, offset, data).await?;
        Ok(())
    }
}
