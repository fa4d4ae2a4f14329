#![cfg_attr(test, allow(dead_code))]

use anyhow::anyhow;
use std::error::Error;
use std::sync::{Arc, Mutex};

use bytearray_view::{ByteArrayView, Options, RangeStorage};
use range_memory::RangeMemory;

pub const KEY: &str = "mybytearray";

pub async fn memory_view(store: &RangeMemory, length: u64) -> ByteArrayView<RangeMemory> {
    ByteArrayView::open_with(store.clone(), KEY, Options::new(length))
        .await.unwrap()
}

/// One call made against a [Recorder].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get,
    Set(usize),
    GetRange(u64, u64),
    SetRange(u64, Vec<u8>),
}

/// Memory store that logs every call, and can be told to fail writes.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub inner: RangeMemory,
    calls: Arc<Mutex<Vec<Call>>>,
    writes_left: Arc<Mutex<Option<usize>>>,
    offline: Arc<Mutex<bool>>,
}

impl Recorder {
    pub fn new(inner: RangeMemory) -> Self {
        Self { inner, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Let `count` more range writes succeed, then fail the rest.
    pub fn fail_writes_after(&self, count: usize) {
        *self.writes_left.lock().unwrap() = Some(count);
    }

    /// Fail every call from now on.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    fn record(&self, call: Call) -> Result<(), Box<dyn Error + Send + Sync>> {
        if *self.offline.lock().unwrap() {
            return Err(anyhow!("Connection refused.").into());
        }
        if let Call::SetRange(..) = call {
            if let Some(left) = self.writes_left.lock().unwrap().as_mut() {
                if *left == 0 {
                    return Err(anyhow!("Connection reset.").into());
                }
                *left -= 1;
            }
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait::async_trait]
impl RangeStorage for Recorder {
    type Error = Box<dyn Error + Send + Sync>;

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        self.record(Call::Get)?;
        self.inner.get(key).await
    }

    async fn set(&mut self, key: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.record(Call::Set(data.len()))?;
        self.inner.set(key, data).await
    }

    async fn get_range(
        &mut self,
        key: &str,
        start: u64,
        end: u64,
        ) -> Result<Vec<u8>, Self::Error>
    {
        self.record(Call::GetRange(start, end))?;
        self.inner.get_range(key, start, end).await
    }

    async fn set_range(
        &mut self,
        key: &str,
        offset: u64,
        data: &[u8],
        ) -> Result<(), Self::Error>
    {
        self.record(Call::SetRange(offset, data.to_vec()))?;
        self.inner.set_range(key, offset, data).await
    }
}
