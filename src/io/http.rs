use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::ReadStream;
use anyhow::{Result, bail};

/// Streaming HTTP reader for remote tar archives
///
/// Tar is read front to back, so a single GET is enough: the response body
/// is consumed chunk by chunk as the scanner asks for records.
pub struct HttpStreamReader {
    response: Response,
    pending: Vec<u8>,
    offset: usize,
    transferred_bytes: Arc<AtomicU64>,
}

impl HttpStreamReader {
    /// Create a new HTTP stream reader
    ///
    /// This sends the GET request and fails on a non-success status
    pub async fn new(url: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            bail!("HTTP request failed with status: {}", response.status());
        }

        Ok(Self {
            response,
            pending: Vec::new(),
            offset: 0,
            transferred_bytes: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Shared handle to the transfer counter, readable after the reader
    /// has been moved into a scanner
    pub fn transfer_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.transferred_bytes)
    }
}

#[async_trait]
impl ReadStream for HttpStreamReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.offset == self.pending.len() {
            match self.response.chunk().await? {
                Some(chunk) => {
                    self.transferred_bytes
                        .fetch_add(chunk.len() as u64, Ordering::Relaxed);
                    self.pending = chunk.to_vec();
                    self.offset = 0;
                }
                None => return Ok(0),
            }
        }

        let n = buf.len().min(self.pending.len() - self.offset);
        buf[..n].copy_from_slice(&self.pending[self.offset..self.offset + n]);
        self.offset += n;

        Ok(n)
    }
}
