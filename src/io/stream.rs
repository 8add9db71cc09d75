use super::ReadStream;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, Stdin};

/// Adapter exposing any tokio [`AsyncRead`] as a [`ReadStream`].
///
/// `&[u8]` implements `AsyncRead`, so this also serves in-memory archives.
pub struct AsyncReadStream<R> {
    inner: R,
}

impl<R> AsyncReadStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> ReadStream for AsyncReadStream<R> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.inner.read(buf).await?)
    }
}

/// Reader for an archive piped through standard input (`-f -`).
pub type StdinReader = AsyncReadStream<Stdin>;

impl StdinReader {
    pub fn stdin() -> Self {
        AsyncReadStream::new(tokio::io::stdin())
    }
}
