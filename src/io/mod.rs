mod http;
mod local;
mod stream;

pub use http::HttpStreamReader;
pub use local::LocalFileReader;
pub use stream::{AsyncReadStream, StdinReader};

use anyhow::Result;
use async_trait::async_trait;

/// Trait for sequential reading from an archive source
#[async_trait]
pub trait ReadStream: Send {
    /// Read the next bytes into the buffer, returning how many were read.
    ///
    /// A return value of 0 means the stream has ended. Fewer bytes than
    /// `buf.len()` may be returned at any time.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}
