use super::ReadStream;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Local file reader
pub struct LocalFileReader {
    file: File,
}

impl LocalFileReader {
    pub async fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).await?;
        Ok(Self { file })
    }
}

#[async_trait]
impl ReadStream for LocalFileReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file.read(buf).await?)
    }
}
