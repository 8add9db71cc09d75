use crate::error::{Result, TarError};
use crate::io::ReadStream;

use super::structures::{RECORD_SIZE, Record};

/// Outcome of reading one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRead {
    /// The buffer holds a complete record.
    Full,
    /// The stream ended after `n` bytes, `0 < n < 512`.
    Partial(usize),
    /// The stream ended before any byte of the record.
    EndOfStream,
}

/// Reads fixed-size records from an archive source.
///
/// Short reads from the source are accumulated until a record is complete or
/// the source reports end of stream. There is no retry beyond that.
pub struct BlockReader<R: ReadStream> {
    reader: R,
}

impl<R: ReadStream> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Fill `buf` with the next record.
    pub async fn read_block(&mut self, buf: &mut Record) -> Result<BlockRead> {
        Ok(match self.fill(buf).await? {
            RECORD_SIZE => BlockRead::Full,
            0 => BlockRead::EndOfStream,
            n => BlockRead::Partial(n),
        })
    }

    /// Read until `buf` is full or the stream ends, returning the byte count.
    async fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]).await {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) => return Err(TarError::Read(e)),
            }
        }
        Ok(filled)
    }
}
