use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::TarError;
use crate::io::ReadStream;

use super::block::{BlockRead, BlockReader};
use super::structures::{RECORD_SIZE, Record};

/// Failure while moving an entry's payload.
#[derive(Debug)]
pub enum TransferError {
    /// The stream ended inside the payload, at the given block index.
    Truncated { block: u64 },
    /// The archive source failed.
    Read(TarError),
    /// The sink rejected a write.
    Sink(io::Error),
}

impl TransferError {
    /// Convert into a scan error, naming the entry for sink failures.
    pub fn into_tar_error(self, name: &str) -> TarError {
        match self {
            TransferError::Truncated { block } => TarError::StreamTruncated { block },
            TransferError::Read(e) => e,
            TransferError::Sink(source) => TarError::Write {
                name: name.to_string(),
                source,
            },
        }
    }
}

/// Payload records of one entry still to be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadTransfer {
    pub records: u64,
    pub remaining: u64,
}

impl PayloadTransfer {
    pub fn new(size: u64) -> Self {
        Self {
            records: super::structures::record_count(size),
            remaining: size,
        }
    }

    /// Consume every payload record, writing the meaningful bytes to `sink`.
    ///
    /// Records are read and discarded when there is no sink so the stream
    /// stays positioned at the next header. `first_block` is the block index
    /// of the first payload record, used for the truncation report.
    pub async fn run<R, W>(
        mut self,
        blocks: &mut BlockReader<R>,
        first_block: u64,
        mut sink: Option<&mut W>,
    ) -> Result<(), TransferError>
    where
        R: ReadStream,
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let mut buf: Record = [0; RECORD_SIZE];

        for i in 0..self.records {
            let read = match blocks.read_block(&mut buf).await {
                Ok(BlockRead::Full) => RECORD_SIZE,
                Ok(BlockRead::Partial(n)) => n,
                Ok(BlockRead::EndOfStream) => 0,
                Err(e) => return Err(TransferError::Read(e)),
            };

            if let Some(sink) = sink.as_deref_mut() {
                let meaningful = (read as u64).min(self.remaining) as usize;
                sink.write_all(&buf[..meaningful])
                    .await
                    .map_err(TransferError::Sink)?;
            }

            self.remaining = self.remaining.saturating_sub(read as u64);

            if read != RECORD_SIZE {
                return Err(TransferError::Truncated {
                    block: first_block + i,
                });
            }
        }

        Ok(())
    }
}
