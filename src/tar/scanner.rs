//! Block-by-block archive scan.
//!
//! The scanner pulls one record at a time and classifies it as a terminator
//! record or an entry header. Each header is validated, checked against the
//! [`FilterSet`], optionally listed, and its payload is consumed in full
//! before the next header is read:
//!
//! ```text
//!  AwaitingHeader --zero--> SawOneZeroBlock --zero--> EndOfArchive
//!        |  ^                      |
//!        |  +------header----------+
//!        +--header: validate -> filter -> list -> transfer --+
//!        ^---------------------------------------------------+
//! ```
//!
//! End of stream is a clean stop from either waiting state. A partial record,
//! a bad magic, an unsupported entry type, or a sink failure aborts the scan.

use log::{debug, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Result, TarError};
use crate::io::ReadStream;

use super::block::{BlockRead, BlockReader};
use super::extractor::SinkProvider;
use super::filter::FilterSet;
use super::structures::{HeaderBlock, RECORD_SIZE, Record, is_all_zero};
use super::transfer::PayloadTransfer;

/// What the scan does with selected entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Extract,
}

/// Resolved configuration of one scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub mode: Mode,
    /// In extract mode, also list every extracted entry
    pub verbose: bool,
    /// Entry names to select, in request order; empty selects everything
    pub requested: Vec<String>,
}

impl ScanConfig {
    /// Whether a selected entry gets a listing line
    pub fn lists_entries(&self) -> bool {
        self.mode == Mode::List || self.verbose
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    AwaitingHeader,
    SawOneZeroBlock,
}

/// How a clean scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Two consecutive zero records.
    EndOfArchive,
    /// The stream ended where a header was expected.
    EndOfStream,
    /// The stream ended right after a single zero record.
    LoneZeroBlock { block: u64 },
}

/// Result of a scan that ended cleanly
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Entry headers processed
    pub entries: u64,
    /// Records consumed, headers and payload alike
    pub blocks: u64,
    pub termination: Termination,
    pub mode: Mode,
    pub filter: FilterSet,
}

impl ScanReport {
    pub fn summary(&self) -> ScanSummary {
        ScanSummary::reconcile(self.mode, &self.filter)
    }
}

/// Requested names the archive never matched.
///
/// Only list mode with a non-empty filter reconciles; extraction never
/// reports missing names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub unmatched: Vec<String>,
}

impl ScanSummary {
    pub fn reconcile(mode: Mode, filter: &FilterSet) -> Self {
        if mode != Mode::List || filter.is_selecting_all() {
            return Self::default();
        }
        Self {
            unmatched: filter.unmatched().map(str::to_string).collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(TarError::EntriesNotFound {
                names: self.unmatched,
            })
        }
    }
}

/// Sequential scanner over one archive stream
pub struct ArchiveScanner<R: ReadStream> {
    blocks: BlockReader<R>,
    config: ScanConfig,
    filter: FilterSet,
    state: ScanState,
    /// Records consumed so far; diagnostics only
    block_index: u64,
    entries: u64,
}

impl<R: ReadStream> ArchiveScanner<R> {
    pub fn new(reader: R, config: ScanConfig) -> Self {
        let filter = FilterSet::new(config.requested.iter().cloned());
        Self {
            blocks: BlockReader::new(reader),
            config,
            filter,
            state: ScanState::AwaitingHeader,
            block_index: 0,
            entries: 0,
        }
    }

    /// Scan the whole archive.
    ///
    /// Listing lines go to `listing`; in extract mode every selected entry is
    /// written to a sink from `sinks`. Output produced before a failure is
    /// flushed either way.
    pub async fn run<S, W>(mut self, sinks: &mut S, listing: &mut W) -> Result<ScanReport>
    where
        S: SinkProvider,
        W: AsyncWrite + Unpin + Send,
    {
        let scanned = self.scan(sinks, listing).await;
        listing.flush().await?;
        let termination = scanned?;

        debug!(
            "scan finished: {:?}, {} entries in {} blocks",
            termination, self.entries, self.block_index
        );

        Ok(ScanReport {
            entries: self.entries,
            blocks: self.block_index,
            termination,
            mode: self.config.mode,
            filter: self.filter,
        })
    }

    async fn scan<S, W>(&mut self, sinks: &mut S, listing: &mut W) -> Result<Termination>
    where
        S: SinkProvider,
        W: AsyncWrite + Unpin + Send,
    {
        let mut block: Record = [0; RECORD_SIZE];

        loop {
            match self.blocks.read_block(&mut block).await? {
                BlockRead::EndOfStream => {
                    return Ok(match self.state {
                        ScanState::SawOneZeroBlock => {
                            warn!("A lone zero block at {}", self.block_index);
                            Termination::LoneZeroBlock {
                                block: self.block_index,
                            }
                        }
                        ScanState::AwaitingHeader => Termination::EndOfStream,
                    });
                }
                BlockRead::Partial(n) => {
                    debug!("header record cut off after {} bytes", n);
                    return Err(TarError::StreamTruncated {
                        block: self.block_index + 1,
                    });
                }
                BlockRead::Full => {}
            }

            self.block_index += 1;

            if is_all_zero(&block) {
                match self.state {
                    ScanState::SawOneZeroBlock => return Ok(Termination::EndOfArchive),
                    ScanState::AwaitingHeader => {
                        self.state = ScanState::SawOneZeroBlock;
                        continue;
                    }
                }
            }

            self.state = ScanState::AwaitingHeader;
            let header = HeaderBlock::parse(&block);
            self.process_entry(&header, sinks, listing).await?;
        }
    }

    async fn process_entry<S, W>(
        &mut self,
        header: &HeaderBlock,
        sinks: &mut S,
        listing: &mut W,
    ) -> Result<()>
    where
        S: SinkProvider,
        W: AsyncWrite + Unpin + Send,
    {
        if !header.is_magic_valid() {
            return Err(TarError::InvalidMagic {
                block: self.block_index,
            });
        }
        if !header.is_supported_type() {
            return Err(TarError::UnsupportedEntryType {
                typeflag: header.typeflag,
            });
        }

        self.entries += 1;

        let selected =
            self.filter.is_selecting_all() || self.filter.matches_and_mark(header.name_bytes());
        let size = header.size();
        let name = header.name_lossy();

        debug!(
            "entry {:?} at block {}: {} bytes, selected: {}",
            name, self.block_index, size, selected
        );

        if selected && self.config.lists_entries() {
            listing.write_all(header.name_bytes()).await?;
            listing.write_all(b"\n").await?;
        }

        let mut sink = if selected && self.config.mode == Mode::Extract {
            let sink = sinks
                .create(&name)
                .await
                .map_err(|source| TarError::SinkUnavailable {
                    name: name.clone(),
                    source,
                })?;
            Some(sink)
        } else {
            None
        };

        let transfer = PayloadTransfer::new(size);
        transfer
            .run(&mut self.blocks, self.block_index + 1, sink.as_mut())
            .await
            .map_err(|e| e.into_tar_error(&name))?;
        self.block_index += transfer.records;

        if let Some(sink) = sink {
            sinks
                .finish(&name, sink)
                .await
                .map_err(|source| TarError::Write {
                    name: name.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}
