//! Tar archive scanning, listing and extraction.
//!
//! This module reads a stream of 512-byte records in the ustar format and
//! lists or extracts the entries selected by name.
//!
//! ## Architecture
//!
//! - [`structures`]: record layout, header decoding and validation
//! - [`block`]: record-at-a-time reading with truncation detection
//! - [`filter`]: requested names and their found markers
//! - [`transfer`]: moving one entry's payload to a sink or discarding it
//! - [`scanner`]: the scan loop and the post-scan summary
//! - [`extractor`]: where extracted entries are written
//!
//! ## Tar Format Overview
//!
//! Each entry is one header record followed by `ceil(size / 512)` payload
//! records, the last one zero-padded. The archive ends with two all-zero
//! records; a single zero record followed by end of stream is tolerated.
//!
//! ## Limitations
//!
//! - Only regular files; directories, links and devices abort the scan
//! - No compression
//! - No archive creation

pub mod block;
pub mod extractor;
pub mod filter;
pub mod scanner;
pub mod structures;
pub mod transfer;

pub use block::{BlockRead, BlockReader};
pub use extractor::{DirectoryExtractor, MemoryExtractor, SinkProvider, StdoutExtractor};
pub use filter::FilterSet;
pub use scanner::{ArchiveScanner, Mode, ScanConfig, ScanReport, ScanSummary, Termination};
pub use structures::{HeaderBlock, RECORD_SIZE, record_count};
pub use transfer::PayloadTransfer;
