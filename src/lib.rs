//! # runtar
//!
//! A Rust tar lister/extractor for ustar archives, with HTTP URL support.
//!
//! This library scans a tar stream record by record and either lists or
//! extracts the entries matching a set of requested names. The archive can
//! come from the local filesystem, standard input, or a remote HTTP server;
//! tar is read strictly front to back, so remote archives are streamed with
//! a single request and never buffered whole.
//!
//! ## Features
//!
//! - ustar and old GNU magic
//! - Regular file entries; any other entry type aborts the scan
//! - End-of-archive detection via two zero records, tolerating a lone one
//! - Truncation detection on every record
//! - Selection by exact name, with not-found reporting in list mode
//!
//! ## Example
//!
//! ```no_run
//! use runtar::{ArchiveScanner, LocalFileReader, MemoryExtractor, Mode, ScanConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = LocalFileReader::new("archive.tar".as_ref()).await?;
//!     let config = ScanConfig {
//!         mode: Mode::List,
//!         verbose: false,
//!         requested: vec!["README".to_string()],
//!     };
//!
//!     let mut listing: Vec<u8> = Vec::new();
//!     let report = ArchiveScanner::new(reader, config)
//!         .run(&mut MemoryExtractor::new(), &mut listing)
//!         .await?;
//!     report.summary().into_result()?;
//!
//!     print!("{}", String::from_utf8_lossy(&listing));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod tar;

pub use cli::Cli;
pub use error::{Result, TarError};
pub use io::{AsyncReadStream, HttpStreamReader, LocalFileReader, ReadStream, StdinReader};
pub use tar::{
    ArchiveScanner, DirectoryExtractor, FilterSet, HeaderBlock, MemoryExtractor, Mode,
    ScanConfig, ScanReport, ScanSummary, SinkProvider, StdoutExtractor, Termination,
};
