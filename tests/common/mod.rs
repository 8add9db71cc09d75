//! Helpers for building tar streams in memory.

#![allow(dead_code)]

use runtar::tar::RECORD_SIZE;
use runtar::{ArchiveScanner, AsyncReadStream, MemoryExtractor, Mode, ScanConfig, ScanReport};

/// Builder for a tar stream, one record at a time.
#[derive(Default)]
pub struct ArchiveBuilder {
    bytes: Vec<u8>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a regular file entry with ustar magic.
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.entry(name, data, b'0', b"ustar\0")
    }

    /// Appends an entry with an explicit type flag and magic.
    pub fn entry(mut self, name: &str, data: &[u8], typeflag: u8, magic: &[u8; 6]) -> Self {
        self.bytes
            .extend_from_slice(&header(name, data.len() as u64, typeflag, magic));
        self.bytes.extend_from_slice(data);
        let padded = data.len().div_ceil(RECORD_SIZE) * RECORD_SIZE;
        self.bytes.resize(self.bytes.len() + padded - data.len(), 0);
        self
    }

    /// Appends a header whose size field says `size` with no payload.
    pub fn header_only(mut self, name: &str, size: u64) -> Self {
        self.bytes
            .extend_from_slice(&header(name, size, b'0', b"ustar\0"));
        self
    }

    pub fn zero_block(mut self) -> Self {
        self.bytes.resize(self.bytes.len() + RECORD_SIZE, 0);
        self
    }

    /// Appends the two-zero-record terminator.
    pub fn finish(self) -> Vec<u8> {
        self.zero_block().zero_block().bytes
    }

    /// Returns the stream without a terminator.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes one header record.
pub fn header(name: &str, size: u64, typeflag: u8, magic: &[u8; 6]) -> [u8; RECORD_SIZE] {
    let mut block = [0u8; RECORD_SIZE];
    block[..name.len()].copy_from_slice(name.as_bytes());
    block[100..107].copy_from_slice(b"0000644");
    let size = format!("{:011o}", size);
    block[124..135].copy_from_slice(size.as_bytes());
    block[156] = typeflag;
    block[257..263].copy_from_slice(magic);
    block[263..265].copy_from_slice(b"00");
    block
}

pub fn config(mode: Mode, verbose: bool, requested: &[&str]) -> ScanConfig {
    ScanConfig {
        mode,
        verbose,
        requested: requested.iter().map(|s| s.to_string()).collect(),
    }
}

/// Outcome of an in-memory scan: the scan result, the listing, and the
/// extracted entries.
pub struct Scan {
    pub result: runtar::Result<ScanReport>,
    pub listing: String,
    pub extracted: MemoryExtractor,
}

pub async fn scan(archive: &[u8], config: ScanConfig) -> Scan {
    let mut extracted = MemoryExtractor::new();
    let mut listing: Vec<u8> = Vec::new();
    let result = ArchiveScanner::new(AsyncReadStream::new(archive), config)
        .run(&mut extracted, &mut listing)
        .await;
    Scan {
        result,
        listing: String::from_utf8(listing).unwrap(),
        extracted,
    }
}
