//! Main entry point for the runtar CLI application.
//!
//! This binary lists or extracts tar archives read from the local
//! filesystem, standard input, or remote HTTP URLs.

use anyhow::{Context, Result};
use clap::Parser;
use log::Level;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use runtar::error::FAILURE_STATUS;
use runtar::{
    ArchiveScanner, Cli, DirectoryExtractor, HttpStreamReader, LocalFileReader, ReadStream,
    StdinReader, StdoutExtractor, TarError,
};

/// Application entry point.
///
/// Parses command-line arguments, runs the scan, and maps any failure to a
/// diagnostic on stderr and a non-zero exit status.
#[tokio::main]
async fn main() -> ExitCode {
    // Warnings from the scan are user-facing diagnostics, printed like errors
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| match record.level() {
            Level::Error | Level::Warn => writeln!(buf, "runtar: {}", record.args()),
            level => writeln!(buf, "[{} {}] {}", level, record.target(), record.args()),
        })
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_error(&err)),
    }
}

/// Open the archive source named by `-f` and process it.
async fn run(cli: &Cli) -> Result<()> {
    if cli.is_http_url() {
        // Stream the remote archive with a single GET
        let reader = HttpStreamReader::new(cli.file.clone()).await?;
        let counter = reader.transfer_counter();

        let result = process_tar(reader, cli).await;

        // Display network transfer statistics for HTTP sources
        if cli.verbose {
            let transferred = counter.load(Ordering::Relaxed);
            eprintln!("\nTotal bytes transferred: {}", format_size(transferred));
        }
        result
    } else if cli.is_stdin() {
        process_tar(StdinReader::stdin(), cli).await
    } else {
        let reader = LocalFileReader::new(Path::new(&cli.file))
            .await
            .with_context(|| format!("could not open file {}", cli.file))?;
        process_tar(reader, cli).await
    }
}

/// Scan the archive and reconcile the requested names.
///
/// Listing lines go to stdout, except with `-O` where stdout carries the
/// extracted data and the listing moves to stderr.
async fn process_tar<R: ReadStream>(reader: R, cli: &Cli) -> Result<()> {
    let scanner = ArchiveScanner::new(reader, cli.scan_config());

    let report = if cli.to_stdout {
        scanner
            .run(&mut StdoutExtractor, &mut tokio::io::stderr())
            .await?
    } else {
        let mut extractor = DirectoryExtractor::new(&cli.directory);
        scanner
            .run(&mut extractor, &mut tokio::io::stdout())
            .await?
    };

    report.summary().into_result()?;

    Ok(())
}

/// Print the diagnostic for a failed run and return its exit status.
fn report_error(err: &anyhow::Error) -> u8 {
    let Some(tar_err) = err.downcast_ref::<TarError>() else {
        eprintln!("runtar: {:#}", err);
        return FAILURE_STATUS;
    };

    match tar_err {
        TarError::EntriesNotFound { names } => {
            for name in names {
                eprintln!("runtar: {}: Not found in archive", name);
            }
        }
        _ => eprintln!("runtar: {:#}", err),
    }

    if let Some(epilogue) = tar_err.epilogue() {
        eprintln!("runtar: {}", epilogue);
    }

    tar_err.exit_code()
}

/// Format a byte size into a human-readable string.
///
/// Sizes below one kilobyte are shown in bytes; larger ones are scaled to
/// the biggest unit that keeps the value at or above 1.
fn format_size(size: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if size < 1024 {
        return format!("{} bytes", size);
    }

    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
