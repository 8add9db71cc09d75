//! Error taxonomy for archive scans.
//!
//! Every variant is fatal: the scan stops at the point of detection and
//! nothing is retried. [`TarError::EntriesNotFound`] is the only kind that is
//! raised after a structurally clean scan, once the requested names have been
//! reconciled against what the archive contained.

use std::io;

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, TarError>;

/// Exit status used for every failed run.
pub const FAILURE_STATUS: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum TarError {
    /// A record read returned fewer than 512 bytes.
    #[error("Unexpected EOF in archive")]
    StreamTruncated { block: u64 },

    /// A non-terminator block failed magic validation.
    #[error("This does not look like a tar archive")]
    InvalidMagic { block: u64 },

    /// The entry is not a regular file.
    #[error("Unsupported header type: {typeflag}")]
    UnsupportedEntryType { typeflag: u8 },

    /// The output for a selected entry could not be created.
    #[error("Couldn't create file {name}")]
    SinkUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Requested names that no archive entry matched, in request order.
    #[error("{} requested entries not found in archive", .names.len())]
    EntriesNotFound { names: Vec<String> },

    /// The archive source failed.
    #[error("error reading archive")]
    Read(#[source] anyhow::Error),

    /// Writing an extracted entry failed.
    #[error("error writing {name}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Writing the listing failed.
    #[error("error writing listing")]
    Output(#[from] io::Error),
}

impl TarError {
    /// Process exit status for this error.
    ///
    /// One fixed status is used for all kinds, including sink failures.
    pub fn exit_code(&self) -> u8 {
        FAILURE_STATUS
    }

    /// Follow-up line printed after the error message, if any.
    pub fn epilogue(&self) -> Option<&'static str> {
        match self {
            TarError::StreamTruncated { .. } => Some("Error is not recoverable: exiting now"),
            TarError::InvalidMagic { .. } | TarError::EntriesNotFound { .. } => {
                Some("Exiting with failure status due to previous errors")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_shares_one_status() {
        let errors = [
            TarError::StreamTruncated { block: 3 },
            TarError::InvalidMagic { block: 1 },
            TarError::UnsupportedEntryType { typeflag: b'5' },
            TarError::SinkUnavailable {
                name: "a".into(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
            TarError::EntriesNotFound {
                names: vec!["b".into()],
            },
        ];
        for e in &errors {
            assert_eq!(e.exit_code(), FAILURE_STATUS);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TarError::UnsupportedEntryType { typeflag: 53 }.to_string(),
            "Unsupported header type: 53"
        );
        assert_eq!(
            TarError::StreamTruncated { block: 0 }.epilogue(),
            Some("Error is not recoverable: exiting now")
        );
        assert!(TarError::UnsupportedEntryType { typeflag: 0 }.epilogue().is_none());
    }
}
