//! Error types for rangegen.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RangegenError {
    /// A single CIDR literal could not be parsed. Callers skip the entry.
    #[error("Invalid CIDR '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// One remote source failed. Other sources are still used.
    #[error("Failed to fetch {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("All bulk sources failed, no CIDR blocks fetched")]
    TotalFetchFailure,

    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RangegenError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
