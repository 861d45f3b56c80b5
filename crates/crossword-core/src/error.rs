use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while building a puzzle model from its input files
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The file could not be opened or read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file was read but its content is unusable
    #[error("malformed {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl PuzzleError {
    /// Path of the input file that caused the failure
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

/// Failure while exporting a solved puzzle as an image
#[derive(Debug, Error)]
pub enum ExportError {
    /// This build carries no image writer
    #[error("image export is not available in this build")]
    CapabilityUnavailable,
    /// The image writer reported an error
    #[error("{0}")]
    Write(String),
}
