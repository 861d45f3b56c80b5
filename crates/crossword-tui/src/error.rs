use crossword_core::{ExportError, PuzzleError};
use thiserror::Error;

/// Every way a solve attempt can end other than a clean success
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Input file missing, unreadable or malformed
    #[error("{0}")]
    Input(String),
    /// The solver ran and found no consistent fill
    #[error("No solution could be generated for the chosen files.")]
    NoSolutionFound,
    /// This build cannot write images
    #[error("Image export is not available in this build. Rebuild with the `image-export` feature enabled.")]
    ExportCapabilityUnavailable,
    /// Writing the image failed
    #[error("Could not save image: {0}")]
    Export(String),
    /// Anything else, including a panicking solver
    #[error("{0}")]
    Unexpected(String),
}

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl SolveError {
    /// Export failures leave the solved result in place
    pub fn is_export(&self) -> bool {
        matches!(self, Self::ExportCapabilityUnavailable | Self::Export(_))
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoSolutionFound => Severity::Info,
            Self::Input(_)
            | Self::ExportCapabilityUnavailable
            | Self::Export(_)
            | Self::Unexpected(_) => Severity::Error,
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(cause) | Self::Unexpected(cause) => {
                format!("Error while solving: {}", cause)
            }
            other => other.to_string(),
        }
    }
}

impl From<PuzzleError> for SolveError {
    fn from(err: PuzzleError) -> Self {
        Self::Input(err.to_string())
    }
}

impl From<ExportError> for SolveError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::CapabilityUnavailable => Self::ExportCapabilityUnavailable,
            ExportError::Write(cause) => Self::Export(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_input_error_mentions_path() {
        let err: SolveError = PuzzleError::Io {
            path: PathBuf::from("data/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }
        .into();

        assert!(matches!(err, SolveError::Input(_)));
        assert!(err.user_message().starts_with("Error while solving: "));
        assert!(err.user_message().contains("data/missing.txt"));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_export_classification() {
        let unavailable: SolveError = ExportError::CapabilityUnavailable.into();
        assert_eq!(unavailable, SolveError::ExportCapabilityUnavailable);
        assert!(unavailable.is_export());

        let write: SolveError = ExportError::Write("disk full".to_string()).into();
        assert_eq!(write.user_message(), "Could not save image: disk full");
        assert!(write.is_export());
    }

    #[test]
    fn test_no_solution_is_informational() {
        assert_eq!(SolveError::NoSolutionFound.severity(), Severity::Info);
        assert!(!SolveError::NoSolutionFound.is_export());
    }
}
