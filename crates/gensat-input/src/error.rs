//! Error types for the load input utilities
//!
//! The file-open variants carry the exact diagnostics the load wrappers grep
//! for (`Cannot open input file: ...`, `Cannot open output file: ...`).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for load input operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error type for the Fetcher and the Filter
#[derive(Error, Debug)]
pub enum IngestError {
    /// Source file of the Filter could not be opened
    #[error("Cannot open input file: {}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loader input file could not be created
    #[error("Cannot open output file: {}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query tool request failed or returned a non-success status
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Query tool response is not well-formed XML
    #[error("Failed to parse XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Query tool response parsed but is not a complete document
    #[error("Malformed query tool response: {0}")]
    MalformedResponse(String),

    /// Read or write failure after the files were opened
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Create an input-open error
    pub fn input_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an output-open error
    pub fn output_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputOpen {
            path: path.into(),
            source,
        }
    }

    /// Whether the error happened while opening one of the files
    pub fn is_file_open(&self) -> bool {
        matches!(self, Self::InputOpen { .. } | Self::OutputOpen { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_open_messages() {
        let err = IngestError::input_open(
            "/data/gensat/gensat_export.txt",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            err.to_string(),
            "Cannot open input file: /data/gensat/gensat_export.txt"
        );
        assert!(err.is_file_open());

        let err = IngestError::output_open(
            "/data/gensat/gensat.input",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Cannot open output file: /data/gensat/gensat.input"
        );
        assert!(err.is_file_open());
    }

    #[test]
    fn test_io_error_is_not_file_open() {
        let err: IngestError = io::Error::new(io::ErrorKind::WriteZero, "disk full").into();
        assert!(!err.is_file_open());
        assert!(err.to_string().starts_with("File operation failed"));
    }
}
