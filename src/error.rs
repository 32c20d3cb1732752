//! Error types for mdocx library.

use std::io;
use thiserror::Error;

/// Result type alias for mdocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing a document.
///
/// Malformed Markdown is never an error: the parser and assembler always
/// fall back to literal text. Only packaging, I/O and metadata decoding fail.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The DOCX package could not be written.
    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization of the document tree failed.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The lesson metadata record could not be decoded.
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// No theme is registered under the given key.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Error while writing document parts.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownTheme("teal".to_string());
        assert_eq!(err.to_string(), "Unknown theme: teal");

        let err = Error::InvalidMetadata("missing field `subject`".to_string());
        assert_eq!(err.to_string(), "Invalid metadata: missing field `subject`");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
