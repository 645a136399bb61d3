//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for merge operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// Malformed data line (missing fields, non-integer position)
    #[error("{}: malformed record at line {}: {}", .path.display(), .line, .message)]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A source path could not be opened for reading
    #[error("failed to open source {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An opened source failed mid-stream (disk fault, bad compression block)
    #[error("failed to read from source {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output sink rejected a write
    #[error("failed to write merged output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    /// A fully drained source could not be deleted
    #[error("failed to delete drained source {}: {}", .path.display(), .source)]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Type alias for Results using MergeError
pub type Result<T> = std::result::Result<T, MergeError>;

impl MergeError {
    /// Create a format error with file and line context
    pub fn format(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a source-open error
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a mid-stream read error
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create an output-write error
    pub fn write(source: io::Error) -> Self {
        Self::Write { source }
    }

    /// Create a cleanup error
    pub fn cleanup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Cleanup {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts the merge. Everything except `Cleanup`
    /// does; a failed deletion is reported and skipped, never retried.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Cleanup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn test_only_cleanup_is_nonfatal() {
        assert!(!MergeError::cleanup("a.txt", not_found()).is_fatal());
        assert!(MergeError::open("a.txt", not_found()).is_fatal());
        assert!(MergeError::read("a.txt", not_found()).is_fatal());
        assert!(MergeError::write(not_found()).is_fatal());
        assert!(MergeError::format("a.txt", 1, "missing position field").is_fatal());
    }

    #[test]
    fn test_format_message_carries_path_and_line() {
        let err = MergeError::format("chunk7.vcf", 42, "invalid position 'abc'");
        let message = err.to_string();
        assert!(message.contains("chunk7.vcf"));
        assert!(message.contains("line 42"));
    }
}
