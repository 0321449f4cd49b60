//! Error types for the bin2c-core library.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side is the [`Error`] enum below.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bin2c operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all bin2c operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read the input blob
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write the output fragment
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The symbol name was empty
    #[error("symbol name must not be empty")]
    EmptySymbolName,

    /// Failed to write into a caller-provided sink
    #[error("failed to emit source: {0}")]
    Emit(#[from] std::io::Error),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Attaches an output path to a sink error.
    ///
    /// Sink errors raised while writing to a file become [`Error::FileWrite`];
    /// every other variant is returned unchanged.
    pub(crate) fn at_output(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Emit(source) => Self::file_write(path, source),
            other => other,
        }
    }

    /// Returns true if the failure came from the input side
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::FileRead { .. })
    }
}
