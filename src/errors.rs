/*!
 * Error types for the subcards application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when reading subtitle files
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Input text did not match the grammar at the given byte offset.
    /// `expected` is a human-readable expectation ("expected ':'", "trailing data", ...)
    #[error("parse error at byte {offset}: {expected}")]
    Parse {
        /// Byte offset of the offending input position
        offset: usize,
        /// What the parser expected to find there
        expected: String,
    },

    /// Subtitle file has an extension no parser is registered for
    #[error("unsupported subtitle extension: {0}")]
    UnsupportedExtension(String),
}

impl SubtitleError {
    /// Shorthand for a parse error at `offset`
    pub fn parse(offset: usize, expected: impl Into<String>) -> Self {
        SubtitleError::Parse {
            offset,
            expected: expected.into(),
        }
    }
}

/// Errors that can occur when running a text-transform collaborator
#[derive(Error, Debug)]
pub enum TransformError {
    /// The configured transform command could not be started
    #[error("failed to run transform command '{command}': {message}")]
    CommandFailed {
        /// The configured command line
        command: String,
        /// What went wrong
        message: String,
    },

    /// The transform command exited nonzero
    #[error("transform command '{command}' exited with status {status}")]
    NonZeroExit {
        /// The configured command line
        command: String,
        /// Exit status description
        status: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing or dispatch
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from a text transform
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Error from the media extractor
    #[error("Media extraction error: {0}")]
    Media(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
