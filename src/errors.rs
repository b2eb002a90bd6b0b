/*!
 * Error types for the lecturecast library.
 *
 * This module contains custom error types for the different stages of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while allocating caption timing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimingError {
    /// Section texts and section durations must pair up one to one
    #[error("Length mismatch: {texts} section texts but {durations} durations")]
    LengthMismatch {
        /// Number of section texts supplied
        texts: usize,
        /// Number of durations supplied
        durations: usize,
    },

    /// A section duration was negative or not a finite number
    #[error("Invalid duration for section {index}: {value}")]
    InvalidDuration {
        /// Zero-based section position
        index: usize,
        /// Offending value in seconds
        value: f64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from caption timing
    #[error("Timing error: {0}")]
    Timing(#[from] TimingError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

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
