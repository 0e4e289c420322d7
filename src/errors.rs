/*!
 * Error types for the scriptcast application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a script line source
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Error when the script document cannot be read
    #[error("Failed to read script source {path}: {source}")]
    Unreadable {
        /// Path of the script source
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Error when the JSON document is not valid JSON or lacks a lines array
    #[error("Malformed script document {path}: {reason}")]
    Malformed {
        /// Path of the script document
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors that can occur while joining WAV clips
#[derive(Error, Debug)]
pub enum AudioJoinError {
    /// No WAV files were found in the input directory
    #[error("No WAV files found in {0}")]
    NoInputFiles(PathBuf),

    /// A clip's PCM format differs from the first clip's format
    #[error(
        "Format mismatch in {file}: expected {expected_channels} ch / {expected_bits} bit / {expected_rate} Hz, \
         found {found_channels} ch / {found_bits} bit / {found_rate} Hz"
    )]
    FormatMismatch {
        /// The offending clip
        file: PathBuf,
        expected_channels: u16,
        expected_bits: u16,
        expected_rate: u32,
        found_channels: u16,
        found_bits: u16,
        found_rate: u32,
    },

    /// Error propagated from the WAV reader/writer
    #[error("WAV error in {file}: {source}")]
    Wav {
        /// The clip being read or the output being written
        file: PathBuf,
        /// Underlying hound error
        source: hound::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a script source
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from audio joining
    #[error("Audio error: {0}")]
    Audio(#[from] AudioJoinError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
