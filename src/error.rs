//! # Error Types
//!
//! This module defines error types used throughout the kvittering library.
//!
//! Encoding and formatting cannot fail: they are pure functions over typed
//! data. Errors only come from the outside world, i.e. the serial transport,
//! input documents and the local filesystem.

use std::io;

use thiserror::Error;

/// Main error type for kvittering operations
#[derive(Debug, Error)]
pub enum KvitteringError {
    /// The host has no serial port capability at all.
    ///
    /// Not retryable; the caller should tell the user to print from a
    /// supported machine.
    #[error("Serial printing is not supported on this host")]
    UnsupportedTransport,

    /// Failure while acquiring, opening, writing to or closing the port.
    #[error("Transport error: {step}: {source}")]
    Transport {
        /// The step that failed, e.g. "open /dev/ttyUSB0"
        step: String,
        #[source]
        source: io::Error,
    },

    /// A receipt document could not be parsed
    #[error("Invalid receipt: {0}")]
    Receipt(#[from] serde_json::Error),

    /// Invalid settings file or flag combination
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl KvitteringError {
    /// Wrap a transport-level failure with a short description of the step.
    pub fn transport(step: &str, source: io::Error) -> Self {
        KvitteringError::Transport {
            step: step.to_string(),
            source,
        }
    }
}

/// Result type for kvittering operations
pub type Result<T> = std::result::Result<T, KvitteringError>;
