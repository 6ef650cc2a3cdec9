//! Error handling for XPORT decoding.
//!
//! Two decode failures are distinguished: input that is not recognizable as a
//! transport file at all, and input that is recognizable but cannot be read
//! in some specific way. I/O and configuration errors belong to the outer
//! surfaces (file reading, CLI).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XportError {
    #[error("cannot open file: {0}")]
    Format(String),

    #[error("unsupported file: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl XportError {
    /// Create a format error
    pub fn format(detail: impl Into<String>) -> Self {
        Self::Format(detail.into())
    }

    /// Create an unsupported-content error
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported(reason.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors raised by the decoder itself rather than the environment
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Unsupported(_))
    }
}

pub type Result<T> = std::result::Result<T, XportError>;
