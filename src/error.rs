//! Error handling for the rendering context.
//!
//! This module defines the main error type `Error` used throughout the
//! library, along with a convenient `Result` type alias. It uses `thiserror`
//! for easy error handling. Failures reported by the wrapped template engine
//! are carried transparently so their original messages reach the caller
//! unmodified.

use thiserror::Error;

/// Result type for rendering context operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rendering context operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input shape rejected by merge or dispatch operations
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Field capture of a plain data object failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by the wrapped template engine, passed through
    #[error(transparent)]
    Engine(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap an engine-level error without reinterpreting it
    pub fn engine<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine(Box::new(err))
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        Self::engine(err)
    }
}
