//! Error types for the Marquee library.
//!
//! All fallible operations in Marquee return the [`MarqueeError`] enum, which
//! carries enough context to tell ingestion problems apart from analysis or
//! encoding problems. Per-message request handling is deliberately infallible
//! at the public boundary; these errors surface at construction time (loading
//! a catalog, fitting the recommender) and inside the engine, where they are
//! logged and converted to a user-safe reply.
//!
//! # Examples
//!
//! ```
//! use marquee::error::{MarqueeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MarqueeError::catalog("catalog is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Marquee operations.
///
/// This enum represents all possible errors that can occur in the Marquee
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// I/O errors (reading catalog files, config files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors during catalog ingestion
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Catalog-related errors (missing fields, empty catalog, etc.)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Feature-encoding errors (unfitted encoder, dimension mismatch, etc.)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MarqueeError.
pub type Result<T> = std::result::Result<T, MarqueeError>;

impl MarqueeError {
    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Catalog(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Analysis(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Encoding(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        MarqueeError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MarqueeError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
