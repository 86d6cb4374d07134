//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The host mail application rejected a call.
    #[error("{0}")]
    HostApi(String),

    /// Signature markup was rejected by the pipeline.
    #[error(transparent)]
    Markup(#[from] mailsig_html::Error),

    /// Image URL is not an http(s) link to a supported picture.
    #[error("Invalid picture URL: {0}")]
    InvalidImageUrl(String),

    /// No identity is selected to receive the signature.
    #[error("No identity selected")]
    NoIdentitySelected,

    /// Draft storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Clipboard write failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Failure without a message.
    #[error("Unknown error")]
    Unknown,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
