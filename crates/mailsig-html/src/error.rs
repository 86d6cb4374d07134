//! Error types for signature markup operations.

/// Result type alias for signature markup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A problem recorded while parsing a fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {position}")]
pub struct ParseError {
    /// Byte offset in the input.
    pub position: usize,
    /// Description of the problem.
    pub message: String,
}

/// Signature markup error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Markup contains a tag that may never reach a signature.
    #[error("<{tag}> tags are not allowed")]
    ForbiddenTag {
        /// Lower-cased name of the offending tag.
        tag: &'static str,
    },

    /// Markup does not parse cleanly.
    #[error("Malformed HTML: {0}")]
    MalformedMarkup(ParseError),
}
