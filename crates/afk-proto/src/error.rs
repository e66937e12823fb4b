//! Error types for the bridge wire protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while decoding or encoding bridge lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The line was empty or whitespace only.
    #[error("empty line")]
    EmptyLine,

    /// The line was not a valid protocol object.
    #[error("malformed line: {0}")]
    Json(#[from] serde_json::Error),
}
