//! Unified error handling for afkd.
//!
//! This module provides the error hierarchy shared by the handlers and the
//! bridge transport, with automatic conversions and log labeling.

use thiserror::Error;

// ============================================================================
// Platform Errors (bridge capability calls)
// ============================================================================

/// Failures of a platform capability call (fetch, delete, send).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The bridge reached the platform and the platform said no.
    #[error("platform rejected request: {0}")]
    Rejected(String),

    /// The bridge did not answer within the configured timeout.
    #[error("bridge did not answer within {0:?}")]
    Timeout(std::time::Duration),

    /// The bridge session is gone.
    #[error("bridge disconnected")]
    Disconnected,

    /// The bridge answered with something other than what was asked for.
    #[error("unexpected bridge response: {0}")]
    Unexpected(String),
}

// ============================================================================
// Handler Errors (event processing)
// ============================================================================

/// Errors that can occur while handling an inbound event.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Platform(PlatformError::Rejected(_)) => "platform_rejected",
            Self::Platform(PlatformError::Timeout(_)) => "platform_timeout",
            Self::Platform(PlatformError::Disconnected) => "bridge_disconnected",
            Self::Platform(PlatformError::Unexpected(_)) => "bridge_unexpected",
        }
    }
}

/// Result type for event handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_errors_convert_into_handler_errors() {
        fn fails() -> HandlerResult {
            let sent: Result<(), PlatformError> = Err(PlatformError::Disconnected);
            sent?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.error_code(), "bridge_disconnected");
        assert_eq!(err.to_string(), "platform error: bridge disconnected");
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes = [
            HandlerError::from(PlatformError::Rejected("x".into())).error_code(),
            HandlerError::from(PlatformError::Timeout(std::time::Duration::from_secs(1)))
                .error_code(),
            HandlerError::from(PlatformError::Disconnected).error_code(),
            HandlerError::from(PlatformError::Unexpected("x".into())).error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
