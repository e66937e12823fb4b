//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bot.command_prefix must not be empty")]
    EmptyCommandPrefix,
    #[error("bot.command_prefix must not contain whitespace")]
    WhitespaceCommandPrefix,
    #[error("presence.greetings must contain at least one line")]
    NoGreetings,
    #[error("bridge.max_line_length must be greater than zero")]
    ZeroLineLength,
    #[error("bridge.outbound_queue must be greater than zero")]
    ZeroOutboundQueue,
    #[error("bridge.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let prefix = &config.bot.command_prefix;
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyCommandPrefix);
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::WhitespaceCommandPrefix);
    }

    if config.presence.greetings.is_empty() {
        errors.push(ValidationError::NoGreetings);
    }

    if config.bridge.max_line_length == 0 {
        errors.push(ValidationError::ZeroLineLength);
    }
    if config.bridge.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    // tokio::sync::mpsc::channel panics on a zero capacity.
    if config.bridge.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
