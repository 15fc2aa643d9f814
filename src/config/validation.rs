//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, attempt budget > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Network selection is checked separately, when the endpoint is resolved

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("network.port must be between 1 and 65535, got {0}")]
    InvalidPort(u32),

    #[error("network.rpc_timeout_secs must be greater than 0")]
    ZeroRpcTimeout,

    #[error("polling.max_attempts must be greater than 0")]
    ZeroPollAttempts,

    #[error("transaction.expiration_secs must be greater than 0")]
    ZeroExpiration,

    #[error("observability.log_level '{0}' is not a known level")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(port) = config.network.port {
        if !(1..=65535).contains(&port) {
            errors.push(ValidationError::InvalidPort(port));
        }
    }
    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRpcTimeout);
    }
    if config.polling.max_attempts == 0 {
        errors.push(ValidationError::ZeroPollAttempts);
    }
    if config.transaction.expiration_secs == 0 {
        errors.push(ValidationError::ZeroExpiration);
    }
    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
