//! Domain-specific error types following panic-free policy.

use thiserror::Error;

/// Errors that can occur in domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Endpoint value could not be validated or parsed
    #[error("Invalid endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_display() {
        let err = DomainError::InvalidEndpoint {
            value: "localhost:0".to_string(),
            reason: "port must be 1-65535".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("localhost:0"));
        assert!(display.contains("port must be 1-65535"));
    }
}
