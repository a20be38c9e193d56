//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record under this id.
    #[error("Report not found: {0}")]
    NotFound(String),

    /// The record exists but its expiry has passed.
    #[error("Report expired: {0}")]
    Expired(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true when the record is missing or no longer served.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Expired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(StoreError::NotFound("r1".into()).is_missing());
        assert!(StoreError::Expired("r1".into()).is_missing());
        assert!(!StoreError::Config("bad id".into()).is_missing());
    }
}
