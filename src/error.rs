//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present in the cache (never added, or already swept)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Rejected construction parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Returns true for a cache miss, which callers answer with a fresh fetch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::NotFound("https://pokeapi.co/api/v2/pokemon/pikachu".to_string());
        assert_eq!(
            err.to_string(),
            "Key not found: https://pokeapi.co/api/v2/pokemon/pikachu"
        );

        let err = CacheError::InvalidConfig("ttl must be greater than zero".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: ttl must be greater than zero"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(CacheError::NotFound("k".to_string()).is_not_found());
        assert!(!CacheError::InvalidConfig("bad".to_string()).is_not_found());
    }
}
