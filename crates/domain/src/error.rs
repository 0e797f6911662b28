//! Unified error types for the domain layer
//!
//! The client mirror tolerates almost everything the server sends, so the
//! only hard failures are constructor invariants (an entity without an id)
//! and lookups the host asked for explicitly (targeting an unknown entity).

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., blank identifier)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl DomainError {
    /// Creates a validation error for constructor invariants.
    ///
    /// # Example
    /// ```ignore
    /// if id.trim().is_empty() {
    ///     return Err(DomainError::validation("Entity id cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = DomainError::validation("Entity id cannot be empty");
        assert_eq!(
            err.to_string(),
            "Validation failed: Entity id cannot be empty"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_display() {
        let err = DomainError::not_found("Entity", "npc-9");
        assert_eq!(err.to_string(), "Entity not found: Entity with id npc-9");
        assert!(err.is_not_found());
    }
}
