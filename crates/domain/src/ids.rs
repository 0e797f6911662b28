use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::DomainError;

/// Server-assigned entity identifier.
///
/// Ids are opaque strings compared case-insensitively: `"NPC-1"` and
/// `"npc-1"` address the same entity. The original spelling is kept for
/// display and for echoing back to the server.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Entity id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for equality and hashing.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Compare against a raw token without allocating an id.
    pub fn matches(&self, token: &str) -> bool {
        self.0.eq_ignore_ascii_case(token.trim())
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EntityId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_blank_id_rejected() {
        assert!(EntityId::new("").is_err());
        assert!(EntityId::new("   ").is_err());
    }

    #[test]
    fn test_id_is_trimmed() {
        let id = EntityId::new("  npc-1 ").unwrap();
        assert_eq!(id.as_str(), "npc-1");
    }

    #[test]
    fn test_case_insensitive_equality_and_hash() {
        let upper = EntityId::new("NPC-1").unwrap();
        let lower = EntityId::new("npc-1").unwrap();
        assert_eq!(upper, lower);

        let mut map = HashMap::new();
        map.insert(upper, "Warden");
        assert_eq!(map.get(&lower), Some(&"Warden"));
    }

    #[test]
    fn test_matches_token() {
        let id = EntityId::new("Npc-1").unwrap();
        assert!(id.matches("npc-1"));
        assert!(id.matches(" NPC-1 "));
        assert!(!id.matches("npc-2"));
    }
}
