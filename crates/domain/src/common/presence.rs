//! Tri-state field presence.
//!
//! Several server payload fields distinguish "key absent" (leave the stored
//! value alone), "key present with null" (clear it) and "key present with a
//! value" (replace it). `Option<T>` cannot carry all three, so those fields
//! decode into [`Presence<T>`].
//!
//! Decoding is lenient: a value of the wrong JSON type degrades to
//! [`Presence::Absent`] instead of failing the surrounding payload.
//!
//! ```
//! use serde::Deserialize;
//! use wyrdline_domain::common::Presence;
//!
//! #[derive(Deserialize)]
//! struct Patch {
//!     #[serde(default)]
//!     sample: Presence<Vec<String>>,
//! }
//!
//! let absent: Patch = serde_json::from_str("{}").unwrap();
//! let cleared: Patch = serde_json::from_str(r#"{"sample":null}"#).unwrap();
//! let set: Patch = serde_json::from_str(r#"{"sample":["Warden"]}"#).unwrap();
//!
//! assert_eq!(absent.sample, Presence::Absent);
//! assert_eq!(cleared.sample, Presence::Null);
//! assert_eq!(set.sample, Presence::Value(vec!["Warden".to_string()]));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A payload field that may be absent, explicitly null, or carry a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
    /// The key was not in the payload
    Absent,
    /// The key was present with `null`
    Null,
    /// The key was present with a usable value
    Value(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Presence<T> {
    /// Build from an `Option`, treating `None` as an explicit null.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// True when the key was present (null or value).
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// `None` when absent, `Some(None)` for null, `Some(Some(v))` for a value.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// Overwrite `slot` when present (clearing it on null).
    ///
    /// Returns whether `slot` was written.
    pub fn apply_to(self, slot: &mut Option<T>) -> bool {
        match self.into_update() {
            Some(update) => {
                *slot = update;
                true
            }
            None => false,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Presence<U> {
        match self {
            Self::Absent => Presence::Absent,
            Self::Null => Presence::Null,
            Self::Value(v) => Presence::Value(f(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Presence<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        Ok(T::deserialize(raw).map(Self::Value).unwrap_or(Self::Absent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        speaker: Presence<String>,
        #[serde(default)]
        count: Presence<u32>,
    }

    #[test]
    fn test_absent_key_is_absent() {
        let parsed: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.speaker, Presence::Absent);
        assert!(!parsed.count.is_present());
    }

    #[test]
    fn test_null_is_distinct_from_absent() {
        let parsed: Sample = serde_json::from_str(r#"{"speaker":null}"#).unwrap();
        assert_eq!(parsed.speaker, Presence::Null);
        assert!(parsed.speaker.is_present());
    }

    #[test]
    fn test_wrong_type_degrades_to_absent() {
        let parsed: Sample = serde_json::from_str(r#"{"speaker":42,"count":"many"}"#).unwrap();
        assert_eq!(parsed.speaker, Presence::Absent);
        assert_eq!(parsed.count, Presence::Absent);
    }

    #[test]
    fn test_apply_to_respects_presence() {
        let mut slot = Some("Aria".to_string());

        assert!(!Presence::<String>::Absent.apply_to(&mut slot));
        assert_eq!(slot.as_deref(), Some("Aria"));

        assert!(Presence::Value("Bram".to_string()).apply_to(&mut slot));
        assert_eq!(slot.as_deref(), Some("Bram"));

        assert!(Presence::<String>::Null.apply_to(&mut slot));
        assert_eq!(slot, None);
    }

    #[test]
    fn test_from_option_and_map() {
        assert_eq!(Presence::from_option(Some(3)).map(|n| n * 2), Presence::Value(6));
        assert_eq!(Presence::<u32>::from_option(None), Presence::Null);
    }
}
