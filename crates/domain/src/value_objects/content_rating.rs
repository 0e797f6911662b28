//! Zone content ratings.

use std::fmt;

use serde::Serialize;

/// Content rating advertised by a zone.
///
/// Known codes map to fixed display strings; anything else is kept verbatim
/// so it can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentRating {
    Teen,
    Mature,
    AdultsOnly,
    Unrecognized(String),
}

impl ContentRating {
    /// Map a wire code (`T`, `M`, `AO`), case-insensitively.
    pub fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "T" => Self::Teen,
            "M" => Self::Mature,
            "AO" => Self::AdultsOnly,
            _ => Self::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Teen => "Teen".to_string(),
            Self::Mature => "Mature".to_string(),
            Self::AdultsOnly => "Adults Only".to_string(),
            Self::Unrecognized(code) => format!("{} [Unknown]", code),
        }
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
