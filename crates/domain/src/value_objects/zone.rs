//! The zone the local player currently occupies.

use serde::Serialize;

use super::ContentRating;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ZoneState {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub content_rating: Option<ContentRating>,
}

impl ZoneState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_rating(mut self, rating: ContentRating) -> Self {
        self.content_rating = Some(rating);
        self
    }

    /// Whether `other` describes a different zone than this one.
    ///
    /// Ids win when both sides have one; otherwise names are compared.
    pub fn differs_from(&self, other: &ZoneState) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => !a.eq_ignore_ascii_case(b),
            _ => !self.name.eq_ignore_ascii_case(&other.name),
        }
    }

    /// Fill fields missing on `self` from `existing`.
    pub fn fill_from(mut self, existing: &ZoneState) -> Self {
        if self.id.is_none() {
            self.id.clone_from(&existing.id);
        }
        if self.name.trim().is_empty() {
            self.name.clone_from(&existing.name);
        }
        if self.description.is_none() {
            self.description.clone_from(&existing.description);
        }
        if self.content_rating.is_none() {
            self.content_rating.clone_from(&existing.content_rating);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differs_by_id_then_name() {
        let a = ZoneState::new("Harbor").with_id("z1");
        let b = ZoneState::new("Harbour").with_id("Z1");
        assert!(!a.differs_from(&b));

        let c = ZoneState::new("harbor");
        assert!(!a.differs_from(&c));
        assert!(a.differs_from(&ZoneState::new("Market")));
    }

    #[test]
    fn test_fill_from_keeps_known_fields() {
        let existing = ZoneState::new("Harbor")
            .with_id("z1")
            .with_description("Salt and tar.")
            .with_content_rating(ContentRating::Teen);
        let merged = ZoneState::default().fill_from(&existing);
        assert_eq!(merged, existing);
    }
}
