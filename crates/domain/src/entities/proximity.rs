//! Proximity entities - the lightweight view of "who is near me"
//!
//! Unlike [`Entity`](super::Entity), every numeric field is concrete: the
//! roster UI sorts and filters on them, so unknown values default to `0`.

use serde::Serialize;

use crate::common::StringExt;
use crate::entities::Entity;
use crate::{DomainError, EntityId};

/// A nearby entity inside one proximity channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityEntity {
    pub id: EntityId,
    pub name: String,
    pub kind: String,
    pub bearing: f64,
    pub elevation: f64,
    pub range: f64,
}

impl ProximityEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: EntityId::new(id)?,
            name: name.into(),
            kind: kind.into(),
            bearing: 0.0,
            elevation: 0.0,
            range: 0.0,
        })
    }

    pub fn at(mut self, bearing: f64, elevation: f64, range: f64) -> Self {
        self.bearing = bearing;
        self.elevation = elevation;
        self.range = range;
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// An `updated` entry from a roster delta: only the id is guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialProximityEntity {
    pub id: EntityId,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub bearing: Option<f64>,
    pub elevation: Option<f64>,
    pub range: Option<f64>,
}

impl PartialProximityEntity {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            id: EntityId::new(id)?,
            name: None,
            kind: None,
            bearing: None,
            elevation: None,
            range: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    /// Overlay the present fields onto `target`.
    pub fn merge_into(&self, target: &mut ProximityEntity) {
        if let Some(name) = self.name.clone().and_then(StringExt::into_option) {
            target.name = name;
        }
        if let Some(kind) = self.kind.clone().and_then(StringExt::into_option) {
            target.kind = kind;
        }
        if let Some(bearing) = self.bearing {
            target.bearing = bearing;
        }
        if let Some(elevation) = self.elevation {
            target.elevation = elevation;
        }
        if let Some(range) = self.range {
            target.range = range;
        }
    }

    /// Directory record for this sighting. Fields the server left out stay
    /// unset so an upsert keeps whatever the directory already knows.
    pub fn to_directory_entity(&self) -> Entity {
        Entity {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            position: None,
            description: None,
            bearing: self.bearing,
            elevation: self.elevation,
            range: self.range,
        }
    }

    /// Minimal entity for an update that names an id we have not seen.
    pub fn into_entity(self) -> ProximityEntity {
        ProximityEntity {
            id: self.id,
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            bearing: self.bearing.unwrap_or_default(),
            elevation: self.elevation.unwrap_or_default(),
            range: self.range.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_entity_keeps_missing_numbers_unset() {
        let sighting = PartialProximityEntity::new("npc-1")
            .unwrap()
            .with_name("Warden")
            .with_range(4.0);
        let entity = sighting.to_directory_entity();
        assert_eq!(entity.name, "Warden");
        assert_eq!(entity.range, Some(4.0));
        assert_eq!(entity.bearing, None);
        assert_eq!(entity.elevation, None);
    }

    #[test]
    fn test_merge_only_present_fields() {
        let mut entity = ProximityEntity::new("npc-1", "Warden", "npc")
            .unwrap()
            .at(90.0, 0.0, 12.5);
        PartialProximityEntity::new("npc-1")
            .unwrap()
            .with_range(4.0)
            .merge_into(&mut entity);

        assert_eq!(entity.name, "Warden");
        assert_eq!(entity.bearing, 90.0);
        assert_eq!(entity.range, 4.0);
    }

    #[test]
    fn test_blank_name_does_not_overwrite() {
        let mut entity = ProximityEntity::new("npc-1", "Warden", "npc").unwrap();
        PartialProximityEntity::new("npc-1")
            .unwrap()
            .with_name("")
            .merge_into(&mut entity);
        assert_eq!(entity.name, "Warden");
    }

    #[test]
    fn test_into_entity_defaults_to_zero() {
        let entity = PartialProximityEntity::new("npc-2")
            .unwrap()
            .with_bearing(45.0)
            .into_entity();
        assert_eq!(entity.id.as_str(), "npc-2");
        assert_eq!(entity.name, "");
        assert_eq!(entity.bearing, 45.0);
        assert_eq!(entity.range, 0.0);
        assert_eq!(entity.display_name(), "npc-2");
    }
}
