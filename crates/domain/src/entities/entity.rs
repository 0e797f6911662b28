//! Entity - anything the server has told us exists in the world
//!
//! Entities arrive from `world_entry` snapshots and `state_update` deltas.
//! Records are frequently partial: an update may carry only a new bearing, or
//! only a name. [`Entity::fill_from`] implements the merge rule used by the
//! directory: fields blank or absent on the incoming record keep the stored
//! value, so nothing is ever cleared by omission.

use serde::Serialize;

use crate::common::{prefer_non_blank, StringExt};
use crate::value_objects::Vector3;
use crate::{DomainError, EntityId};

/// A known world entity (NPC, player, object...)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Server-defined category such as `npc`, `player`, `item`
    pub kind: String,
    pub position: Option<Vector3>,
    pub description: Option<String>,
    /// Degrees from the local player, 0 = north
    pub bearing: Option<f64>,
    pub elevation: Option<f64>,
    pub range: Option<f64>,
}

impl Entity {
    /// Create a bare entity. Fails on a blank id.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            id: EntityId::new(id)?,
            name: String::new(),
            kind: String::new(),
            position: None,
            description: None,
            bearing: None,
            elevation: None,
            range: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().into_option();
        self
    }

    pub fn with_bearing(mut self, bearing: f64, elevation: f64, range: f64) -> Self {
        self.bearing = Some(bearing);
        self.elevation = Some(elevation);
        self.range = Some(range);
        self
    }

    /// Name to show in narrative; falls back to the id when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Merge `self` (incoming) over `existing`.
    ///
    /// Blank strings and `None` on `self` are replaced by the stored value.
    pub fn fill_from(self, existing: &Entity) -> Self {
        Self {
            id: self.id,
            name: prefer_non_blank(self.name, &existing.name),
            kind: prefer_non_blank(self.kind, &existing.kind),
            position: self.position.or(existing.position),
            description: self
                .description
                .and_then(StringExt::into_option)
                .or_else(|| existing.description.clone()),
            bearing: self.bearing.or(existing.bearing),
            elevation: self.elevation.or(existing.elevation),
            range: self.range.or(existing.range),
        }
    }
}
