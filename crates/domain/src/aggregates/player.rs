//! PlayerState aggregate - the locally controlled character
//!
//! Built from `world_entry.character` and patched by
//! `state_update.character`. Like entities, the player record is only ever
//! filled in: a field missing from an update keeps its stored value.

use serde::Serialize;

use crate::common::StringExt;
use crate::value_objects::{Vector3, Vitals, ZoneState};
use crate::EntityId;

/// Fields a character record may carry; all optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerPatch {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub level: Option<u32>,
    pub position: Option<Vector3>,
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    id: Option<EntityId>,
    name: Option<String>,
    level: Option<u32>,
    position: Option<Vector3>,
    zone: Option<ZoneState>,
    vitals: Vitals,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a character record over the stored state.
    pub fn apply(&mut self, patch: PlayerPatch) {
        if patch.id.is_some() {
            self.id = patch.id;
        }
        if let Some(name) = patch.name.and_then(StringExt::into_option) {
            self.name = Some(name);
        }
        if patch.level.is_some() {
            self.level = patch.level;
        }
        if patch.position.is_some() {
            self.position = patch.position;
        }
        self.vitals.merge(patch.vitals);
    }

    /// Move to `zone`, filling unknown fields from the current zone when it
    /// is the same place.
    ///
    /// Returns `true` when the player ended up in a different zone.
    pub fn enter_zone(&mut self, zone: ZoneState) -> bool {
        match self.zone.take() {
            Some(current) if !zone.differs_from(&current) => {
                self.zone = Some(zone.fill_from(&current));
                false
            }
            _ => {
                self.zone = Some(zone);
                true
            }
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    /// Whether `id` refers to the local character.
    pub fn is_local(&self, id: &str) -> bool {
        self.id.as_ref().is_some_and(|own| own.matches(id))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn level(&self) -> Option<u32> {
        self.level
    }

    pub fn position(&self) -> Option<Vector3> {
        self.position
    }

    pub fn zone(&self) -> Option<&ZoneState> {
        self.zone.as_ref()
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}
