//! World snapshot and incremental state payloads.

use serde::Deserialize;

use wyrdline_domain::{
    AllyStatus, CombatPatch, ContentRating, Entity, EntityId, Gauge, MovementPatch, PlayerPatch,
    Presence, Vector3, Vitals, ZoneState,
};

use crate::lenient;

/// An entity as sent in `world_entry.entities` and `state_update.entities`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EntityRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Servers send the category as `type`; some builds use `kind`
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub type_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub position: Option<Vector3>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub bearing: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub elevation: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub range: Option<f64>,
}

impl EntityRecord {
    /// Domain entity for this record; `None` when the record has no id.
    pub fn to_entity(&self) -> Option<Entity> {
        let mut entity = Entity::new(self.id.clone()?).ok()?;
        entity.name = self.name.clone().unwrap_or_default();
        entity.kind = self
            .type_name
            .clone()
            .or_else(|| self.kind.clone())
            .unwrap_or_default();
        entity.position = self.position;
        entity.description = self.description.clone();
        entity.bearing = self.bearing;
        entity.elevation = self.elevation;
        entity.range = self.range;
        Some(entity)
    }
}

/// `zone` block of `world_entry` and `state_update`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub content_rating: Option<String>,
}

impl ZoneInfo {
    /// `None` when the block names no zone at all.
    pub fn to_zone(&self) -> Option<ZoneState> {
        if self.id.is_none() && self.name.is_none() {
            return None;
        }
        Some(ZoneState {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            content_rating: self.content_rating.as_deref().map(ContentRating::from_code),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ExitInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub direction: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

/// `textMovement` block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextMovement {
    pub current_heading: Presence<f64>,
    pub current_speed: Presence<String>,
    #[serde(deserialize_with = "lenient::option_vec")]
    pub available_directions: Option<Vec<String>>,
}

impl TextMovement {
    pub fn to_patch(&self) -> MovementPatch {
        MovementPatch {
            heading: self.current_heading.clone(),
            speed: self.current_speed.clone(),
            available_directions: self.available_directions.clone(),
        }
    }
}

/// The local character record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub level: Option<u32>,
    #[serde(deserialize_with = "lenient::option")]
    pub position: Option<Vector3>,
    #[serde(deserialize_with = "lenient::option")]
    pub health: Option<Gauge>,
    #[serde(deserialize_with = "lenient::option")]
    pub stamina: Option<Gauge>,
    #[serde(deserialize_with = "lenient::option")]
    pub mana: Option<Gauge>,
    #[serde(deserialize_with = "lenient::option")]
    pub text_movement: Option<TextMovement>,
}

impl CharacterRecord {
    pub fn to_patch(&self) -> PlayerPatch {
        PlayerPatch {
            id: self.id.clone().and_then(|id| EntityId::new(id).ok()),
            name: self.name.clone(),
            level: self.level,
            position: self.position,
            vitals: Vitals {
                health: self.health,
                stamina: self.stamina,
                mana: self.mana,
            },
        }
    }
}

/// `world_entry`: full snapshot on entering a zone.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WorldEntry {
    #[serde(deserialize_with = "lenient::option")]
    pub character: Option<CharacterRecord>,
    #[serde(deserialize_with = "lenient::option")]
    pub zone: Option<ZoneInfo>,
    #[serde(deserialize_with = "lenient::vec")]
    pub exits: Vec<ExitInfo>,
    #[serde(deserialize_with = "lenient::vec")]
    pub entities: Vec<EntityRecord>,
}

impl WorldEntry {
    pub fn exit_directions(&self) -> Vec<String> {
        self.exits
            .iter()
            .filter_map(|exit| exit.direction.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EntityChanges {
    #[serde(deserialize_with = "lenient::vec")]
    pub added: Vec<EntityRecord>,
    #[serde(deserialize_with = "lenient::vec")]
    pub updated: Vec<EntityRecord>,
    #[serde(deserialize_with = "lenient::ids")]
    pub removed: Vec<String>,
}

/// Per-ally status inside `state_update.allies`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AllyRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub entity_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub atb: Option<Gauge>,
    #[serde(deserialize_with = "lenient::number")]
    pub stamina_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub mana_pct: Option<f64>,
}

impl AllyRecord {
    pub fn ally_id(&self) -> Option<&str> {
        self.entity_id.as_deref().or(self.id.as_deref())
    }

    pub fn to_status(&self) -> AllyStatus {
        AllyStatus {
            atb: self.atb,
            stamina_pct: self.stamina_pct,
            mana_pct: self.mana_pct,
        }
    }
}

/// `combat` block of `state_update`. Every field is tri-state.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatRecord {
    pub atb: Presence<Gauge>,
    pub auto_attack: Presence<Gauge>,
    pub in_combat: Presence<bool>,
    pub auto_attack_target: Presence<String>,
    pub auto_attack_target_id: Presence<String>,
}

impl CombatRecord {
    pub fn to_patch(&self) -> CombatPatch {
        let target = if self.auto_attack_target.is_present() {
            self.auto_attack_target.clone()
        } else {
            self.auto_attack_target_id.clone()
        };
        CombatPatch {
            atb: self.atb.clone(),
            auto_attack: self.auto_attack.clone(),
            in_combat: self.in_combat.clone(),
            auto_attack_target: target,
        }
    }
}

/// `state_update`: incremental changes since the last message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateUpdate {
    #[serde(deserialize_with = "lenient::option")]
    pub entities: Option<EntityChanges>,
    #[serde(deserialize_with = "lenient::option")]
    pub zone: Option<ZoneInfo>,
    #[serde(deserialize_with = "lenient::option")]
    pub character: Option<CharacterRecord>,
    #[serde(deserialize_with = "lenient::vec")]
    pub allies: Vec<AllyRecord>,
    #[serde(deserialize_with = "lenient::option")]
    pub combat: Option<CombatRecord>,
    #[serde(deserialize_with = "lenient::option")]
    pub text_movement: Option<TextMovement>,
}

impl StateUpdate {
    /// Top-level `textMovement` wins over the one nested in `character`.
    pub fn movement(&self) -> Option<&TextMovement> {
        self.text_movement.as_ref().or_else(|| {
            self.character
                .as_ref()
                .and_then(|c| c.text_movement.as_ref())
        })
    }
}
