//! Proximity roster snapshot and delta payloads.

use std::collections::BTreeMap;

use serde::Deserialize;

use wyrdline_domain::{
    EntityId, PartialProximityEntity, Presence, ProximityChannelDelta, ProximityChannelSnapshot,
    ProximityEntity,
};

use crate::lenient;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProximityEntityRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub type_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub bearing: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub elevation: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub range: Option<f64>,
}

impl ProximityEntityRecord {
    fn kind(&self) -> Option<String> {
        self.type_name.clone().or_else(|| self.kind.clone())
    }

    /// Full entity with unknown numbers zeroed; `None` without an id.
    pub fn to_entity(&self) -> Option<ProximityEntity> {
        self.to_partial().map(PartialProximityEntity::into_entity)
    }

    /// Only the fields the server actually sent.
    pub fn to_partial(&self) -> Option<PartialProximityEntity> {
        Some(PartialProximityEntity {
            id: EntityId::new(self.id.clone()?).ok()?,
            name: self.name.clone(),
            kind: self.kind(),
            bearing: self.bearing,
            elevation: self.elevation,
            range: self.range,
        })
    }
}

/// One channel inside a `proximity_roster` snapshot.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnapshotRecord {
    #[serde(deserialize_with = "lenient::vec")]
    pub entities: Vec<ProximityEntityRecord>,
    #[serde(deserialize_with = "lenient::count")]
    pub count: Option<u32>,
    pub sample: Presence<Vec<String>>,
    pub last_speaker: Presence<String>,
}

impl ChannelSnapshotRecord {
    pub fn to_snapshot(&self) -> ProximityChannelSnapshot {
        ProximityChannelSnapshot {
            entities: self
                .entities
                .iter()
                .filter_map(ProximityEntityRecord::to_entity)
                .collect(),
            count: self.count,
            sample: self.sample.clone(),
            last_speaker: self.last_speaker.clone(),
        }
    }
}

/// `proximity_roster`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub danger_state: Presence<bool>,
    #[serde(deserialize_with = "lenient::map")]
    pub channels: BTreeMap<String, ChannelSnapshotRecord>,
}

/// One channel inside a `proximity_roster_delta`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelDeltaRecord {
    #[serde(deserialize_with = "lenient::vec")]
    pub added: Vec<ProximityEntityRecord>,
    #[serde(deserialize_with = "lenient::ids")]
    pub removed: Vec<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub updated: Vec<ProximityEntityRecord>,
    #[serde(deserialize_with = "lenient::count")]
    pub count: Option<u32>,
    pub sample: Presence<Vec<String>>,
    pub last_speaker: Presence<String>,
}

impl ChannelDeltaRecord {
    pub fn to_delta(&self) -> ProximityChannelDelta {
        ProximityChannelDelta {
            added: self
                .added
                .iter()
                .filter_map(ProximityEntityRecord::to_entity)
                .collect(),
            removed: self
                .removed
                .iter()
                .filter_map(|id| EntityId::new(id.as_str()).ok())
                .collect(),
            updated: self
                .updated
                .iter()
                .filter_map(ProximityEntityRecord::to_partial)
                .collect(),
            count: self.count,
            sample: self.sample.clone(),
            last_speaker: self.last_speaker.clone(),
        }
    }
}

/// `proximity_roster_delta`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterDelta {
    pub danger_state: Presence<bool>,
    #[serde(deserialize_with = "lenient::map")]
    pub channels: BTreeMap<String, ChannelDeltaRecord>,
}
