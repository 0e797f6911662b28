//! Proximity Roster Cache - per-channel view of nearby entities
//!
//! The server groups nearby entities into named channels that follow sense
//! and speech ranges (`say`, `shout`, `see`...). Each channel is either
//! replaced wholesale by a roster snapshot or patched by a delta.
//!
//! # Delta application order
//!
//! `added` → `removed` → `updated`, then the metadata fields. `sample` and
//! `last_speaker` are tri-state: absent leaves them alone, explicit null
//! clears them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::Presence;
use crate::entities::{PartialProximityEntity, ProximityEntity};
use crate::EntityId;

/// Channels consulted for navigation targets, highest priority first.
pub const DEFAULT_NAVIGATION_PRIORITY: [&str; 3] = ["say", "shout", "see"];

/// One named channel of the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityChannel {
    name: String,
    count: u32,
    sample: Option<Vec<String>>,
    last_speaker: Option<String>,
    /// Keyed by id; kept in arrival order
    entities: Vec<ProximityEntity>,
}

impl ProximityChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            sample: None,
            last_speaker: None,
            entities: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server-reported population; may exceed `entities().len()`.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sample(&self) -> Option<&[String]> {
        self.sample.as_deref()
    }

    pub fn last_speaker(&self) -> Option<&str> {
        self.last_speaker.as_deref()
    }

    pub fn entities(&self) -> &[ProximityEntity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&ProximityEntity> {
        self.entities.iter().find(|e| e.id.matches(id))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn insert(&mut self, entity: ProximityEntity) {
        match self.entities.iter_mut().find(|e| e.id == entity.id) {
            Some(slot) => *slot = entity,
            None => self.entities.push(entity),
        }
    }

    fn remove(&mut self, id: &EntityId) {
        self.entities.retain(|e| &e.id != id);
    }

    fn merge(&mut self, update: PartialProximityEntity) {
        match self.entities.iter_mut().find(|e| e.id == update.id) {
            Some(existing) => update.merge_into(existing),
            None => self.entities.push(update.into_entity()),
        }
    }
}

/// Incremental change to one channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProximityChannelDelta {
    pub added: Vec<ProximityEntity>,
    pub removed: Vec<EntityId>,
    pub updated: Vec<PartialProximityEntity>,
    pub count: Option<u32>,
    pub sample: Presence<Vec<String>>,
    pub last_speaker: Presence<String>,
}

impl ProximityChannelDelta {
    /// True when applying the delta cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && self.count.is_none()
            && !self.sample.is_present()
            && !self.last_speaker.is_present()
    }
}

/// Full replacement for one channel, as carried by a roster snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProximityChannelSnapshot {
    pub entities: Vec<ProximityEntity>,
    /// Defaults to the number of entities when the server omits it
    pub count: Option<u32>,
    pub sample: Presence<Vec<String>>,
    pub last_speaker: Presence<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityRoster {
    /// Lower-cased channel name -> channel
    channels: BTreeMap<String, ProximityChannel>,
    danger_state: Option<bool>,
    #[serde(skip)]
    navigation_priority: Vec<String>,
}

impl Default for ProximityRoster {
    fn default() -> Self {
        Self::with_priority(DEFAULT_NAVIGATION_PRIORITY)
    }
}

impl ProximityRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster whose navigation order follows `priority`.
    pub fn with_priority<I, S>(priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            channels: BTreeMap::new(),
            danger_state: None,
            navigation_priority: priority
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    fn channel_mut(&mut self, name: &str) -> &mut ProximityChannel {
        self.channels
            .entry(name.trim().to_lowercase())
            .or_insert_with(|| ProximityChannel::new(name.trim()))
    }

    /// Replace one channel's entity set and metadata.
    pub fn replace_channel(&mut self, name: &str, snapshot: ProximityChannelSnapshot) {
        let channel = self.channel_mut(name);
        channel.entities.clear();
        for entity in snapshot.entities {
            channel.insert(entity);
        }
        channel.count = snapshot
            .count
            .unwrap_or_else(|| u32::try_from(channel.entities.len()).unwrap_or(u32::MAX));
        snapshot.sample.apply_to(&mut channel.sample);
        snapshot.last_speaker.apply_to(&mut channel.last_speaker);
    }

    /// Merge a delta into one channel, creating the channel if needed.
    pub fn apply_delta(&mut self, name: &str, delta: ProximityChannelDelta) {
        let channel = self.channel_mut(name);
        for entity in delta.added {
            channel.insert(entity);
        }
        for id in &delta.removed {
            channel.remove(id);
        }
        for update in delta.updated {
            channel.merge(update);
        }
        if let Some(count) = delta.count {
            channel.count = count;
        }
        delta.sample.apply_to(&mut channel.sample);
        delta.last_speaker.apply_to(&mut channel.last_speaker);
    }

    /// Overwrite the danger flag only when the server provided it.
    ///
    /// Returns `true` when the stored value changed.
    pub fn update_danger_state(&mut self, value: Presence<bool>) -> bool {
        let before = self.danger_state;
        value.apply_to(&mut self.danger_state);
        before != self.danger_state
    }

    pub fn danger_state(&self) -> Option<bool> {
        self.danger_state
    }

    /// Entities from the priority channels, best channel first, each id once.
    pub fn entities_for_navigation(&self) -> Vec<ProximityEntity> {
        let mut seen: Vec<&EntityId> = Vec::new();
        let mut result = Vec::new();
        for name in &self.navigation_priority {
            let Some(channel) = self.channels.get(name) else {
                continue;
            };
            for entity in &channel.entities {
                if !seen.contains(&&entity.id) {
                    seen.push(&entity.id);
                    result.push(entity.clone());
                }
            }
        }
        result
    }

    pub fn has_entities(&self) -> bool {
        self.channels.values().any(|c| !c.is_empty())
    }

    pub fn channel(&self, name: &str) -> Option<&ProximityChannel> {
        self.channels.get(&name.trim().to_lowercase())
    }

    pub fn channels(&self) -> impl Iterator<Item = &ProximityChannel> {
        self.channels.values()
    }

    pub fn navigation_priority(&self) -> &[String] {
        &self.navigation_priority
    }

    /// Drop every channel and the danger flag.
    pub fn clear(&mut self) {
        self.channels.clear();
        self.danger_state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc(id: &str, name: &str) -> ProximityEntity {
        ProximityEntity::new(id, name, "npc").unwrap()
    }

    fn snapshot(entities: Vec<ProximityEntity>) -> ProximityChannelSnapshot {
        ProximityChannelSnapshot {
            entities,
            ..ProximityChannelSnapshot::default()
        }
    }

    fn ids(entities: &[ProximityEntity]) -> Vec<&str> {
        entities.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_replace_then_navigation_in_priority_order() {
        let mut roster = ProximityRoster::new();
        roster.replace_channel("see", snapshot(vec![npc("c", "Crow"), npc("a", "Aria")]));
        roster.replace_channel("say", snapshot(vec![npc("a", "Aria")]));
        roster.replace_channel("shout", snapshot(vec![npc("b", "Bram")]));

        let nav = roster.entities_for_navigation();
        assert_eq!(ids(&nav), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_priority_channels_excluded_from_navigation() {
        let mut roster = ProximityRoster::new();
        roster.replace_channel("smell", snapshot(vec![npc("x", "Skunk")]));
        assert!(roster.entities_for_navigation().is_empty());
        assert!(roster.has_entities());
    }

    #[test]
    fn test_custom_priority() {
        let mut roster = ProximityRoster::with_priority(["see", "say"]);
        roster.replace_channel("say", snapshot(vec![npc("a", "Aria")]));
        roster.replace_channel("see", snapshot(vec![npc("c", "Crow")]));
        assert_eq!(ids(&roster.entities_for_navigation()), vec!["c", "a"]);
    }

    #[test]
    fn test_replace_count_defaults_to_len() {
        let mut roster = ProximityRoster::new();
        roster.replace_channel("say", snapshot(vec![npc("a", "Aria"), npc("b", "Bram")]));
        assert_eq!(roster.channel("SAY").unwrap().count(), 2);

        roster.replace_channel(
            "say",
            ProximityChannelSnapshot {
                entities: vec![npc("a", "Aria")],
                count: Some(7),
                ..ProximityChannelSnapshot::default()
            },
        );
        assert_eq!(roster.channel("say").unwrap().count(), 7);
        assert_eq!(roster.channel("say").unwrap().len(), 1);
    }

    #[test]
    fn test_delta_order_added_removed_updated() {
        let mut roster = ProximityRoster::new();
        roster.replace_channel("say", snapshot(vec![npc("a", "Aria")]));

        roster.apply_delta(
            "say",
            ProximityChannelDelta {
                added: vec![npc("b", "Bram"), npc("a", "Aria Prime")],
                removed: vec![EntityId::new("b").unwrap()],
                updated: vec![
                    PartialProximityEntity::new("a").unwrap().with_range(3.0),
                    PartialProximityEntity::new("z").unwrap().with_name("Zed"),
                ],
                ..ProximityChannelDelta::default()
            },
        );

        let channel = roster.channel("say").unwrap();
        assert_eq!(ids(channel.entities()), vec!["a", "z"]);
        assert_eq!(channel.get("a").unwrap().name, "Aria Prime");
        assert_eq!(channel.get("a").unwrap().range, 3.0);
        assert_eq!(channel.get("z").unwrap().name, "Zed");
    }

    #[test]
    fn test_delta_sample_tristate() {
        let mut roster = ProximityRoster::new();
        roster.apply_delta(
            "say",
            ProximityChannelDelta {
                sample: Presence::Value(vec!["Warden".to_string()]),
                last_speaker: Presence::Value("Warden".to_string()),
                ..ProximityChannelDelta::default()
            },
        );

        roster.apply_delta("say", ProximityChannelDelta::default());
        let channel = roster.channel("say").unwrap();
        assert_eq!(channel.sample(), Some(&["Warden".to_string()][..]));
        assert_eq!(channel.last_speaker(), Some("Warden"));

        roster.apply_delta(
            "say",
            ProximityChannelDelta {
                sample: Presence::Null,
                last_speaker: Presence::Null,
                ..ProximityChannelDelta::default()
            },
        );
        let channel = roster.channel("say").unwrap();
        assert_eq!(channel.sample(), None);
        assert_eq!(channel.last_speaker(), None);
    }

    #[test]
    fn test_empty_delta_after_snapshot_is_noop() {
        let mut roster = ProximityRoster::new();
        roster.replace_channel(
            "say",
            ProximityChannelSnapshot {
                entities: vec![npc("a", "Aria").at(90.0, 0.0, 12.5)],
                count: Some(4),
                sample: Presence::Value(vec!["Aria".to_string()]),
                last_speaker: Presence::Value("Aria".to_string()),
            },
        );
        let before = roster.clone();

        let delta = ProximityChannelDelta::default();
        assert!(delta.is_empty());
        roster.apply_delta("say", delta);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_delta_count_overwrites_only_when_present() {
        let mut roster = ProximityRoster::new();
        roster.apply_delta(
            "shout",
            ProximityChannelDelta {
                count: Some(5),
                ..ProximityChannelDelta::default()
            },
        );
        roster.apply_delta("shout", ProximityChannelDelta::default());
        assert_eq!(roster.channel("shout").unwrap().count(), 5);
    }

    #[test]
    fn test_danger_state_only_when_provided() {
        let mut roster = ProximityRoster::new();
        assert!(roster.update_danger_state(Presence::Value(true)));
        assert!(!roster.update_danger_state(Presence::Absent));
        assert_eq!(roster.danger_state(), Some(true));
        assert!(roster.update_danger_state(Presence::Null));
        assert_eq!(roster.danger_state(), None);
    }

    #[test]
    fn test_has_entities_and_clear() {
        let mut roster = ProximityRoster::new();
        assert!(!roster.has_entities());
        roster.replace_channel("see", snapshot(vec![npc("a", "Aria")]));
        assert!(roster.has_entities());
        roster.replace_channel("see", snapshot(vec![]));
        assert!(!roster.has_entities());
        roster.update_danger_state(Presence::Value(false));
        roster.clear();
        assert_eq!(roster.channels().count(), 0);
        assert_eq!(roster.danger_state(), None);
    }
}
