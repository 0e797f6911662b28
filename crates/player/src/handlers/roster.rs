//! `proximity_roster` and `proximity_roster_delta`
//!
//! Roster sightings also feed the entity directory, so an entity first seen
//! through a channel can be targeted and named before any `state_update`
//! mentions it. Leaving a channel does not remove it from the directory.

use wyrdline_domain::EntityDirectory;
use wyrdline_shared::messages::{ProximityEntityRecord, RosterDelta, RosterSnapshot};

use super::HandlerContext;
use crate::narrative::NarrativeLine;

pub(crate) fn snapshot(
    ctx: &mut HandlerContext<'_>,
    roster: RosterSnapshot,
) -> Vec<NarrativeLine> {
    let state = &mut *ctx.state;
    for (name, record) in &roster.channels {
        tracing::trace!(
            channel = %name,
            entities = record.entities.len(),
            "Replacing roster channel"
        );
        record_sightings(&mut state.directory, &record.entities);
        state.roster.replace_channel(name, record.to_snapshot());
    }
    danger_transition(ctx, roster.danger_state)
}

pub(crate) fn delta(ctx: &mut HandlerContext<'_>, roster: RosterDelta) -> Vec<NarrativeLine> {
    let state = &mut *ctx.state;
    for (name, record) in &roster.channels {
        let delta = record.to_delta();
        tracing::trace!(
            channel = %name,
            added = delta.added.len(),
            removed = delta.removed.len(),
            updated = delta.updated.len(),
            "Applying roster delta"
        );
        record_sightings(&mut state.directory, &record.added);
        state.roster.apply_delta(name, delta);
    }
    danger_transition(ctx, roster.danger_state)
}

/// Merge sightings into the directory using only the fields the server sent.
fn record_sightings(directory: &mut EntityDirectory, records: &[ProximityEntityRecord]) {
    for sighting in records.iter().filter_map(ProximityEntityRecord::to_partial) {
        directory.upsert(sighting.to_directory_entity());
    }
}

fn danger_transition(
    ctx: &mut HandlerContext<'_>,
    danger: wyrdline_domain::Presence<bool>,
) -> Vec<NarrativeLine> {
    let before = ctx.state.roster.danger_state();
    if !ctx.state.roster.update_danger_state(danger) {
        return Vec::new();
    }
    match (before, ctx.state.roster.danger_state()) {
        (_, Some(true)) => vec![NarrativeLine::new("You sense danger nearby!")],
        (Some(true), _) => vec![NarrativeLine::new("The danger has passed.")],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientSettings;
    use crate::handlers::test_support::run;
    use crate::state::ClientState;
    use serde_json::json;

    #[test]
    fn test_delta_feeds_navigation_and_directory() {
        let mut state = ClientState::default();
        let lines = run(
            &mut state,
            &ClientSettings::default(),
            json!({"channels": {"say": {
                "added": [{
                    "id": "npc-1", "name": "Warden", "type": "npc",
                    "bearing": 90, "elevation": 0, "range": 12.5
                }],
                "count": 1,
                "sample": ["Warden"]
            }}}),
            delta,
        );
        assert!(lines.is_empty());

        let navigation = state.entities_for_navigation();
        assert_eq!(navigation.len(), 1);
        assert_eq!(navigation[0].id.as_str(), "npc-1");
        assert_eq!(navigation[0].name, "Warden");
        assert_eq!(state.directory().name_of("npc-1"), Some("Warden"));
    }

    #[test]
    fn test_sighting_without_bearing_keeps_known_bearing() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(
            &mut state,
            &settings,
            json!({"entities": [
                {"id": "npc-1", "name": "Warden", "bearing": 90, "elevation": 5, "range": 12.5}
            ]}),
            crate::handlers::world::world_entry,
        );
        run(
            &mut state,
            &settings,
            json!({"channels": {"see": {"entities": [{"id": "npc-1", "name": "Warden"}]}}}),
            snapshot,
        );
        run(
            &mut state,
            &settings,
            json!({"channels": {"say": {"added": [{"id": "npc-1", "range": 3}]}}}),
            delta,
        );

        let warden = state.directory().get("npc-1").unwrap();
        assert_eq!(warden.bearing, Some(90.0));
        assert_eq!(warden.elevation, Some(5.0));
        assert_eq!(warden.range, Some(3.0));
        assert_eq!(warden.name, "Warden");
    }

    #[test]
    fn test_snapshot_replaces_listed_channels_only() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(
            &mut state,
            &settings,
            json!({"channels": {
                "say": {"entities": [{"id": "a", "name": "Ant"}]},
                "see": {"entities": [{"id": "b", "name": "Bee"}]}
            }}),
            snapshot,
        );
        run(
            &mut state,
            &settings,
            json!({"channels": {"say": {"entities": [{"id": "c", "name": "Cat"}], "count": 4}}}),
            snapshot,
        );

        let say = state.roster().channel("say").unwrap();
        assert_eq!(say.len(), 1);
        assert_eq!(say.count(), 4);
        assert_eq!(state.roster().channel("see").unwrap().len(), 1);
    }

    #[test]
    fn test_removed_from_channel_stays_in_directory() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(
            &mut state,
            &settings,
            json!({"channels": {"say": {"added": [{"id": "npc-1", "name": "Warden"}]}}}),
            delta,
        );
        run(
            &mut state,
            &settings,
            json!({"channels": {"say": {"removed": ["npc-1"]}}}),
            delta,
        );
        assert!(state.entities_for_navigation().is_empty());
        assert!(state.directory().contains("npc-1"));
    }

    #[test]
    fn test_danger_transitions() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();

        let lines = run(&mut state, &settings, json!({"dangerState": true}), delta);
        assert_eq!(lines, vec!["You sense danger nearby!"]);

        let repeated = run(&mut state, &settings, json!({"dangerState": true}), delta);
        assert!(repeated.is_empty());

        let untouched = run(&mut state, &settings, json!({"channels": {}}), delta);
        assert!(untouched.is_empty());
        assert_eq!(state.roster().danger_state(), Some(true));

        let lines = run(&mut state, &settings, json!({"dangerState": false}), snapshot);
        assert_eq!(lines, vec!["The danger has passed."]);

        run(&mut state, &settings, json!({"dangerState": null}), snapshot);
        assert_eq!(state.roster().danger_state(), None);
    }
}
