//! `world_entry` (full snapshot) and `state_update` (incremental)

use wyrdline_domain::{Entity, MovementPatch};
use wyrdline_shared::messages::{StateUpdate, WorldEntry};

use super::HandlerContext;
use crate::narrative::{join_names, word_wrap, NarrativeLine};

pub(crate) fn world_entry(ctx: &mut HandlerContext<'_>, entry: WorldEntry) -> Vec<NarrativeLine> {
    let state = &mut *ctx.state;
    let mut lines = Vec::new();

    let entities: Vec<Entity> = entry
        .entities
        .iter()
        .filter_map(|record| record.to_entity())
        .collect();
    tracing::debug!(count = entities.len(), "Resetting entity directory");
    state.directory.reset(entities);
    if let Some(target) = state.combat.auto_attack_target_id.clone() {
        if !state.directory.contains(&target) {
            state.combat.forget_target(&target);
        }
    }

    let mut movement = MovementPatch::default();
    if let Some(character) = &entry.character {
        state.player.apply(character.to_patch());
        if let Some(text_movement) = &character.text_movement {
            movement = text_movement.to_patch();
        }
    }
    if movement.available_directions.is_none() {
        movement.available_directions = Some(entry.exit_directions());
    }
    state.movement.apply(movement);

    if let Some(zone) = entry.zone.as_ref().and_then(|z| z.to_zone()) {
        state.player.enter_zone(zone);
    }
    if let Some(zone) = state.player.zone() {
        if !zone.name.trim().is_empty() {
            lines.push(NarrativeLine::new(format!("== {} ==", zone.name.trim())));
        }
        if let Some(description) = &zone.description {
            lines.extend(
                word_wrap(description, ctx.settings.wrap_width)
                    .into_iter()
                    .map(NarrativeLine::new),
            );
        }
        if let Some(rating) = &zone.content_rating {
            lines.push(NarrativeLine::new(format!("Content rating: {}", rating)));
        }
    }

    let exits = &state.movement.available_directions;
    lines.push(NarrativeLine::new(if exits.is_empty() {
        "There are no obvious exits.".to_string()
    } else {
        format!("Exits: {}.", exits.join(", "))
    }));

    let nearby: Vec<&str> = state
        .directory
        .iter()
        .filter(|entity| !state.player.is_local(entity.id.as_str()))
        .map(Entity::display_name)
        .collect();
    if !nearby.is_empty() {
        lines.push(NarrativeLine::new(format!("You see {}.", join_names(&nearby))));
    }

    lines
}

pub(crate) fn state_update(
    ctx: &mut HandlerContext<'_>,
    update: StateUpdate,
) -> Vec<NarrativeLine> {
    let state = &mut *ctx.state;
    let mut lines = Vec::new();

    if let Some(character) = &update.character {
        state.player.apply(character.to_patch());
    }

    if let Some(changes) = &update.entities {
        for entity in changes.added.iter().filter_map(|r| r.to_entity()) {
            let is_local = state.player.is_local(entity.id.as_str());
            let name = entity.display_name().to_string();
            if state.directory.upsert(entity) && !is_local {
                lines.push(NarrativeLine::new(format!("{} arrives.", name)));
            }
        }
        for entity in changes.updated.iter().filter_map(|r| r.to_entity()) {
            state.directory.upsert(entity);
        }
        for id in &changes.removed {
            state.combat.forget_target(id);
            if let Some(removed) = state.directory.remove(id) {
                if !state.player.is_local(removed.id.as_str()) {
                    lines.push(NarrativeLine::new(format!("{} leaves.", removed.display_name())));
                }
            }
        }
    }

    if let Some(zone) = update.zone.as_ref().and_then(|z| z.to_zone()) {
        if state.player.enter_zone(zone) {
            if let Some(zone) = state.player.zone() {
                lines.push(NarrativeLine::new(format!("You are now in {}.", zone.name.trim())));
                if let Some(rating) = &zone.content_rating {
                    lines.push(NarrativeLine::new(format!("Content rating: {}", rating)));
                }
            }
        }
    }

    for ally in &update.allies {
        if let Some(id) = ally.ally_id() {
            state.party.update_ally(id, ally.to_status());
        }
    }

    if let Some(combat) = &update.combat {
        if state.combat.apply(combat.to_patch()) {
            lines.push(NarrativeLine::new(if state.combat.in_combat {
                "You are now in combat!"
            } else {
                "You are no longer in combat."
            }));
        }
    }

    if let Some(movement) = update.movement() {
        state.movement.apply(movement.to_patch());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientSettings;
    use crate::handlers::test_support::run;
    use crate::state::ClientState;
    use serde_json::json;

    #[test]
    fn test_world_entry_lines_and_state() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default().with_wrap_width(40);
        let lines = run(
            &mut state,
            &settings,
            json!({
                "character": {"id": "pc-1", "name": "Aria", "health": {"current": 9, "max": 10}},
                "zone": {
                    "name": "Harbor",
                    "description": "Salt spray drifts over the stone quay where fishing boats knock against their moorings.",
                    "contentRating": "T"
                },
                "exits": [{"direction": "north"}, {"direction": "east"}],
                "entities": [
                    {"id": "pc-1", "name": "Aria", "type": "player"},
                    {"id": "npc-1", "name": "Warden", "type": "npc"},
                    {"name": "nameless"}
                ]
            }),
            world_entry,
        );

        assert_eq!(lines[0], "== Harbor ==");
        assert!(lines.iter().any(|l| l == "Content rating: Teen"));
        assert!(lines.iter().any(|l| l == "Exits: north, east."));
        assert_eq!(lines.last().unwrap(), "You see Warden.");
        for line in &lines {
            assert!(line.chars().count() <= 40);
        }
        assert_eq!(state.directory().len(), 2);
        assert_eq!(state.player().name(), Some("Aria"));
        assert_eq!(state.movement().available_directions, vec!["north", "east"]);
    }

    #[test]
    fn test_world_entry_resets_directory() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(&mut state, &settings, json!({"entities": [{"id": "a"}, {"id": "b"}]}), world_entry);
        run(&mut state, &settings, json!({"entities": [{"id": "c"}]}), world_entry);
        assert_eq!(state.directory().len(), 1);
        assert!(state.directory().contains("c"));
    }

    #[test]
    fn test_character_directions_win_over_exits() {
        let mut state = ClientState::default();
        run(
            &mut state,
            &ClientSettings::default(),
            json!({
                "character": {"textMovement": {
                    "availableDirections": ["up"],
                    "currentHeading": 90
                }},
                "exits": [{"direction": "north"}]
            }),
            world_entry,
        );
        assert_eq!(state.movement().available_directions, vec!["up"]);
        assert_eq!(state.movement().heading, Some(90.0));
    }

    #[test]
    fn test_state_update_never_resets() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(&mut state, &settings, json!({"entities": [{"id": "a", "name": "Ant"}]}), world_entry);
        let lines = run(
            &mut state,
            &settings,
            json!({"entities": {"added": [{"id": "b", "name": "Bee"}], "updated": [{"id": "a"}]}}),
            state_update,
        );
        assert_eq!(lines, vec!["Bee arrives."]);
        assert_eq!(state.directory().len(), 2);
        assert_eq!(state.directory().name_of("a"), Some("Ant"));
    }

    #[test]
    fn test_state_update_removal_and_target() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(
            &mut state,
            &settings,
            json!({"entities": [{"id": "npc-1", "name": "Warden"}]}),
            world_entry,
        );
        state.target_by_token("npc-1");

        let lines = run(
            &mut state,
            &settings,
            json!({"entities": {"removed": ["npc-1"]}}),
            state_update,
        );
        assert_eq!(lines, vec!["Warden leaves."]);
        assert!(!state.directory().contains("npc-1"));
        assert_eq!(state.directory().target(), &wyrdline_domain::Target::None);
    }

    #[test]
    fn test_combat_patch_only_provided_fields() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        run(
            &mut state,
            &settings,
            json!({"combat": {"atb": {"current": 50, "max": 100}, "autoAttackTarget": "npc-1"}}),
            state_update,
        );
        let lines = run(&mut state, &settings, json!({"combat": {"inCombat": true}}), state_update);

        assert_eq!(lines, vec!["You are now in combat!"]);
        assert!(state.combat().in_combat);
        assert_eq!(state.combat().atb.map(|g| g.current), Some(50.0));
        assert_eq!(state.combat().auto_attack_target_id.as_deref(), Some("npc-1"));

        let lines = run(
            &mut state,
            &settings,
            json!({"combat": {"inCombat": false}}),
            state_update,
        );
        assert_eq!(lines, vec!["You are no longer in combat."]);
    }

    #[test]
    fn test_zone_change_and_movement() {
        let mut state = ClientState::default();
        let settings = ClientSettings::default();
        let lines = run(
            &mut state,
            &settings,
            json!({
                "zone": {"name": "Deep Woods", "contentRating": "XX"},
                "textMovement": {"currentSpeed": "walk", "currentHeading": null}
            }),
            state_update,
        );
        assert_eq!(lines, vec!["You are now in Deep Woods.", "Content rating: XX [Unknown]"]);
        assert_eq!(state.movement().speed.as_deref(), Some("walk"));
        assert_eq!(state.movement().heading, None);
    }

    #[test]
    fn test_allies_patch_party() {
        let mut state = ClientState::default();
        state.party.add(wyrdline_domain::PartyMember::new(
            wyrdline_domain::EntityId::new("p-2").unwrap(),
            "Bram",
        ));
        run(
            &mut state,
            &ClientSettings::default(),
            json!({"allies": [{"entityId": "p-2", "manaPct": 0.25}, {"entityId": "stranger"}]}),
            state_update,
        );
        assert_eq!(state.party().get("p-2").unwrap().mana_pct, Some(0.25));
        assert_eq!(state.party().len(), 1);
    }
}
