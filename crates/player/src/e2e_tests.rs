//! End-to-end tests: raw frames in, narrative and state out.
//!
//! These drive [`MessageRouter`] exactly as the host does, one JSON frame at
//! a time, and assert on both the produced lines and the resulting state.

use serde_json::json;

use crate::config::{ClientSettings, CombatStyle};
use crate::narrative::NarrativeLine;
use crate::router::MessageRouter;
use wyrdline_domain::Target;

fn frame(kind: &str, payload: serde_json::Value) -> String {
    json!({"type": kind, "payload": payload}).to_string()
}

fn texts(lines: &[NarrativeLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

fn warden_delta() -> String {
    frame(
        "proximity_roster_delta",
        json!({"channels": {"say": {
            "added": [{
                "id": "npc-1", "name": "Warden", "type": "npc",
                "bearing": 90, "elevation": 0, "range": 12.5
            }],
            "count": 1,
            "sample": ["Warden"]
        }}}),
    )
}

#[test]
fn test_chat_say_line() {
    let mut router = MessageRouter::default();
    let lines = router.route_frame(&frame(
        "chat",
        json!({"channel": "say", "sender": "Aria", "message": "Hello there"}),
    ));
    assert_eq!(texts(&lines), vec!["Aria says, Hello there"]);
}

#[test]
fn test_roster_delta_navigation() {
    let mut router = MessageRouter::default();
    router.route_frame(&warden_delta());

    let navigation = router.state().entities_for_navigation();
    assert_eq!(navigation.len(), 1);
    assert_eq!(navigation[0].id.as_str(), "npc-1");
    assert_eq!(navigation[0].name, "Warden");
    assert_eq!(navigation[0].range, 12.5);
}

#[test]
fn test_state_update_removal_clears_directory_and_target() {
    let mut router = MessageRouter::default();
    router.route_frame(&frame(
        "world_entry",
        json!({
            "zone": {"name": "Gatehouse"},
            "entities": [{"id": "npc-1", "name": "Warden", "type": "npc"}]
        }),
    ));
    router.route_frame(&warden_delta());

    let resolved = router.state_mut().target_by_token("Warden").unwrap();
    assert_eq!(resolved.id.as_str(), "npc-1");

    let lines = router.route_frame(&frame(
        "state_update",
        json!({"entities": {"removed": ["npc-1"]}}),
    ));
    assert_eq!(texts(&lines), vec!["Warden leaves."]);
    assert!(!router.state().directory().contains("npc-1"));
    assert_eq!(router.state().directory().target(), &Target::None);
}

#[test]
fn test_empty_delta_after_snapshot_changes_nothing() {
    let mut router = MessageRouter::default();
    router.route_frame(&frame(
        "proximity_roster",
        json!({
            "dangerState": false,
            "channels": {"say": {
                "entities": [{"id": "npc-1", "name": "Warden"}],
                "sample": ["Warden"]
            }}
        }),
    ));
    let before = router.snapshot();

    let lines = router.route_frame(&frame(
        "proximity_roster_delta",
        json!({"channels": {"say": {}}}),
    ));
    assert!(lines.is_empty());
    assert_eq!(router.snapshot(), before);
}

#[test]
fn test_malformed_frame_echoed_raw() {
    let mut router = MessageRouter::default();
    let lines = router.route_frame("{\"type\": \"chat\", ");
    assert_eq!(texts(&lines), vec!["{\"type\": \"chat\","]);
    assert!(!lines[0].is_diagnostic());
}

#[test]
fn test_unknown_kind_silent_unless_diagnostics() {
    let unknown = frame("auction_house", json!({"listings": 3}));

    let mut quiet = MessageRouter::default();
    assert!(quiet.route_frame(&unknown).is_empty());

    let mut loud = MessageRouter::new(ClientSettings::default().with_diagnostics(true));
    let lines = loud.route_frame(&unknown);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].is_diagnostic());
}

#[test]
fn test_state_update_never_resets_directory() {
    let mut router = MessageRouter::default();
    router.route_frame(&frame(
        "world_entry",
        json!({"entities": [{"id": "a", "name": "Ant"}, {"id": "b", "name": "Bee"}]}),
    ));
    router.route_frame(&frame(
        "state_update",
        json!({"entities": {"added": [{"id": "c", "name": "Cat"}]}, "zone": {"name": "Field"}}),
    ));
    assert_eq!(router.state().directory().len(), 3);
}

#[test]
fn test_in_combat_only_patch_keeps_gauges() {
    let mut router = MessageRouter::default();
    router.route_frame(&frame(
        "state_update",
        json!({"combat": {
            "atb": {"current": 40, "max": 100},
            "autoAttack": {"current": 1, "max": 3},
            "autoAttackTarget": "npc-1"
        }}),
    ));
    let lines = router.route_frame(&frame("state_update", json!({"combat": {"inCombat": true}})));

    assert_eq!(texts(&lines), vec!["You are now in combat!"]);
    let combat = router.state().combat();
    assert!(combat.in_combat);
    assert_eq!(combat.atb.map(|g| g.current), Some(40.0));
    assert_eq!(combat.auto_attack.map(|g| g.max), Some(3.0));
    assert_eq!(combat.auto_attack_target_id.as_deref(), Some("npc-1"));
}

#[test]
fn test_session_flow() {
    let mut router = MessageRouter::default();
    let lines = router.route_frame(&frame(
        "handshake_ack",
        json!({
            "compatible": true,
            "serverVersion": "2.4.1",
            "protocolVersion": "7",
            "requiresAuth": true
        }),
    ));
    assert_eq!(
        texts(&lines),
        vec!["Connected to server 2.4.1 (protocol 7).", "Authentication required."]
    );

    let lines = router.route_frame(&frame(
        "auth_success",
        json!({
            "accountId": "acct-9",
            "characters": [{"id": "pc-1", "name": "Aria", "level": 12, "location": "Harbor"}]
        }),
    ));
    assert_eq!(
        texts(&lines),
        vec!["Authenticated as acct-9.", "Characters:", "  Aria (level 12) - Harbor"]
    );
    assert!(router.state().session().authenticated);
}

#[test]
fn test_combat_exchange_with_split_effects() {
    let settings = ClientSettings::default().with_combat_style(CombatStyle::Split);
    let mut router = MessageRouter::new(settings);
    router.route_frame(&frame(
        "world_entry",
        json!({
            "character": {"id": "pc-1", "name": "Aria"},
            "entities": [{"id": "npc-1", "name": "Warden"}]
        }),
    ));

    let lines = router.route_frame(&frame(
        "event",
        json!({
            "eventType": "combat_hit",
            "attackerId": "pc-1",
            "targetId": "npc-1",
            "abilityName": "Cleave",
            "amount": 7.5,
            "penetrating": true,
            "floatText": {"text": "-7.5", "color": "#ff0000"},
            "floatTextTarget": {"text": "Bleeding", "shake": 1}
        }),
    ));

    assert_eq!(
        texts(&lines),
        vec![
            "You use Cleave on Warden for 7.5 damage. [penetrating]",
            "    -7.5",
            "    Bleeding",
        ]
    );
    let hint = lines[0].hint.as_ref().unwrap();
    assert_eq!(hint.color.as_deref(), Some("#ff0000"));
    assert!(!hint.shake);
}

#[test]
fn test_dispatch_collects_into_vec_sink() {
    let mut router = MessageRouter::default();
    let mut sink: Vec<NarrativeLine> = Vec::new();
    let delivered = router
        .dispatch_to(
            &frame("error", json!({"code": "E1", "message": "Slow down"})),
            &mut sink,
        )
        .unwrap();
    assert_eq!(delivered, 1);
    assert_eq!(sink[0].text, "Error [E1]: Slow down");
}
