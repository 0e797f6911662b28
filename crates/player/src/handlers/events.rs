//! `event` messages: combat, party, and free-form narrative
//!
//! Combat and party events are recognized by their `eventType` prefix.
//! Both carry an optional `narrative` that replaces the generated sentence.
//! Combat lines keep their style decorations and hint around it.

use wyrdline_domain::{EntityId, PartyInvite, PartyMember};
use wyrdline_shared::messages::GameEvent;

use super::HandlerContext;
use crate::combat::Actors;
use crate::narrative::NarrativeLine;
use crate::state::ClientState;

pub(crate) fn event(ctx: &mut HandlerContext<'_>, event: GameEvent) -> Vec<NarrativeLine> {
    let event_type = event.event_type();
    tracing::debug!(%event_type, "Handling event");

    if event.is_combat() {
        combat_event(ctx, &event_type, &event)
    } else if event.is_party() {
        party_event(ctx, &event_type, &event)
    } else {
        narrative_or_diagnostic(ctx, &event_type, &event)
    }
}

fn narrative_text(event: &GameEvent) -> Option<&str> {
    event
        .narrative
        .as_deref()
        .or(event.message.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn narrative_or_diagnostic(
    ctx: &HandlerContext<'_>,
    event_type: &str,
    event: &GameEvent,
) -> Vec<NarrativeLine> {
    match narrative_text(event) {
        Some(text) => vec![NarrativeLine::new(text)],
        None => ctx
            .gated_diagnostic(format!("Unhandled event type '{}'", event_type))
            .into_iter()
            .collect(),
    }
}

// =============================================================================
// Combat
// =============================================================================

fn combat_event(
    ctx: &mut HandlerContext<'_>,
    event_type: &str,
    event: &GameEvent,
) -> Vec<NarrativeLine> {
    let actors = Actors {
        attacker: ctx
            .state
            .actor(event.attacker_id.as_deref(), event.attacker_name.as_deref()),
        target: ctx
            .state
            .actor(event.target_id.as_deref(), event.target_name.as_deref()),
    };

    match event_type {
        "combat_start" => {
            ctx.state.combat.set_in_combat(true);
            let text = narrative_text(event).map(str::to_string).unwrap_or_else(|| {
                let opponent = [&actors.target, &actors.attacker]
                    .into_iter()
                    .flatten()
                    .find(|actor| !actor.is_local);
                match opponent {
                    Some(opponent) => format!("Combat begins with {}!", opponent.name),
                    None => "Combat begins!".to_string(),
                }
            });
            vec![NarrativeLine::new(text)]
        }
        "combat_end" => {
            ctx.state.combat.set_in_combat(false);
            vec![NarrativeLine::new(
                narrative_text(event).unwrap_or("Combat ends."),
            )]
        }
        "combat_death" => {
            if let Some(victim) = event.target_id.as_deref() {
                ctx.state.combat.forget_target(victim);
            }
            if actors.attacker.is_none() && actors.target.is_none() {
                return narrative_or_diagnostic(ctx, event_type, event);
            }
            ctx.formatter.format_death(event, &actors)
        }
        _ => {
            if actors.attacker.is_none() && actors.target.is_none() {
                return narrative_or_diagnostic(ctx, event_type, event);
            }
            ctx.formatter.format_exchange(event, &actors)
        }
    }
}

// =============================================================================
// Party
// =============================================================================

fn party_event(
    ctx: &mut HandlerContext<'_>,
    event_type: &str,
    event: &GameEvent,
) -> Vec<NarrativeLine> {
    let state = &mut *ctx.state;

    let generated = match event_type {
        "party_invite" => {
            let from_name = member_name(
                state,
                event.inviter_id.as_deref(),
                event.inviter_name.as_deref(),
            );
            let text = format!("{} invites you to join their party.", from_name);
            state.party.set_pending_invite(PartyInvite {
                from_id: event.inviter_id.clone(),
                from_name,
            });
            Some(text)
        }
        "party_joined" => {
            let members: Vec<PartyMember> =
                event.members.iter().filter_map(|m| m.to_member()).collect();
            if !members.is_empty() {
                state.party.replace(members);
            }
            state.party.take_pending_invite();
            Some("You join the party.".to_string())
        }
        "party_member_joined" => {
            let name = member_name(state, event.member_id.as_deref(), event.member_name.as_deref());
            let local = state.is_local(event.member_id.as_deref(), event.member_name.as_deref());
            if let Some(id) = event.member_id.as_deref().and_then(|id| EntityId::new(id).ok()) {
                state.party.add(PartyMember::new(id, name.clone()));
            }
            Some(if local {
                "You join the party.".to_string()
            } else {
                format!("{} joins the party.", name)
            })
        }
        "party_left" => {
            state.party.disband();
            Some("You leave the party.".to_string())
        }
        "party_member_left" => {
            let name = member_name(state, event.member_id.as_deref(), event.member_name.as_deref());
            if state.is_local(event.member_id.as_deref(), event.member_name.as_deref()) {
                state.party.disband();
                Some("You leave the party.".to_string())
            } else {
                if let Some(id) = event.member_id.as_deref() {
                    state.party.remove(id);
                }
                Some(format!("{} leaves the party.", name))
            }
        }
        "party_disbanded" => {
            state.party.disband();
            Some("The party has been disbanded.".to_string())
        }
        "party_leader_changed" => {
            if let Some(id) = event.leader_id.as_deref() {
                state.party.set_leader(id);
            }
            if state.is_local(event.leader_id.as_deref(), event.leader_name.as_deref()) {
                Some("You are now the party leader.".to_string())
            } else {
                let name = member_name(
                    state,
                    event.leader_id.as_deref(),
                    event.leader_name.as_deref(),
                );
                Some(format!("{} is now the party leader.", name))
            }
        }
        _ => None,
    };

    match (narrative_text(event), generated) {
        (Some(text), _) => vec![NarrativeLine::new(text)],
        (None, Some(text)) => vec![NarrativeLine::new(text)],
        (None, None) => narrative_or_diagnostic(ctx, event_type, event),
    }
}

/// Name for a party participant: payload name, then the roster, then the
/// entity directory, then the raw id.
fn member_name(state: &ClientState, id: Option<&str>, name: Option<&str>) -> String {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    name.map(str::to_string)
        .or_else(|| {
            id.and_then(|id| state.party.get(id))
                .map(|m| m.display_name().to_string())
        })
        .or_else(|| state.display_name(id, None))
        .unwrap_or_else(|| "Someone".to_string())
}
