//! `handshake_ack`, `auth_success`, `auth_error`

use wyrdline_shared::messages::{AuthError, AuthSuccess, HandshakeAck};

use super::HandlerContext;
use crate::narrative::NarrativeLine;
use crate::state::CharacterChoice;

pub(crate) fn handshake_ack(ctx: &mut HandlerContext<'_>, ack: HandshakeAck) -> Vec<NarrativeLine> {
    let session = &mut ctx.state.session;
    session.handshake_received = true;
    session.compatible = ack.is_compatible();
    session.server_version.clone_from(&ack.server_version);
    session.protocol_version.clone_from(&ack.protocol_version);
    session.requires_auth = ack.requires_auth.unwrap_or(false);

    let version = ack.server_version.as_deref().unwrap_or("unknown version");
    let mut lines = Vec::new();

    if session.compatible {
        let protocol = ack
            .protocol_version
            .as_deref()
            .map(|p| format!(" (protocol {})", p))
            .unwrap_or_default();
        lines.push(NarrativeLine::new(format!(
            "Connected to server {}{}.",
            version, protocol
        )));
        if session.requires_auth {
            lines.push(NarrativeLine::new("Authentication required."));
        }
    } else {
        tracing::warn!(server_version = %version, "Server reports incompatible client");
        lines.push(NarrativeLine::new(format!(
            "Server {} is not compatible with this client.",
            version
        )));
        if let Some(message) = ack.message {
            lines.push(NarrativeLine::new(message));
        }
    }
    lines
}

pub(crate) fn auth_success(ctx: &mut HandlerContext<'_>, auth: AuthSuccess) -> Vec<NarrativeLine> {
    let session = &mut ctx.state.session;
    session.authenticated = true;
    session.last_auth_error = None;
    session.account_id.clone_from(&auth.account_id);
    session.characters = auth
        .characters
        .into_iter()
        .map(|c| CharacterChoice {
            name: c
                .name
                .or_else(|| c.id.clone())
                .unwrap_or_else(|| "Unnamed".to_string()),
            id: c.id,
            level: c.level,
            location: c.location,
        })
        .collect();

    let mut lines = vec![NarrativeLine::new(match &session.account_id {
        Some(account) => format!("Authenticated as {}.", account),
        None => "Authenticated.".to_string(),
    })];

    if session.characters.is_empty() {
        lines.push(NarrativeLine::new("No characters on this account."));
    } else {
        lines.push(NarrativeLine::new("Characters:"));
        for character in &session.characters {
            let mut entry = format!("  {}", character.name);
            if let Some(level) = character.level {
                entry.push_str(&format!(" (level {})", level));
            }
            if let Some(location) = &character.location {
                entry.push_str(&format!(" - {}", location));
            }
            lines.push(NarrativeLine::new(entry));
        }
    }
    lines
}

pub(crate) fn auth_error(ctx: &mut HandlerContext<'_>, error: AuthError) -> Vec<NarrativeLine> {
    let detail = error
        .message
        .or(error.reason)
        .unwrap_or_else(|| "unknown error".to_string());
    tracing::warn!(%detail, "Authentication failed");

    let session = &mut ctx.state.session;
    session.authenticated = false;
    session.last_auth_error = Some(detail.clone());

    vec![NarrativeLine::new(format!("Authentication failed: {}", detail))]
}
