//! `communication`/`chat`, `error`, `command_response`

use wyrdline_domain::PartyMember;
use wyrdline_shared::messages::{CommandResponse, Communication, ServerError};

use super::HandlerContext;
use crate::narrative::{join_names, phrase_speech, NarrativeLine};

pub(crate) fn communication(
    ctx: &mut HandlerContext<'_>,
    message: Communication,
) -> Vec<NarrativeLine> {
    let Some(text) = message.text() else {
        return vec![NarrativeLine::diagnostic(
            "Received a chat message with no text.",
        )];
    };
    let channel = message.channel();
    let sender_id = message.sender_id.as_deref();

    let sender = if ctx.state.is_local(sender_id, message.sender()) {
        None
    } else {
        Some(
            ctx.state
                .display_name(sender_id, message.sender())
                .unwrap_or_else(|| "Someone".to_string()),
        )
    };

    vec![NarrativeLine::new(phrase_speech(
        &channel,
        sender.as_deref(),
        message.target.as_deref(),
        text,
    ))]
}

pub(crate) fn server_error(
    _ctx: &mut HandlerContext<'_>,
    error: ServerError,
) -> Vec<NarrativeLine> {
    let message = error.message.as_deref().unwrap_or("unknown error");
    tracing::warn!(code = ?error.code, %message, "Server reported an error");

    let text = match &error.code {
        Some(code) => format!("Error [{}]: {}", code, message),
        None => format!("Error: {}", message),
    };
    vec![NarrativeLine::new(text)]
}

pub(crate) fn command_response(
    ctx: &mut HandlerContext<'_>,
    response: CommandResponse,
) -> Vec<NarrativeLine> {
    let mut lines = Vec::new();

    match (response.succeeded(), response.message.as_deref()) {
        (true, Some(message)) => lines.push(NarrativeLine::new(message)),
        (true, None) => {}
        (false, Some(message)) => {
            lines.push(NarrativeLine::new(format!("Command failed: {}", message)))
        }
        (false, None) => lines.push(NarrativeLine::new(match &response.command {
            Some(command) => format!("Command '{}' failed.", command),
            None => "Command failed.".to_string(),
        })),
    }

    if let Some(records) = response.members() {
        let members: Vec<PartyMember> = records.iter().filter_map(|r| r.to_member()).collect();
        ctx.state.party.replace(members);

        let party = ctx.state.party.members();
        if party.is_empty() {
            lines.push(NarrativeLine::new("You are not in a party."));
        } else {
            let names: Vec<String> = party
                .iter()
                .map(|m| {
                    if m.leader {
                        format!("{} (leader)", m.display_name())
                    } else {
                        m.display_name().to_string()
                    }
                })
                .collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            lines.push(NarrativeLine::new(format!("Party members: {}.", join_names(&names))));
        }
    }

    lines
}
