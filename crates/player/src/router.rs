//! Message router
//!
//! The single entry point for server frames. A frame is parsed into an
//! [`IncomingMessage`], its payload decoded for its kind, and the matching
//! handler applies the state mutations and produces the narrative lines.
//!
//! Mutations happen before `route` returns; the returned lines are already
//! complete and ordered. Nothing here fails: malformed frames, empty or
//! mis-shaped payloads and unknown kinds all degrade to diagnostic output.

use wyrdline_shared::{parse_envelope, IncomingMessage, PayloadError, ServerMessage};

use crate::combat::CombatFormatter;
use crate::config::ClientSettings;
use crate::handlers::{chat, events, roster, session, world, HandlerContext};
use crate::narrative::NarrativeLine;
use crate::ports::NarrativeSink;
use crate::state::{ClientSnapshot, ClientState};

pub struct MessageRouter {
    settings: ClientSettings,
    formatter: CombatFormatter,
    state: ClientState,
}

impl MessageRouter {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            formatter: CombatFormatter::from_settings(&settings),
            state: ClientState::new(&settings),
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Mutable access for host-side actions such as targeting.
    pub fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }

    pub fn snapshot(&self) -> ClientSnapshot {
        self.state.snapshot()
    }

    /// Route one already-parsed message.
    pub fn route(&mut self, message: &IncomingMessage) -> Vec<NarrativeLine> {
        let kind = message.kind();
        tracing::debug!(kind, sequence = ?message.sequence(), "Routing message");

        let decoded = match ServerMessage::decode(message) {
            Ok(decoded) => decoded,
            Err(PayloadError::Empty { kind }) => {
                return vec![NarrativeLine::diagnostic(format!(
                    "Received '{}' with an empty payload.",
                    kind
                ))];
            }
            Err(err @ PayloadError::Misshaped { .. }) => {
                tracing::warn!(kind, error = %err, "Ignoring mis-shaped payload");
                return vec![NarrativeLine::diagnostic(format!("Ignored {}.", err))];
            }
        };

        let mut ctx = HandlerContext {
            state: &mut self.state,
            settings: &self.settings,
            formatter: &self.formatter,
        };

        match decoded {
            ServerMessage::HandshakeAck(ack) => session::handshake_ack(&mut ctx, ack),
            ServerMessage::AuthSuccess(auth) => session::auth_success(&mut ctx, auth),
            ServerMessage::AuthError(error) => session::auth_error(&mut ctx, error),
            ServerMessage::WorldEntry(entry) => world::world_entry(&mut ctx, *entry),
            ServerMessage::StateUpdate(update) => world::state_update(&mut ctx, *update),
            ServerMessage::Event(event) => events::event(&mut ctx, *event),
            ServerMessage::Error(error) => chat::server_error(&mut ctx, error),
            ServerMessage::Communication(message) => chat::communication(&mut ctx, message),
            ServerMessage::CommandResponse(response) => {
                chat::command_response(&mut ctx, response)
            }
            ServerMessage::ProximityRoster(snapshot) => roster::snapshot(&mut ctx, snapshot),
            ServerMessage::ProximityRosterDelta(delta) => roster::delta(&mut ctx, delta),
            ServerMessage::Unknown { kind } => ctx
                .gated_diagnostic(format!("Unhandled message type '{}'.", kind))
                .into_iter()
                .collect(),
        }
    }

    /// Parse and route one raw frame. Unparseable frames are shown as-is.
    pub fn route_frame(&mut self, frame: &str) -> Vec<NarrativeLine> {
        match parse_envelope(frame) {
            Ok(message) => self.route(&message),
            Err(err) => {
                tracing::warn!(error = %err, "Frame is not a message envelope, showing raw text");
                let raw = frame.trim();
                if raw.is_empty() {
                    Vec::new()
                } else {
                    vec![NarrativeLine::new(raw)]
                }
            }
        }
    }

    /// Route a frame and hand its lines to `sink`. Returns how many lines
    /// were delivered.
    pub fn dispatch_to(
        &mut self,
        frame: &str,
        sink: &mut dyn NarrativeSink,
    ) -> anyhow::Result<usize> {
        let lines = self.route_frame(frame);
        for line in &lines {
            sink.emit(line)?;
        }
        Ok(lines.len())
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new(ClientSettings::default())
    }
}
