//! Server message payloads consumed by the player
//!
//! Each recognized envelope kind has a typed payload model. Every field is
//! optional or defaulted and decoded through [`crate::lenient`], so the only
//! way a payload fails to decode is when its top-level shape is wrong (for
//! example a number where an object is expected).
//!
//! ## Forward compatibility
//!
//! - Unknown kinds decode to [`ServerMessage::Unknown`]
//! - Unknown payload fields are ignored
//! - Malformed list elements are dropped, not fatal

mod chat;
mod event;
mod roster;
mod session;
mod world;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::IncomingMessage;

pub use chat::{CommandData, CommandResponse, Communication, PartyMemberRecord, ServerError};
pub use event::{FloatText, GameEvent};
pub use roster::{
    ChannelDeltaRecord, ChannelSnapshotRecord, ProximityEntityRecord, RosterDelta, RosterSnapshot,
};
pub use session::{AuthError, AuthSuccess, CharacterSummary, HandshakeAck};
pub use world::{
    AllyRecord, CharacterRecord, CombatRecord, EntityChanges, EntityRecord, ExitInfo,
    StateUpdate, TextMovement, WorldEntry, ZoneInfo,
};

/// Envelope kinds with a dedicated payload model.
pub mod kinds {
    pub const HANDSHAKE_ACK: &str = "handshake_ack";
    pub const AUTH_SUCCESS: &str = "auth_success";
    pub const AUTH_ERROR: &str = "auth_error";
    pub const WORLD_ENTRY: &str = "world_entry";
    pub const STATE_UPDATE: &str = "state_update";
    pub const EVENT: &str = "event";
    pub const ERROR: &str = "error";
    pub const COMMUNICATION: &str = "communication";
    pub const CHAT: &str = "chat";
    pub const COMMAND_RESPONSE: &str = "command_response";
    pub const PROXIMITY_ROSTER: &str = "proximity_roster";
    pub const PROXIMITY_ROSTER_DELTA: &str = "proximity_roster_delta";
}

/// A server message with its payload decoded for its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    HandshakeAck(HandshakeAck),
    AuthSuccess(AuthSuccess),
    AuthError(AuthError),
    WorldEntry(Box<WorldEntry>),
    StateUpdate(Box<StateUpdate>),
    Event(Box<GameEvent>),
    Error(ServerError),
    /// `communication` and `chat` share one payload model
    Communication(Communication),
    CommandResponse(CommandResponse),
    ProximityRoster(RosterSnapshot),
    ProximityRosterDelta(RosterDelta),
    /// A kind this client has no model for
    Unknown { kind: String },
}

/// Why a payload could not be decoded for its kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("'{kind}' message has an empty payload")]
    Empty { kind: String },

    #[error("'{kind}' payload is a {found}, expected an object")]
    Misshaped { kind: String, found: &'static str },
}

impl ServerMessage {
    /// Decode the payload of `message` according to its kind.
    pub fn decode(message: &IncomingMessage) -> Result<Self, PayloadError> {
        let kind = message.kind();
        if message.has_empty_payload() {
            return Err(PayloadError::Empty {
                kind: kind.to_string(),
            });
        }
        let payload = message.payload();

        let decoded = match kind {
            kinds::HANDSHAKE_ACK => Self::HandshakeAck(object(kind, payload)?),
            kinds::AUTH_SUCCESS => Self::AuthSuccess(object(kind, payload)?),
            kinds::AUTH_ERROR => Self::AuthError(match payload {
                Value::String(text) => AuthError::from_text(text),
                _ => object(kind, payload)?,
            }),
            kinds::WORLD_ENTRY => Self::WorldEntry(Box::new(object(kind, payload)?)),
            kinds::STATE_UPDATE => Self::StateUpdate(Box::new(object(kind, payload)?)),
            kinds::EVENT => Self::Event(Box::new(match payload {
                Value::String(text) => GameEvent::from_narrative(text),
                _ => object(kind, payload)?,
            })),
            kinds::ERROR => Self::Error(match payload {
                Value::String(text) => ServerError::from_text(text),
                _ => object(kind, payload)?,
            }),
            kinds::COMMUNICATION | kinds::CHAT => Self::Communication(object(kind, payload)?),
            kinds::COMMAND_RESPONSE => Self::CommandResponse(object(kind, payload)?),
            kinds::PROXIMITY_ROSTER => Self::ProximityRoster(object(kind, payload)?),
            kinds::PROXIMITY_ROSTER_DELTA => Self::ProximityRosterDelta(object(kind, payload)?),
            _ => Self::Unknown {
                kind: kind.to_string(),
            },
        };
        Ok(decoded)
    }
}

fn object<T: DeserializeOwned>(kind: &str, payload: &Value) -> Result<T, PayloadError> {
    let misshaped = || PayloadError::Misshaped {
        kind: kind.to_string(),
        found: json_type_name(payload),
    };
    if !payload.is_object() {
        return Err(misshaped());
    }
    T::deserialize(payload).map_err(|e| {
        tracing::debug!(kind, error = %e, "Payload object did not fit its model");
        misshaped()
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(kind: &str, payload: Value) -> Result<ServerMessage, PayloadError> {
        ServerMessage::decode(&IncomingMessage::new(kind, payload))
    }

    #[test]
    fn test_empty_payload_rejected_for_any_kind() {
        for kind in ["chat", "world_entry", "mystery"] {
            let err = decode(kind, json!({})).unwrap_err();
            assert!(matches!(err, PayloadError::Empty { .. }));
        }
    }

    #[test]
    fn test_misshaped_payload() {
        let err = decode("state_update", json!(17)).unwrap_err();
        assert_eq!(
            err,
            PayloadError::Misshaped {
                kind: "state_update".to_string(),
                found: "number"
            }
        );
        assert!(decode("proximity_roster", json!(["say"])).is_err());
        assert!(decode("chat", json!("hello")).is_err());
    }

    #[test]
    fn test_string_payload_for_text_kinds() {
        match decode("error", json!("Server restarting")).unwrap() {
            ServerMessage::Error(err) => {
                assert_eq!(err.message.as_deref(), Some("Server restarting"))
            }
            other => panic!("Expected Error, got {:?}", other),
        }
        match decode("event", json!("Thunder rolls.")).unwrap() {
            ServerMessage::Event(event) => {
                assert_eq!(event.narrative.as_deref(), Some("Thunder rolls."))
            }
            other => panic!("Expected Event, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_and_communication_share_model() {
        let chat = decode("chat", json!({"channel": "say", "message": "hi"})).unwrap();
        let comm = decode("communication", json!({"channel": "say", "message": "hi"})).unwrap();
        assert_eq!(chat, comm);
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            decode("weather", json!({"rain": true})).unwrap(),
            ServerMessage::Unknown {
                kind: "weather".to_string()
            }
        );
    }
}
