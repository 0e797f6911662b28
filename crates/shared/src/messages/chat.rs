//! Speech, server errors and command responses.

use serde::Deserialize;

use wyrdline_domain::{EntityId, PartyMember};

use crate::lenient;

/// `communication` / `chat`
///
/// Field names vary by server build, so each alias is kept as its own field
/// and the accessors pick the first one present.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Communication {
    #[serde(deserialize_with = "lenient::text")]
    pub channel: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub channel_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sender: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sender_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sender_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub target: Option<String>,
}

impl Communication {
    /// Lower-cased channel, `say` when unspecified.
    pub fn channel(&self) -> String {
        self.channel
            .as_deref()
            .or(self.channel_type.as_deref())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "say".to_string())
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref().or(self.sender_name.as_deref())
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.content.as_deref())
    }
}

/// `error`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ServerError {
    #[serde(deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

impl ServerError {
    pub(crate) fn from_text(text: &str) -> Self {
        Self {
            code: None,
            message: Some(text.trim().to_string()),
        }
    }
}

/// A party member as listed by the server.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartyMemberRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub entity_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub leader: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub is_leader: Option<bool>,
}

impl PartyMemberRecord {
    /// Domain member; `None` without an id.
    pub fn to_member(&self) -> Option<PartyMember> {
        let raw_id = self.id.clone().or_else(|| self.entity_id.clone())?;
        let mut member =
            PartyMember::new(EntityId::new(raw_id).ok()?, self.name.clone().unwrap_or_default());
        member.leader = self.leader.or(self.is_leader).unwrap_or(false);
        Some(member)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CommandData {
    #[serde(deserialize_with = "lenient::option_vec")]
    pub members: Option<Vec<PartyMemberRecord>>,
}

/// `command_response`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CommandResponse {
    #[serde(deserialize_with = "lenient::option")]
    pub success: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub command: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub data: Option<CommandData>,
}

impl CommandResponse {
    /// Responses without a `success` flag are treated as successful.
    pub fn succeeded(&self) -> bool {
        self.success.unwrap_or(true)
    }

    pub fn members(&self) -> Option<&[PartyMemberRecord]> {
        self.data.as_ref()?.members.as_deref()
    }
}
