//! Connection handshake and authentication payloads.

use serde::Deserialize;

use crate::lenient;

/// `handshake_ack`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandshakeAck {
    #[serde(deserialize_with = "lenient::option")]
    pub compatible: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub server_version: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub protocol_version: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub requires_auth: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

impl HandshakeAck {
    /// Servers that omit the flag are assumed compatible.
    pub fn is_compatible(&self) -> bool {
        self.compatible.unwrap_or(true)
    }
}

/// One selectable character from `auth_success`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CharacterSummary {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub level: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
}

/// `auth_success`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthSuccess {
    #[serde(deserialize_with = "lenient::text")]
    pub account_id: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub characters: Vec<CharacterSummary>,
}

/// `auth_error`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AuthError {
    #[serde(deserialize_with = "lenient::text")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

impl AuthError {
    pub(crate) fn from_text(text: &str) -> Self {
        Self {
            reason: None,
            message: Some(text.trim().to_string()),
        }
    }
}
