//! `event` payloads: combat results, party changes and free narrative.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::chat::PartyMemberRecord;
use crate::lenient;

/// Floating combat text for one side of an exchange.
///
/// Servers send either a bare string or `{ text, color, shake }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloatText {
    pub text: Option<String>,
    pub color: Option<String>,
    pub shake: Option<bool>,
}

impl FloatText {
    /// True when the record carries a color or shake hint.
    pub fn has_presentation(&self) -> bool {
        self.color.is_some() || self.shake.is_some()
    }
}

impl<'de> Deserialize<'de> for FloatText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self {
                text: Some(text.trim().to_string()).filter(|t| !t.is_empty()),
                ..Self::default()
            }),
            Value::Object(fields) => {
                let text = fields
                    .get("text")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string);
                let color = fields
                    .get("color")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string);
                let shake = match fields.get("shake") {
                    Some(Value::Bool(flag)) => Some(*flag),
                    Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
                    _ => None,
                };
                Ok(Self { text, color, shake })
            }
            other => Err(serde::de::Error::custom(format!(
                "float text must be a string or object, got {}",
                other
            ))),
        }
    }
}

/// `event`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameEvent {
    #[serde(deserialize_with = "lenient::text")]
    pub event_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub narrative: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub message: Option<String>,

    // Combat
    #[serde(deserialize_with = "lenient::text")]
    pub attacker_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub attacker_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub target_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub target_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub ability_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub ability_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub outcome: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "lenient::option")]
    pub critical: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub glancing: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub deflected: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub penetrating: Option<bool>,
    #[serde(deserialize_with = "lenient::option")]
    pub float_text: Option<FloatText>,
    #[serde(deserialize_with = "lenient::option")]
    pub float_text_target: Option<FloatText>,

    // Party
    #[serde(deserialize_with = "lenient::text")]
    pub member_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub member_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub leader_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub leader_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub inviter_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub inviter_name: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub members: Vec<PartyMemberRecord>,
}

impl GameEvent {
    pub(crate) fn from_narrative(text: &str) -> Self {
        Self {
            narrative: Some(text.trim().to_string()),
            ..Self::default()
        }
    }

    /// Lower-cased event type, empty when absent.
    pub fn event_type(&self) -> String {
        self.event_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }

    pub fn is_combat(&self) -> bool {
        self.event_type().starts_with("combat_")
    }

    pub fn is_party(&self) -> bool {
        self.event_type().starts_with("party_")
    }

    /// Ability display text: the name, or the id when unnamed.
    pub fn ability(&self) -> Option<&str> {
        self.ability_name.as_deref().or(self.ability_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_text_string_or_object() {
        let event: GameEvent = serde_json::from_value(json!({
            "eventType": "combat_hit",
            "floatText": "-12",
            "floatTextTarget": {"text": "Ouch", "color": "#ff0000", "shake": 1}
        }))
        .unwrap();

        let attacker = event.float_text.unwrap();
        assert_eq!(attacker.text.as_deref(), Some("-12"));
        assert!(!attacker.has_presentation());

        let target = event.float_text_target.unwrap();
        assert_eq!(target.color.as_deref(), Some("#ff0000"));
        assert_eq!(target.shake, Some(true));
    }

    #[test]
    fn test_bad_float_text_dropped() {
        let event: GameEvent =
            serde_json::from_value(json!({"floatText": 12, "amount": "7"})).unwrap();
        assert!(event.float_text.is_none());
        assert_eq!(event.amount, Some(7.0));
    }

    #[test]
    fn test_event_type_classification() {
        let event: GameEvent =
            serde_json::from_value(json!({"eventType": "Combat_Hit", "abilityId": "slash"}))
                .unwrap();
        assert!(event.is_combat());
        assert!(!event.is_party());
        assert_eq!(event.ability(), Some("slash"));
    }

    #[test]
    fn test_party_members_list() {
        let event: GameEvent = serde_json::from_value(json!({
            "eventType": "party_joined",
            "members": [{"id": "p-1", "name": "Aria", "leader": true}, "junk"]
        }))
        .unwrap();
        assert!(event.is_party());
        assert_eq!(event.members.len(), 1);
    }
}
