//! Command and outcome records exchanged with the host.

use crate::error::CommandError;
use crate::lifecycle::Transition;
use blockagotchi_data::{CreatureId, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One ordered request from the host.
///
/// ```json
/// {"actor": "0xabc", "timestamp": "2024-01-01T00:00:00Z", "action": "feed", "food_type": "Fish"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub actor: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    #[serde(alias = "create_blockagotchi")]
    CreateCreature {
        name: String,
    },
    #[serde(alias = "feed_blockagotchi")]
    Feed {
        food_type: String,
    },
    #[serde(alias = "walk_blockagotchi")]
    Walk {
        walk_type: String,
    },
    #[serde(alias = "bathe_blockagotchi")]
    Bathe {
        bath_type: String,
        #[serde(default)]
        is_paid: bool,
    },
    BuyItem {
        item_id: ItemId,
    },
    ApplyItem {
        item_id: ItemId,
    },
    RemoveItem {
        item_id: ItemId,
    },
    /// Credit from outside the system, accepted only from the portal account.
    Deposit {
        beneficiary: String,
        amount: u64,
    },
}

impl Action {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCreature { .. } => "create_creature",
            Self::Feed { .. } => "feed",
            Self::Walk { .. } => "walk",
            Self::Bathe { .. } => "bathe",
            Self::BuyItem { .. } => "buy_item",
            Self::ApplyItem { .. } => "apply_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::Deposit { .. } => "deposit",
        }
    }
}

impl Command {
    pub fn new(actor: &str, timestamp: DateTime<Utc>, action: Action) -> Self {
        Self {
            actor: actor.to_string(),
            timestamp,
            action,
        }
        .normalized()
    }

    /// Decodes a JSON command. Account strings are lower-cased.
    pub fn from_json(text: &str) -> Result<Self, CommandError> {
        let command: Self =
            serde_json::from_str(text).map_err(|e| CommandError::malformed(e.to_string()))?;
        Ok(command.normalized())
    }

    fn normalized(mut self) -> Self {
        self.actor = self.actor.to_lowercase();
        if let Action::Deposit { beneficiary, .. } = &mut self.action {
            *beneficiary = beneficiary.to_lowercase();
        }
        self
    }
}

/// Structured record of an accepted command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_id: Option<CreatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    pub fn new(event: &str, user_id: &str) -> Self {
        Self {
            event: event.to_string(),
            user_id: user_id.to_string(),
            creature_id: None,
            transition: None,
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn creature(mut self, id: CreatureId) -> Self {
        self.creature_id = Some(id);
        self
    }

    #[must_use]
    pub fn transition(mut self, transition: Option<Transition>) -> Self {
        self.transition = transition;
        self
    }

    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Exactly one per processed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted { event: Event },
    Rejected { reason: String },
}

impl Outcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    #[must_use]
    pub fn event(&self) -> Option<&Event> {
        match self {
            Self::Accepted { event } => Some(event),
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}

impl From<CommandError> for Outcome {
    fn from(err: CommandError) -> Self {
        Self::Rejected {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_feed_command() {
        let cmd = Command::from_json(
            r#"{"actor":"0xABC","timestamp":"2024-01-01T00:00:00Z","action":"feed","food_type":"Fish"}"#,
        )
        .unwrap();
        assert_eq!(cmd.actor, "0xabc");
        assert_eq!(
            cmd.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            cmd.action,
            Action::Feed {
                food_type: "Fish".to_string()
            }
        );
    }

    #[test]
    fn test_bathe_defaults_to_free() {
        let cmd = Command::from_json(
            r#"{"actor":"u1","timestamp":"2024-01-01T00:00:00Z","action":"bathe","bath_type":"bubble"}"#,
        )
        .unwrap();
        assert_eq!(
            cmd.action,
            Action::Bathe {
                bath_type: "bubble".to_string(),
                is_paid: false
            }
        );
    }

    #[test]
    fn test_unknown_action_is_malformed() {
        let err = Command::from_json(
            r#"{"actor":"u1","timestamp":"2024-01-01T00:00:00Z","action":"dance"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "malformed");

        let err = Command::from_json(r#"{"actor":"u1","action":"feed"}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_host_action_names_accepted() {
        let cmd = Command::from_json(
            r#"{"actor":"u1","timestamp":"2024-01-01T00:00:00Z","action":"create_blockagotchi","name":"Rex"}"#,
        )
        .unwrap();
        assert_eq!(cmd.action.name(), "create_creature");
    }

    #[test]
    fn test_deposit_beneficiary_lowercased() {
        let cmd = Command::from_json(
            r#"{"actor":"0xPORTAL","timestamp":"2024-01-01T00:00:00Z","action":"deposit","beneficiary":"0xAB","amount":3}"#,
        )
        .unwrap();
        assert_eq!(
            cmd.action,
            Action::Deposit {
                beneficiary: "0xab".to_string(),
                amount: 3
            }
        );
    }

    #[test]
    fn test_event_serializes_flat() {
        let event = Event::new("feed_blockagotchi", "u1")
            .creature(4)
            .field("food_type", "Fish");
        let json = serde_json::to_value(Outcome::Accepted { event }).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["event"]["event"], "feed_blockagotchi");
        assert_eq!(json["event"]["creature_id"], 4);
        assert_eq!(json["event"]["food_type"], "Fish");
        assert!(json["event"].get("transition").is_none());
    }

    #[test]
    fn test_rejection_from_error() {
        let outcome: Outcome = CommandError::validation("nope").into();
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.reason(), Some("nope"));
    }
}
