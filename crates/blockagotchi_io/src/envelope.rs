//! Host envelopes: advance requests in, notices and reports out.
//!
//! An advance request carries the sender and block time in its metadata and
//! the action as a hex payload. Accepted outcomes leave as a notice (the
//! event), rejected ones as a report (the reason), both hex encoded.

use crate::error::{IoError, Result};
use crate::serialization::{from_json, hex_to_str, str_to_hex, to_hex_payload};
use blockagotchi_core::command::{Action, Command, Outcome};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub msg_sender: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub input_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    pub metadata: Metadata,
    pub payload: String,
}

impl AdvanceRequest {
    pub fn new(sender: &str, timestamp: DateTime<Utc>, action: &Action) -> Result<Self> {
        Ok(Self {
            metadata: Metadata {
                msg_sender: sender.to_string(),
                timestamp: timestamp.timestamp(),
                input_index: 0,
            },
            payload: to_hex_payload(action)?,
        })
    }

    /// Decodes the payload into a command stamped with the block time.
    pub fn to_command(&self) -> Result<Command> {
        let timestamp = Utc
            .timestamp_opt(self.metadata.timestamp, 0)
            .single()
            .ok_or_else(|| {
                IoError::validation(format!("Timestamp {} out of range", self.metadata.timestamp))
            })?;
        let action: Action = from_json(&hex_to_str(&self.payload)?)?;
        Ok(Command::new(&self.metadata.msg_sender, timestamp, action))
    }
}

/// What goes back to the host for one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum HostMessage {
    Notice(String),
    Report(String),
}

impl HostMessage {
    pub fn from_outcome(outcome: &Outcome) -> Result<Self> {
        match outcome {
            Outcome::Accepted { event } => Ok(Self::Notice(to_hex_payload(event)?)),
            Outcome::Rejected { reason } => Ok(Self::Report(str_to_hex(reason))),
        }
    }

    /// `"accept"` or `"reject"`, the status the host loop reports back.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Notice(_) => "accept",
            Self::Report(_) => "reject",
        }
    }
}
