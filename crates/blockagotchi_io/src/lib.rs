//! # Blockagotchi IO
//!
//! Boundary between the command processor and its host.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON and `0x`-hex payload helpers
//! - Advance-request decoding and notice/report encoding
//! - JSONL command input and an outcome journal with a replay digest

/// Advance requests in, notices and reports out
pub mod envelope;
/// Error types and result aliases for I/O operations
pub mod error;
/// JSONL input and the digesting outcome journal
pub mod journal;
/// Validated JSON and hex payload helpers
pub mod serialization;

pub use envelope::{AdvanceRequest, HostMessage, Metadata};
pub use error::{IoError, Result};
pub use journal::{
    decode_line, outcome_digest, read_lines, InputLine, JournalFormat, OutcomeJournal,
};
pub use serialization::{
    from_hex_payload, from_json, hex_to_str, str_to_hex, to_hex_payload, to_json,
};
