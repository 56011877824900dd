//! JSONL command input and outcome journal.
//!
//! Each processed line yields one outcome line. A running SHA-256 over the
//! outcome lines gives a digest two replays can compare. The digest is taken
//! over the outcome JSON whatever the written format, so a host-message
//! journal and a plain one of the same run share it.

use crate::envelope::{AdvanceRequest, HostMessage};
use crate::error::{IoError, Result};
use crate::serialization::to_json;
use blockagotchi_core::command::{Command, Outcome};
use blockagotchi_core::CommandError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io::{BufRead, Write};

/// One non-empty input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the source.
    pub number: usize,
    pub text: String,
}

/// Reads command lines, skipping blanks and `#` comments.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<InputLine>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Ok(InputLine {
                        number: i + 1,
                        text: trimmed.to_string(),
                    }))
                }
            }
            Err(e) => Some(Err(IoError::FileSystem(e).with_context(format!("line {}", i + 1)))),
        })
}

/// Decodes a line that is either a plain command or an advance request.
///
/// Errors come back as [`CommandError::Malformed`] so the processor can turn
/// them into a rejection like any other bad command.
pub fn decode_line(text: &str) -> std::result::Result<Command, CommandError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CommandError::malformed(e.to_string()))?;
    if value.get("metadata").is_some() {
        let request: AdvanceRequest =
            serde_json::from_value(value).map_err(|e| CommandError::malformed(e.to_string()))?;
        return request
            .to_command()
            .map_err(|e| CommandError::malformed(e.to_string()));
    }
    Command::from_json(text)
}

/// Shape of the lines an [`OutcomeJournal`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JournalFormat {
    /// The outcome itself, `{"status": ...}`.
    #[default]
    Outcomes,
    /// The notice or report the host would receive.
    HostMessages,
}

/// Writes outcome lines and keeps their digest.
pub struct OutcomeJournal<W: Write> {
    writer: W,
    format: JournalFormat,
    hasher: Sha256,
    lines: u64,
}

impl<W: Write> OutcomeJournal<W> {
    pub fn new(writer: W) -> Self {
        Self::with_format(writer, JournalFormat::Outcomes)
    }

    pub fn with_format(writer: W, format: JournalFormat) -> Self {
        Self {
            writer,
            format,
            hasher: Sha256::new(),
            lines: 0,
        }
    }

    pub fn record(&mut self, outcome: &Outcome) -> Result<()> {
        let line = to_json(outcome)?;
        self.hasher.update(line.as_bytes());
        self.hasher.update(b"\n");
        let written = match self.format {
            JournalFormat::Outcomes => line,
            JournalFormat::HostMessages => to_json(&HostMessage::from_outcome(outcome)?)?,
        };
        writeln!(self.writer, "{written}")
            .map_err(|e| IoError::FileSystem(e).with_context("writing outcome"))?;
        self.lines += 1;
        Ok(())
    }

    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Hex digest of everything recorded so far.
    #[must_use]
    pub fn digest(&self) -> String {
        hex::encode(self.hasher.clone().finalize())
    }

    /// Flushes the writer and returns the final digest.
    pub fn finish(mut self) -> Result<String> {
        self.writer
            .flush()
            .map_err(|e| IoError::FileSystem(e).with_context("flushing journal"))?;
        tracing::debug!(lines = self.lines, "Journal closed");
        Ok(self.digest())
    }
}

/// Digest of a complete outcome sequence, as [`OutcomeJournal`] computes it.
pub fn outcome_digest<'a, I>(outcomes: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Outcome>,
{
    let mut journal = OutcomeJournal::new(std::io::sink());
    for outcome in outcomes {
        journal.record(outcome)?;
    }
    journal.finish()
}
