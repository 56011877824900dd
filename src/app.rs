//! Runtime driver: configuration, the processor and the journal wired together.

use anyhow::{Context, Result};
use blockagotchi_core::catalog::StaticCatalog;
use blockagotchi_core::command::{Command, Outcome};
use blockagotchi_core::ledger::InMemoryLedger;
use blockagotchi_core::{AppConfig, CommandProcessor, QueryLayer};
use blockagotchi_io::{decode_line, read_lines, JournalFormat, OutcomeJournal};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// Loads `path` if it exists, otherwise falls back to defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("parsing config {}", path.display()))
}

/// Totals of one run, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub processed: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub creatures: usize,
    pub digest: String,
}

pub struct App {
    processor: CommandProcessor,
    format: JournalFormat,
}

impl App {
    /// Starts from an empty ledger; funds arrive through portal deposits.
    pub fn new(config: AppConfig) -> Self {
        Self::with_ledger(config, InMemoryLedger::new())
    }

    pub fn with_ledger(config: AppConfig, ledger: InMemoryLedger) -> Self {
        Self {
            processor: CommandProcessor::new(
                config,
                Box::new(ledger),
                Box::new(StaticCatalog::default()),
            ),
            format: JournalFormat::default(),
        }
    }

    /// Chooses what the journal writes; the digest is unaffected.
    #[must_use]
    pub fn with_journal_format(mut self, format: JournalFormat) -> Self {
        self.format = format;
        self
    }

    pub fn processor(&self) -> &CommandProcessor {
        &self.processor
    }

    pub fn process(&mut self, command: &Command) -> Outcome {
        self.processor.process(command)
    }

    /// Decodes one input line (plain command or advance request) and runs it.
    pub fn process_line(&mut self, text: &str) -> Outcome {
        match decode_line(text) {
            Ok(command) => self.processor.process(&command),
            Err(err) => self.processor.reject_malformed(err),
        }
    }

    pub fn query(&self, path: &str) -> Value {
        let token = &self.processor.config().world.native_token;
        QueryLayer::new(self.processor.world(), token).answer(path)
    }

    /// Processes every line of `input`, journaling one outcome per line.
    pub fn run_stream<R, W>(&mut self, input: R, output: W) -> Result<RunReport>
    where
        R: BufRead,
        W: Write,
    {
        let mut journal = OutcomeJournal::with_format(output, self.format);
        for line in read_lines(input) {
            let line = line?;
            let outcome = self.process_line(&line.text);
            if let Some(reason) = outcome.reason() {
                tracing::debug!(line = line.number, reason, "Line rejected");
            }
            journal.record(&outcome)?;
        }
        let processed = journal.lines();
        let digest = journal.finish()?;
        Ok(self.report(processed, digest))
    }

    /// Processes already-built commands, journaling into `output`.
    pub fn run_commands<'a, I, W>(&mut self, commands: I, output: W) -> Result<RunReport>
    where
        I: IntoIterator<Item = &'a Command>,
        W: Write,
    {
        let mut journal = OutcomeJournal::with_format(output, self.format);
        for command in commands {
            let outcome = self.processor.process(command);
            journal.record(&outcome)?;
        }
        let processed = journal.lines();
        let digest = journal.finish()?;
        Ok(self.report(processed, digest))
    }

    fn report(&self, processed: u64, digest: String) -> RunReport {
        let metrics = self.processor.metrics();
        metrics.log_summary();
        RunReport {
            processed,
            accepted: metrics.accepted(),
            rejected: metrics.rejected(),
            creatures: self.processor.world().creatures().count(),
            digest,
        }
    }
}
