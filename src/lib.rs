//! # Blockagotchi
//!
//! Runtime around the deterministic command processor: configuration
//! loading, JSONL stream processing with a replay digest, and a seeded
//! command generator for simulated runs.

/// Runtime driver wiring config, processor and journal
pub mod app;
/// Seeded command-stream generator
pub mod simulate;

pub use app::{load_config, App, RunReport};
pub use simulate::{generate, CommandGenerator, SimulationParams};
