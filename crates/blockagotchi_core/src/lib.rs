//! # Blockagotchi Core
//!
//! Deterministic command processor and creature lifecycle engine.
//!
//! This crate contains:
//! - Creature lifecycle rules (feeding, walking, bathing, evolution, neglect)
//! - Interchangeable evolution strategies (counting heuristic, embedded classifier)
//! - The world registry with its item arena
//! - The sequential command processor and the read-only query layer
//! - Ledger and catalog boundaries with in-memory implementations
//! - Configuration, metrics and structured logging
//!
//! ## Determinism
//!
//! Every state change is driven by the ordered command stream. Time comes
//! from command timestamps, maps are ordered and the classifier is a fixed
//! table, so replaying the same commands always yields the same outcomes.
//!
//! ## Example
//!
//! ```
//! use blockagotchi_core::catalog::StaticCatalog;
//! use blockagotchi_core::command::{Action, Command};
//! use blockagotchi_core::config::AppConfig;
//! use blockagotchi_core::ledger::InMemoryLedger;
//! use blockagotchi_core::processor::CommandProcessor;
//! use chrono::{TimeZone, Utc};
//!
//! let ledger = InMemoryLedger::new().with_balance("0xabc", 10);
//! let mut processor = CommandProcessor::new(
//!     AppConfig::default(),
//!     Box::new(ledger),
//!     Box::new(StaticCatalog::default()),
//! );
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let outcome = processor.process(&Command::new(
//!     "0xABC",
//!     now,
//!     Action::CreateCreature { name: "Rex".into() },
//! ));
//! assert!(outcome.is_accepted());
//! assert_eq!(processor.world().balance("0xabc"), 9);
//! ```

/// Static shop catalog
pub mod catalog;
/// Command, event and outcome records
pub mod command;
/// Configuration management
pub mod config;
/// Error types for commands and queries
pub mod error;
/// Sub-type decision strategies
pub mod evolution;
/// Token ledger boundary
pub mod ledger;
/// Creature lifecycle rules
pub mod lifecycle;
/// Command counters and logging setup
pub mod metrics;
/// Sequential command processor
pub mod processor;
/// Read-only projections
pub mod query;
/// World registry and item arena
pub mod world;

pub use command::{Action, Command, Event, Outcome};
pub use config::AppConfig;
pub use error::{CommandError, QueryError};
pub use evolution::EvolutionStrategy;
pub use lifecycle::CreatureLogic;
pub use metrics::{init_logging, Metrics};
pub use processor::CommandProcessor;
pub use query::QueryLayer;
pub use world::WorldState;
