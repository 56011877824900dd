//! Command counters and structured logging setup.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Collector for processor statistics.
pub struct Metrics {
    accepted: AtomicU64,
    rejected: AtomicU64,
    deaths: AtomicU64,
    evolutions: AtomicU64,
    pub counters: Mutex<BTreeMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            evolutions: AtomicU64::new(0),
            counters: Mutex::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records the outcome of one command.
    pub fn record_command(&self, action: &str, accepted: bool) {
        if accepted {
            self.increment_counter(&format!("{action}.accepted"));
            self.accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.increment_counter(&format!("{action}.rejected"));
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }

        let processed = self.accepted() + self.rejected();
        if processed.is_multiple_of(1000) {
            tracing::info!(
                processed,
                accepted = self.accepted(),
                rejected = self.rejected(),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Commands processed"
            );
        }
    }

    pub fn record_death(&self) {
        self.deaths.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evolution(&self) {
        self.evolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn evolutions(&self) -> u64 {
        self.evolutions.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the run totals.
    pub fn log_summary(&self) {
        tracing::info!(
            accepted = self.accepted(),
            rejected = self.rejected(),
            evolutions = self.evolutions(),
            deaths = self.deaths(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Run summary"
        );
    }
}

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
