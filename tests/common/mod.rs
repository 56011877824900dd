pub mod macros;

use blockagotchi_core::catalog::StaticCatalog;
use blockagotchi_core::command::{Action, Command, Outcome};
use blockagotchi_core::config::{AppConfig, StrategyKind};
use blockagotchi_core::ledger::InMemoryLedger;
use blockagotchi_core::{CommandProcessor, QueryLayer};
use blockagotchi_data::Creature;
use chrono::{DateTime, Duration, TimeZone, Utc};

#[allow(dead_code)]
pub const SINK: &str = "0x0000000000000000000000000000000000000000";
#[allow(dead_code)]
pub const PORTAL: &str = "0xffdbe43d4c855bf7e0f105c400a50857f53ab044";

#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[allow(dead_code)]
pub struct ProcessorBuilder {
    config: AppConfig,
    ledger: InMemoryLedger,
}

#[allow(dead_code)]
impl ProcessorBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            ledger: InMemoryLedger::new(),
        }
    }

    pub fn with_balance(mut self, account: &str, amount: u64) -> Self {
        self.ledger = self.ledger.with_balance(account, amount);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.config.evolution.strategy = strategy;
        self
    }

    pub fn build(self) -> Harness {
        Harness {
            processor: CommandProcessor::new(
                self.config,
                Box::new(self.ledger),
                Box::new(StaticCatalog::default()),
            ),
        }
    }
}

/// Processor plus shorthand for issuing commands on a day/hour clock.
pub struct Harness {
    pub processor: CommandProcessor,
}

#[allow(dead_code)]
impl Harness {
    pub fn at(&mut self, actor: &str, when: DateTime<Utc>, action: Action) -> Outcome {
        self.processor.process(&Command::new(actor, when, action))
    }

    pub fn on_day(&mut self, actor: &str, day: i64, action: Action) -> Outcome {
        self.at(actor, t0() + Duration::days(day), action)
    }

    pub fn create(&mut self, actor: &str, day: i64, name: &str) -> Outcome {
        self.on_day(
            actor,
            day,
            Action::CreateCreature {
                name: name.to_string(),
            },
        )
    }

    pub fn feed(&mut self, actor: &str, day: i64, food: &str) -> Outcome {
        self.on_day(
            actor,
            day,
            Action::Feed {
                food_type: food.to_string(),
            },
        )
    }

    pub fn walk(&mut self, actor: &str, day: i64) -> Outcome {
        self.on_day(
            actor,
            day,
            Action::Walk {
                walk_type: "park".to_string(),
            },
        )
    }

    pub fn bathe(&mut self, actor: &str, day: i64, paid: bool) -> Outcome {
        self.on_day(
            actor,
            day,
            Action::Bathe {
                bath_type: "bubble".to_string(),
                is_paid: paid,
            },
        )
    }

    pub fn creature_of(&self, actor: &str) -> &Creature {
        self.processor
            .world()
            .creature_of(actor)
            .expect("user has no creature")
    }

    pub fn balance(&self, account: &str) -> u64 {
        self.processor.world().balance(account)
    }

    pub fn query(&self, path: &str) -> serde_json::Value {
        QueryLayer::new(self.processor.world(), "ether").answer(path)
    }
}
