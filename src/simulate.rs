//! Seeded command-stream generator.
//!
//! The same seed always produces the same commands, so a simulated run can
//! be replayed and its digest compared.

use blockagotchi_core::command::{Action, Command};
use blockagotchi_data::FoodKind;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WALKS: [&str; 3] = ["park", "beach", "forest"];
const BATHS: [&str; 2] = ["bubble", "shower"];
/// Catalog ids the generator shops for.
const ITEM_IDS: std::ops::RangeInclusive<u32> = 1..=7;
/// Longest gap between two commands.
const MAX_STEP_MINUTES: i64 = 360;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParams {
    pub seed: u64,
    pub count: usize,
    pub users: usize,
    /// Funds deposited for every user before the first command.
    pub funding: u64,
    pub start: DateTime<Utc>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 1_000,
            users: 10,
            funding: 200,
            start: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

pub struct CommandGenerator {
    rng: ChaCha8Rng,
    accounts: Vec<String>,
    now: DateTime<Utc>,
}

impl CommandGenerator {
    pub fn new(params: &SimulationParams) -> Self {
        let accounts = (0..params.users.max(1))
            .map(|i| format!("0x{:040x}", i + 1))
            .collect();
        Self {
            rng: ChaCha8Rng::seed_from_u64(params.seed),
            accounts,
            now: params.start,
        }
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    /// One portal deposit per account, all at the start time.
    pub fn funding(&self, portal: &str, amount: u64) -> Vec<Command> {
        self.accounts
            .iter()
            .map(|account| {
                Command::new(
                    portal,
                    self.now,
                    Action::Deposit {
                        beneficiary: account.clone(),
                        amount,
                    },
                )
            })
            .collect()
    }

    pub fn next_command(&mut self) -> Command {
        self.now += Duration::minutes(self.rng.gen_range(1..=MAX_STEP_MINUTES));
        let actor = self.accounts[self.rng.gen_range(0..self.accounts.len())].clone();
        let action = self.next_action();
        Command::new(&actor, self.now, action)
    }

    fn next_action(&mut self) -> Action {
        let roll = self.rng.gen_range(0..100);
        match roll {
            0..=9 => Action::CreateCreature {
                name: format!("gotchi-{}", self.rng.gen_range(0..10_000)),
            },
            10..=39 => {
                let food = FoodKind::ALL[self.rng.gen_range(0..FoodKind::ALL.len())];
                Action::Feed {
                    food_type: food.label().to_string(),
                }
            }
            40..=64 => Action::Walk {
                walk_type: WALKS[self.rng.gen_range(0..WALKS.len())].to_string(),
            },
            65..=74 => Action::Bathe {
                bath_type: BATHS[self.rng.gen_range(0..BATHS.len())].to_string(),
                is_paid: self.rng.gen_bool(0.5),
            },
            75..=84 => Action::BuyItem {
                item_id: self.rng.gen_range(ITEM_IDS),
            },
            85..=92 => Action::ApplyItem {
                item_id: self.rng.gen_range(ITEM_IDS),
            },
            _ => Action::RemoveItem {
                item_id: self.rng.gen_range(ITEM_IDS),
            },
        }
    }
}

/// Funding deposits followed by `params.count` random commands.
pub fn generate(params: &SimulationParams, portal: &str) -> Vec<Command> {
    let mut generator = CommandGenerator::new(params);
    let mut commands = generator.funding(portal, params.funding);
    commands.extend((0..params.count).map(|_| generator.next_command()));
    commands
}
