//! Configuration management for the command processor.
//!
//! Strongly-typed structures that map to `config.toml`. Every field has a
//! default, so a partial file only overrides what it names.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! supply_cap = 1000
//! sink_account = "0x0000000000000000000000000000000000000000"
//!
//! [economy]
//! creation_fee = 1
//! bath_price = 5
//!
//! [evolution]
//! strategy = "classifier"
//! ```

use serde::{Deserialize, Serialize};

/// World-level parameters: supply and the well-known accounts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WorldConfig {
    /// Maximum number of creatures ever created.
    pub supply_cap: u32,
    /// Account receiving every fee and purchase.
    pub sink_account: String,
    /// Only this actor may credit balances through `deposit`.
    pub portal_account: String,
    /// Token name answered by `balance/<token>/<account>` queries.
    pub native_token: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            supply_cap: 1000,
            sink_account: "0x0000000000000000000000000000000000000000".to_string(),
            portal_account: "0xffdbe43d4c855bf7e0f105c400a50857f53ab044".to_string(),
            native_token: "ether".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EconomyConfig {
    pub creation_fee: u64,
    pub bath_price: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            creation_fee: 1,
            bath_price: 5,
        }
    }
}

/// Happiness rewards and the neglect window.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CareConfig {
    pub initial_happiness: i64,
    pub feed_happiness: i64,
    pub walk_happiness: i64,
    pub paid_bath_happiness: i64,
    pub free_bath_happiness: i64,
    /// A creature dies once its last meal is more than this many days old.
    pub neglect_days: i64,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            initial_happiness: 50,
            feed_happiness: 10,
            walk_happiness: 5,
            paid_bath_happiness: 20,
            free_bath_happiness: 8,
            neglect_days: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Heuristic,
    Classifier,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EvolutionConfig {
    pub strategy: StrategyKind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub economy: EconomyConfig,
    pub care: CareConfig,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.supply_cap > 0, "Supply cap must be positive");
        anyhow::ensure!(
            !self.world.sink_account.is_empty(),
            "Sink account must not be empty"
        );
        anyhow::ensure!(
            !self.world.portal_account.is_empty(),
            "Portal account must not be empty"
        );
        anyhow::ensure!(
            self.world.sink_account != self.world.portal_account,
            "Sink and portal accounts must differ"
        );
        anyhow::ensure!(
            !self.world.native_token.is_empty(),
            "Native token name must not be empty"
        );

        anyhow::ensure!(
            self.economy.creation_fee > 0,
            "Creation fee must be positive"
        );

        anyhow::ensure!(
            self.care.neglect_days > 0,
            "Neglect window must be at least one day"
        );
        anyhow::ensure!(
            self.care.feed_happiness >= 0
                && self.care.walk_happiness >= 0
                && self.care.paid_bath_happiness >= 0
                && self.care.free_bath_happiness >= 0,
            "Care rewards must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let mut config = toml::from_str::<Self>(content)?;
        config.world.sink_account = config.world.sink_account.to_lowercase();
        config.world.portal_account = config.world.portal_account.to_lowercase();
        config.validate()?;
        Ok(config)
    }

    /// Hash of every rule-affecting section. Two nodes replaying the same
    /// command stream must agree on it.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.economy).as_bytes());
        hasher.update(format!("{:?}", self.care).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hex::encode(hasher.finalize())
    }
}
