//! Read-only projections of the world.
//!
//! Paths look like `creature/3` or `balance/ether/0xabc` and are matched
//! case-insensitively. Answers are JSON values; failures come back as
//! `{"error": "..."}` rather than propagating.

use crate::error::QueryError;
use crate::world::WorldState;
use blockagotchi_data::{
    CareState, Creature, CreatureId, CreatureIdentity, InstanceId, Item, ItemId, Lifecycle,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Balance { token: String, account: String },
    Creature(CreatureId),
    UserCreature(String),
    User(String),
    AllCreatures,
    ShopItems,
    Ranking,
}

impl Query {
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim().trim_matches('/').to_lowercase();
        let parts: Vec<&str> = path.split('/').collect();
        match parts.as_slice() {
            ["balance", token, account] => Ok(Self::Balance {
                token: (*token).to_string(),
                account: (*account).to_string(),
            }),
            ["creature", id] => id
                .parse()
                .map(Self::Creature)
                .map_err(|_| QueryError::BadArgument(format!("invalid creature id '{id}'"))),
            ["user_creature", account] => Ok(Self::UserCreature((*account).to_string())),
            ["user", account] => Ok(Self::User((*account).to_string())),
            ["all_creatures"] => Ok(Self::AllCreatures),
            ["shop_items"] => Ok(Self::ShopItems),
            ["ranking"] => Ok(Self::Ranking),
            _ => Err(QueryError::UnknownSelector(path.clone())),
        }
    }
}

/// Creature as seen from outside, with its derived score.
#[derive(Debug, Serialize)]
pub struct CreatureView<'a> {
    #[serde(flatten)]
    pub identity: &'a CreatureIdentity,
    #[serde(flatten)]
    pub lifecycle: &'a Lifecycle,
    #[serde(flatten)]
    pub care: &'a CareState,
    pub overall_score: i64,
    pub food_history: &'a [String],
    pub walk_history: &'a [DateTime<Utc>],
    /// Catalog ids of the equipped instances, in equip order.
    pub equipped: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub id: CreatureId,
    pub name: String,
    pub owner: String,
    pub overall_score: i64,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeldItem {
    pub instance_id: InstanceId,
    pub item_id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub creature_id: Option<CreatureId>,
    pub inventory: Vec<HeldItem>,
}

pub struct QueryLayer<'a> {
    world: &'a WorldState,
    native_token: &'a str,
}

impl<'a> QueryLayer<'a> {
    pub fn new(world: &'a WorldState, native_token: &'a str) -> Self {
        Self {
            world,
            native_token,
        }
    }

    pub fn balance(&self, token: &str, account: &str) -> Result<u64> {
        if !token.eq_ignore_ascii_case(self.native_token) {
            return Err(QueryError::BadArgument(format!(
                "unsupported token '{token}'"
            )));
        }
        Ok(self.world.balance(&account.to_lowercase()))
    }

    pub fn creature_by_id(&self, id: CreatureId) -> Result<&'a Creature> {
        self.world
            .creature(id)
            .ok_or_else(|| QueryError::NotFound(format!("creature {id}")))
    }

    pub fn creature_of(&self, account: &str) -> Result<&'a Creature> {
        self.world
            .creature_of(&account.to_lowercase())
            .ok_or_else(|| QueryError::NotFound(format!("creature of user {account}")))
    }

    pub fn user(&self, account: &str) -> Result<UserView> {
        let user = self
            .world
            .user(&account.to_lowercase())
            .ok_or_else(|| QueryError::NotFound(format!("user {account}")))?;
        let inventory = user
            .inventory
            .iter()
            .filter_map(|id| self.world.items().get(*id))
            .map(|i| HeldItem {
                instance_id: i.instance_id,
                item_id: i.item_id,
            })
            .collect();
        Ok(UserView {
            id: user.id.clone(),
            creature_id: user.creature,
            inventory,
        })
    }

    pub fn all_creatures(&self) -> Vec<&'a Creature> {
        self.world.creatures().collect()
    }

    pub fn catalog_items(&self) -> Vec<&'a Item> {
        self.world.catalog().all_items()
    }

    /// Overall score descending, ties by ascending id.
    pub fn ranking(&self) -> Vec<RankEntry> {
        let mut creatures = self.all_creatures();
        creatures.sort_by(|a, b| {
            b.overall_score()
                .cmp(&a.overall_score())
                .then(a.id().cmp(&b.id()))
        });
        creatures
            .into_iter()
            .enumerate()
            .map(|(i, c)| RankEntry {
                rank: i + 1,
                id: c.id(),
                name: c.identity.name.clone(),
                owner: c.identity.owner.clone(),
                overall_score: c.overall_score(),
                alive: c.is_alive(),
            })
            .collect()
    }

    pub fn view(&self, creature: &'a Creature) -> CreatureView<'a> {
        CreatureView {
            identity: &creature.identity,
            lifecycle: &creature.lifecycle,
            care: &creature.care,
            overall_score: creature.overall_score(),
            food_history: &creature.history.food,
            walk_history: &creature.history.walks,
            equipped: creature
                .equipped
                .iter()
                .filter_map(|id| self.world.items().get(*id))
                .map(|i| i.item_id)
                .collect(),
        }
    }

    pub fn run(&self, query: &Query) -> Result<Value> {
        let value = match query {
            Query::Balance { token, account } => json!({
                "token": token,
                "account": account,
                "balance": self.balance(token, account)?,
            }),
            Query::Creature(id) => to_value(&self.view(self.creature_by_id(*id)?))?,
            Query::UserCreature(account) => to_value(&self.view(self.creature_of(account)?))?,
            Query::User(account) => to_value(&self.user(account)?)?,
            Query::AllCreatures => {
                let views: Vec<_> = self
                    .all_creatures()
                    .into_iter()
                    .map(|c| self.view(c))
                    .collect();
                to_value(&views)?
            }
            Query::ShopItems => to_value(&self.catalog_items())?,
            Query::Ranking => to_value(&self.ranking())?,
        };
        Ok(value)
    }

    /// Answers a path, folding any failure into an error payload.
    pub fn answer(&self, path: &str) -> Value {
        match Query::parse(path).and_then(|q| self.run(&q)) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(path, error = %err, "Query failed");
                json!({ "error": err.to_string() })
            }
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| QueryError::BadArgument(e.to_string()))
}
