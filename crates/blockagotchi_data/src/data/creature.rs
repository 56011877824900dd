use crate::{CreatureId, InstanceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse lifecycle phase. Ordering follows the lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Stage {
    #[default]
    Blob,
    Child,
    Teen,
    Adult,
    Old,
}

impl Stage {
    /// The stage that follows this one, `None` for `Old`.
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Blob => Some(Stage::Child),
            Stage::Child => Some(Stage::Teen),
            Stage::Teen => Some(Stage::Adult),
            Stage::Adult => Some(Stage::Old),
            Stage::Old => None,
        }
    }
}

/// Finer classification assigned at the Child and Adult transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubType {
    Cat,
    Dog,
    Bird,
    Lion,
    Tiger,
    Wolf,
    Eagle,
    Pigeon,
    Duck,
}

impl SubType {
    pub const ALL: [SubType; 9] = [
        SubType::Cat,
        SubType::Dog,
        SubType::Bird,
        SubType::Lion,
        SubType::Tiger,
        SubType::Wolf,
        SubType::Eagle,
        SubType::Pigeon,
        SubType::Duck,
    ];

    /// Position in [`SubType::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The juvenile line an adult sub-type descends from. Juvenile types are
    /// their own line.
    #[must_use]
    pub fn line(self) -> SubType {
        match self {
            SubType::Cat | SubType::Lion | SubType::Tiger => SubType::Cat,
            SubType::Dog | SubType::Wolf => SubType::Dog,
            SubType::Bird | SubType::Eagle | SubType::Pigeon | SubType::Duck => SubType::Bird,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biotype {
    Fat,
    Skinny,
    #[default]
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    Muscle,
    #[default]
    Normal,
    Sedentary,
}

/// Who the creature is. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureIdentity {
    pub id: CreatureId,
    pub owner: String,
    pub name: String,
    pub birth_time: DateTime<Utc>,
}

/// Stage machine state plus the classifications derived from history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    /// Whole days since birth as of the last lifecycle event.
    pub age: i64,
    pub stage: Stage,
    #[serde(rename = "type")]
    pub sub_type: Option<SubType>,
    pub biotype: Biotype,
    pub condition: Condition,
    pub alive: bool,
    #[serde(default)]
    pub died_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareState {
    pub happiness: i64,
    pub last_fed_time: DateTime<Utc>,
    pub last_walk_time: DateTime<Utc>,
    pub last_bath_time: DateTime<Utc>,
}

/// Append-only evidence used by biotype, condition and type decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct History {
    pub food: Vec<String>,
    pub walks: Vec<DateTime<Utc>>,
}

/// A single simulated pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub identity: CreatureIdentity,
    pub lifecycle: Lifecycle,
    pub care: CareState,
    pub history: History,
    /// Item instances currently attached, in equip order.
    pub equipped: Vec<InstanceId>,
}

impl Creature {
    #[must_use]
    pub fn id(&self) -> CreatureId {
        self.identity.id
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.lifecycle.alive
    }

    /// `happiness + age`, derived on every read.
    #[must_use]
    pub fn overall_score(&self) -> i64 {
        self.care.happiness + self.lifecycle.age
    }
}
