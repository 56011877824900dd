//! Sub-type decisions at the Child and Adult transitions.
//!
//! A strategy sees a [`FeatureVector`] and the admissible candidates for the
//! transition and returns the index of its pick. The candidate list carries
//! the branching structure (which line a Teen belongs to), so strategies stay
//! pure functions of their inputs.

pub mod classifier;
pub mod heuristic;

use crate::config::StrategyKind;
use crate::lifecycle::CreatureLogic;
use blockagotchi_data::{Condition, Creature, FoodKind, Stage, SubType};
use chrono::{DateTime, Utc};

pub use classifier::ClassifierStrategy;
pub use heuristic::HeuristicStrategy;

/// Number of numeric features fed to a strategy.
pub const FEATURE_COUNT: usize = 9;

pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "age",
    "food_fish",
    "food_meat",
    "food_vegetal",
    "food_fruit",
    "walks_30d",
    "condition",
    "happiness",
    "stage",
];

const CHILD_CANDIDATES: [SubType; 3] = [SubType::Cat, SubType::Dog, SubType::Bird];
const CAT_ADULTS: [SubType; 2] = [SubType::Lion, SubType::Tiger];
const DOG_ADULTS: [SubType; 1] = [SubType::Wolf];
const BIRD_ADULTS: [SubType; 3] = [SubType::Eagle, SubType::Pigeon, SubType::Duck];

/// Snapshot of the creature taken just before a stage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub age: i64,
    pub fish: u32,
    pub meat: u32,
    pub vegetal: u32,
    pub fruit: u32,
    pub walks_30d: u32,
    pub condition: Condition,
    pub happiness: i64,
    /// Stage the creature is leaving.
    pub stage: Stage,
}

impl FeatureVector {
    pub fn from_creature(creature: &Creature, now: DateTime<Utc>) -> Self {
        let mut counts = [0u32; 4];
        for label in &creature.history.food {
            if let Some(kind) = FoodKind::from_label(label) {
                counts[kind as usize] += 1;
            }
        }
        Self {
            age: creature.lifecycle.age,
            fish: counts[FoodKind::Fish as usize],
            meat: counts[FoodKind::Meat as usize],
            vegetal: counts[FoodKind::Vegetal as usize],
            fruit: counts[FoodKind::Fruit as usize],
            walks_30d: u32::try_from(creature.recent_walks(now)).unwrap_or(u32::MAX),
            condition: creature.lifecycle.condition,
            happiness: creature.care.happiness,
            stage: creature.lifecycle.stage,
        }
    }

    #[must_use]
    pub fn count(&self, kind: FoodKind) -> u32 {
        match kind {
            FoodKind::Fish => self.fish,
            FoodKind::Meat => self.meat,
            FoodKind::Vegetal => self.vegetal,
            FoodKind::Fruit => self.fruit,
        }
    }

    /// Numeric encoding in [`FEATURE_LABELS`] order.
    #[must_use]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            f64::from(self.fish),
            f64::from(self.meat),
            f64::from(self.vegetal),
            f64::from(self.fruit),
            f64::from(self.walks_30d),
            condition_code(self.condition),
            self.happiness as f64,
            stage_code(self.stage),
        ]
    }
}

fn condition_code(condition: Condition) -> f64 {
    match condition {
        Condition::Muscle => 1.0,
        Condition::Normal => 2.0,
        Condition::Sedentary => 3.0,
    }
}

fn stage_code(stage: Stage) -> f64 {
    match stage {
        Stage::Blob => 0.0,
        Stage::Child => 1.0,
        Stage::Teen => 2.0,
        Stage::Adult => 3.0,
        Stage::Old => 4.0,
    }
}

/// Admissible sub-types when entering `next`, given the current sub-type.
///
/// Empty when the transition assigns nothing or the current sub-type is not
/// a recognised juvenile line.
#[must_use]
pub fn candidates_for(next: Stage, current: Option<SubType>) -> &'static [SubType] {
    match (next, current) {
        (Stage::Child, _) => &CHILD_CANDIDATES,
        (Stage::Adult, Some(SubType::Cat)) => &CAT_ADULTS,
        (Stage::Adult, Some(SubType::Dog)) => &DOG_ADULTS,
        (Stage::Adult, Some(SubType::Bird)) => &BIRD_ADULTS,
        _ => &[],
    }
}

pub trait EvolutionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Index into `candidates` of the chosen sub-type; `None` when nothing
    /// applies.
    fn choose(&self, features: &FeatureVector, candidates: &[SubType]) -> Option<usize>;
}

/// Builds the strategy named in configuration.
#[must_use]
pub fn strategy_for(kind: StrategyKind) -> Box<dyn EvolutionStrategy> {
    match kind {
        StrategyKind::Heuristic => Box::new(HeuristicStrategy),
        StrategyKind::Classifier => Box::new(ClassifierStrategy::default()),
    }
}
