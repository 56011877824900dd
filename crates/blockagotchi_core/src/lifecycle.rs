//! Creature lifecycle: care actions, stage transitions, neglect.
//!
//! Every operation takes the timestamp of the command being processed. Nothing
//! here reads the wall clock, so replaying a command stream replays the exact
//! same lifecycle.

use crate::config::CareConfig;
use crate::error::CommandError;
use crate::evolution::{candidates_for, EvolutionStrategy, FeatureVector};
use blockagotchi_data::{
    Biotype, CareState, Condition, Creature, CreatureId, CreatureIdentity, History, InstanceId,
    Lifecycle, Stage, SubType,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days after which the walk history stops counting toward condition.
pub const WALK_WINDOW_DAYS: i64 = 30;

/// Minimum age in whole days to enter `stage`.
#[must_use]
pub fn entry_age(stage: Stage) -> i64 {
    match stage {
        Stage::Blob => 0,
        Stage::Child => 7,
        Stage::Teen => 14,
        Stage::Adult => 21,
        Stage::Old => 28,
    }
}

/// Feeding frequency `feedings / (age + 1)` against thresholds 2 and 1,
/// compared in integers.
#[must_use]
pub fn biotype_for(feedings: usize, age: i64) -> Biotype {
    let feedings = feedings as i128;
    let days = i128::from(age.max(0)) + 1;
    if feedings > 2 * days {
        Biotype::Fat
    } else if feedings < days {
        Biotype::Skinny
    } else {
        Biotype::Normal
    }
}

#[must_use]
pub fn condition_for(days_since_last_walk: i64, recent_walks: usize) -> Condition {
    if days_since_last_walk <= 1 && recent_walks >= 20 {
        Condition::Muscle
    } else if days_since_last_walk <= 3 && recent_walks >= 10 {
        Condition::Normal
    } else {
        Condition::Sedentary
    }
}

/// Whole days from `from` to `to`, never negative.
fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// A stage change produced by [`CreatureLogic::evolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    #[serde(rename = "type")]
    pub sub_type: Option<SubType>,
}

/// Rules a care action needs besides the creature itself.
#[derive(Clone, Copy)]
pub struct LifecycleContext<'a> {
    pub care: &'a CareConfig,
    pub strategy: &'a dyn EvolutionStrategy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("item {0} not equipped")]
pub struct ItemNotEquipped(pub InstanceId);

impl From<ItemNotEquipped> for CommandError {
    fn from(err: ItemNotEquipped) -> Self {
        CommandError::validation(err.to_string())
    }
}

pub fn create_creature(
    id: CreatureId,
    owner: &str,
    name: &str,
    birth_time: DateTime<Utc>,
    care: &CareConfig,
) -> Creature {
    Creature {
        identity: CreatureIdentity {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            birth_time,
        },
        lifecycle: Lifecycle {
            age: 0,
            stage: Stage::Blob,
            sub_type: None,
            biotype: Biotype::Normal,
            condition: Condition::Normal,
            alive: true,
            died_at: None,
        },
        care: CareState {
            happiness: care.initial_happiness,
            last_fed_time: birth_time,
            last_walk_time: birth_time,
            last_bath_time: birth_time,
        },
        history: History::default(),
        equipped: Vec::new(),
    }
}

/// Lifecycle rules for a [`Creature`].
pub trait CreatureLogic {
    fn age_at(&self, now: DateTime<Utc>) -> i64;
    fn refresh_age(&mut self, now: DateTime<Utc>);
    fn adjust_happiness(&mut self, delta: i64);

    fn feed(
        &mut self,
        food_label: &str,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition>;
    fn walk(
        &mut self,
        walk_label: &str,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition>;
    fn bathe(
        &mut self,
        bath_label: &str,
        paid: bool,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition>;

    /// Advances at most one stage.
    fn evolve(
        &mut self,
        now: DateTime<Utc>,
        strategy: &dyn EvolutionStrategy,
    ) -> Option<Transition>;

    /// Returns `true` only on the call that kills the creature.
    fn check_neglect(&mut self, now: DateTime<Utc>, neglect_days: i64) -> bool;

    fn recent_walks(&self, now: DateTime<Utc>) -> usize;
    fn update_biotype(&mut self, now: DateTime<Utc>);
    fn update_condition(&mut self, now: DateTime<Utc>);

    fn add_item(&mut self, instance: InstanceId);
    fn remove_item(&mut self, instance: InstanceId) -> Result<(), ItemNotEquipped>;
}

impl CreatureLogic for Creature {
    fn age_at(&self, now: DateTime<Utc>) -> i64 {
        whole_days(self.identity.birth_time, now)
    }

    fn refresh_age(&mut self, now: DateTime<Utc>) {
        self.lifecycle.age = self.age_at(now);
    }

    fn adjust_happiness(&mut self, delta: i64) {
        self.care.happiness = self.care.happiness.saturating_add(delta);
    }

    fn feed(
        &mut self,
        food_label: &str,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition> {
        self.care.last_fed_time = now;
        self.history.food.push(food_label.to_string());
        self.adjust_happiness(ctx.care.feed_happiness);
        let transition = self.evolve(now, ctx.strategy);
        self.update_biotype(now);
        tracing::debug!(
            creature = self.identity.id,
            food = food_label,
            biotype = ?self.lifecycle.biotype,
            "Creature fed"
        );
        transition
    }

    fn walk(
        &mut self,
        walk_label: &str,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition> {
        self.care.last_walk_time = now;
        self.history.walks.push(now);
        self.adjust_happiness(ctx.care.walk_happiness);
        let transition = self.evolve(now, ctx.strategy);
        self.update_condition(now);
        tracing::debug!(
            creature = self.identity.id,
            walk = walk_label,
            condition = ?self.lifecycle.condition,
            "Creature walked"
        );
        transition
    }

    fn bathe(
        &mut self,
        bath_label: &str,
        paid: bool,
        now: DateTime<Utc>,
        ctx: LifecycleContext<'_>,
    ) -> Option<Transition> {
        self.care.last_bath_time = now;
        let reward = if paid {
            ctx.care.paid_bath_happiness
        } else {
            ctx.care.free_bath_happiness
        };
        self.adjust_happiness(reward);
        tracing::debug!(
            creature = self.identity.id,
            bath = bath_label,
            paid,
            "Creature bathed"
        );
        self.evolve(now, ctx.strategy)
    }

    fn evolve(
        &mut self,
        now: DateTime<Utc>,
        strategy: &dyn EvolutionStrategy,
    ) -> Option<Transition> {
        self.refresh_age(now);
        let from = self.lifecycle.stage;
        let to = from.next()?;
        if self.lifecycle.age < entry_age(to) {
            return None;
        }

        let sub_type = match to {
            Stage::Child | Stage::Adult => {
                let candidates = candidates_for(to, self.lifecycle.sub_type);
                let features = FeatureVector::from_creature(self, now);
                strategy
                    .choose(&features, candidates)
                    .and_then(|i| candidates.get(i).copied())
            }
            _ => self.lifecycle.sub_type,
        };

        self.lifecycle.stage = to;
        self.lifecycle.sub_type = sub_type;
        tracing::info!(
            creature = self.identity.id,
            name = %self.identity.name,
            from = ?from,
            to = ?to,
            sub_type = ?sub_type,
            strategy = strategy.name(),
            "Creature evolved"
        );
        Some(Transition { from, to, sub_type })
    }

    fn check_neglect(&mut self, now: DateTime<Utc>, neglect_days: i64) -> bool {
        if !self.lifecycle.alive {
            return false;
        }
        if whole_days(self.care.last_fed_time, now) > neglect_days {
            self.lifecycle.alive = false;
            self.lifecycle.died_at = Some(now);
            tracing::info!(
                creature = self.identity.id,
                name = %self.identity.name,
                "Creature died of neglect"
            );
            return true;
        }
        false
    }

    fn recent_walks(&self, now: DateTime<Utc>) -> usize {
        let window_start = now - Duration::days(WALK_WINDOW_DAYS);
        self.history
            .walks
            .iter()
            .filter(|t| **t >= window_start)
            .count()
    }

    fn update_biotype(&mut self, now: DateTime<Utc>) {
        self.lifecycle.biotype = biotype_for(self.history.food.len(), self.age_at(now));
    }

    fn update_condition(&mut self, now: DateTime<Utc>) {
        let days_since = whole_days(self.care.last_walk_time, now);
        self.lifecycle.condition = condition_for(days_since, self.recent_walks(now));
    }

    fn add_item(&mut self, instance: InstanceId) {
        self.equipped.push(instance);
    }

    fn remove_item(&mut self, instance: InstanceId) -> Result<(), ItemNotEquipped> {
        let pos = self
            .equipped
            .iter()
            .position(|i| *i == instance)
            .ok_or(ItemNotEquipped(instance))?;
        self.equipped.remove(pos);
        Ok(())
    }
}
