//! Sequential command processor.
//!
//! Every command runs to completion before the next one starts and yields
//! exactly one [`Outcome`]. Handlers check all preconditions first, then
//! perform the ledger transfer, then mutate the world.
//!
//! ## Atomicity
//!
//! The ledger is an external collaborator. A failed transfer aborts the
//! command before any world mutation, and once a transfer succeeds the
//! remaining steps cannot fail. A crash *between* the transfer and the world
//! mutation is outside what this processor can prevent: true atomicity
//! across both depends on the host committing them in one transaction.

use crate::catalog::Catalog;
use crate::command::{Action, Command, Event, Outcome};
use crate::config::AppConfig;
use crate::error::{CommandError, Result};
use crate::evolution::{strategy_for, EvolutionStrategy};
use crate::ledger::Ledger;
use crate::lifecycle::{create_creature, CreatureLogic, LifecycleContext, Transition};
use crate::metrics::Metrics;
use crate::world::WorldState;
use blockagotchi_data::{Creature, CreatureId, Holder, ItemId};
use chrono::{DateTime, Utc};

pub struct CommandProcessor {
    world: WorldState,
    config: AppConfig,
    strategy: Box<dyn EvolutionStrategy>,
    metrics: Metrics,
    clock: Option<DateTime<Utc>>,
}

impl CommandProcessor {
    /// Builds a processor with the strategy named in `config`.
    pub fn new(config: AppConfig, ledger: Box<dyn Ledger>, catalog: Box<dyn Catalog>) -> Self {
        let strategy = strategy_for(config.evolution.strategy);
        tracing::info!(
            strategy = strategy.name(),
            supply_cap = config.world.supply_cap,
            fingerprint = %config.fingerprint(),
            "Command processor ready"
        );
        Self {
            world: WorldState::new(config.world.supply_cap, ledger, catalog),
            config,
            strategy,
            metrics: Metrics::new(),
            clock: None,
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn EvolutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn strategy(&self) -> &dyn EvolutionStrategy {
        self.strategy.as_ref()
    }

    /// Time of the last processed command.
    #[must_use]
    pub fn clock(&self) -> Option<DateTime<Utc>> {
        self.clock
    }

    pub fn process(&mut self, command: &Command) -> Outcome {
        let now = self.advance_clock(command.timestamp);
        let actor = command.actor.to_lowercase();
        let action = command.action.name();

        self.sweep_neglect(&actor, now);

        let outcome = match self.apply(&actor, now, &command.action) {
            Ok(event) => {
                tracing::info!(
                    action,
                    actor = %actor,
                    creature = ?event.creature_id,
                    "Command accepted"
                );
                Outcome::Accepted { event }
            }
            Err(err) => {
                tracing::warn!(
                    action,
                    actor = %actor,
                    kind = err.kind(),
                    reason = %err,
                    "Command rejected"
                );
                err.into()
            }
        };
        self.metrics.record_command(action, outcome.is_accepted());
        outcome
    }

    /// Decodes and processes one JSON command. Undecodable input is rejected
    /// without touching the clock.
    pub fn process_json(&mut self, text: &str) -> Outcome {
        match Command::from_json(text) {
            Ok(command) => self.process(&command),
            Err(err) => self.reject_malformed(err),
        }
    }

    /// Records input that never became a [`Command`].
    pub fn reject_malformed(&mut self, err: CommandError) -> Outcome {
        tracing::warn!(kind = err.kind(), reason = %err, "Command rejected");
        self.metrics.record_command("malformed", false);
        err.into()
    }

    /// The clock never moves backwards.
    fn advance_clock(&mut self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let now = match self.clock {
            Some(last) if timestamp < last => last,
            _ => timestamp,
        };
        self.clock = Some(now);
        now
    }

    /// Runs the neglect check on the actor's creature, whatever the command.
    fn sweep_neglect(&mut self, actor: &str, now: DateTime<Utc>) {
        let Some(id) = self.world.user(actor).and_then(|u| u.creature) else {
            return;
        };
        let neglect_days = self.config.care.neglect_days;
        if let Some(creature) = self.world.creature_mut(id) {
            if creature.check_neglect(now, neglect_days) {
                self.metrics.record_death();
            }
        }
    }

    fn apply(&mut self, actor: &str, now: DateTime<Utc>, action: &Action) -> Result<Event> {
        match action {
            Action::CreateCreature { name } => self.create(actor, name, now),
            Action::Feed { food_type } => {
                let (id, transition) = self.care(actor, "feed", |c, ctx| {
                    c.feed(food_type, now, ctx)
                })?;
                Ok(Event::new("feed_blockagotchi", actor)
                    .creature(id)
                    .transition(transition)
                    .field("food_type", food_type.as_str()))
            }
            Action::Walk { walk_type } => {
                let (id, transition) = self.care(actor, "walk", |c, ctx| {
                    c.walk(walk_type, now, ctx)
                })?;
                Ok(Event::new("walk_blockagotchi", actor)
                    .creature(id)
                    .transition(transition)
                    .field("walk_type", walk_type.as_str()))
            }
            Action::Bathe { bath_type, is_paid } => self.bathe(actor, bath_type, *is_paid, now),
            Action::BuyItem { item_id } => self.buy_item(actor, *item_id),
            Action::ApplyItem { item_id } => self.apply_item(actor, *item_id, now),
            Action::RemoveItem { item_id } => self.remove_item(actor, *item_id, now),
            Action::Deposit {
                beneficiary,
                amount,
            } => self.deposit(actor, beneficiary, *amount),
        }
    }

    fn living_creature_id(&self, actor: &str, verb: &str) -> Result<CreatureId> {
        self.world
            .living_creature_of(actor)
            .map(Creature::id)
            .ok_or_else(|| {
                CommandError::validation(format!(
                    "User {actor} does not have a blockagotchi to {verb}."
                ))
            })
    }

    fn ensure_funds(&self, actor: &str, amount: u64, purpose: &str) -> Result<()> {
        if self.world.balance(actor) < amount {
            return Err(CommandError::validation(format!(
                "User {actor} does not have enough Ether to {purpose}."
            )));
        }
        Ok(())
    }

    fn charge(&mut self, actor: &str, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let sink = self.config.world.sink_account.clone();
        self.world.ledger_mut().transfer(actor, &sink, amount)?;
        Ok(())
    }

    fn care<F>(
        &mut self,
        actor: &str,
        verb: &str,
        action: F,
    ) -> Result<(CreatureId, Option<Transition>)>
    where
        F: FnOnce(&mut Creature, LifecycleContext<'_>) -> Option<Transition>,
    {
        let id = self.living_creature_id(actor, verb)?;
        let ctx = LifecycleContext {
            care: &self.config.care,
            strategy: self.strategy.as_ref(),
        };
        let creature = self
            .world
            .creature_mut(id)
            .ok_or_else(|| CommandError::not_found(format!("creature {id}")))?;
        let transition = action(creature, ctx);
        if transition.is_some() {
            self.metrics.record_evolution();
        }
        Ok((id, transition))
    }

    fn create(&mut self, actor: &str, name: &str, now: DateTime<Utc>) -> Result<Event> {
        if self.world.supply_exhausted() {
            return Err(CommandError::validation(
                "Egg limit reached. Cannot create more blockagotchis.",
            ));
        }
        if self.world.living_creature_of(actor).is_some() {
            return Err(CommandError::validation(format!(
                "User {actor} already has a living blockagotchi."
            )));
        }
        let fee = self.config.economy.creation_fee;
        self.ensure_funds(actor, fee, "create a blockagotchi")?;

        self.charge(actor, fee)?;

        let id = self.world.allocate_creature()?;
        let creature = create_creature(id, actor, name, now, &self.config.care);
        self.world.insert_creature(creature);
        let user = self.world.ensure_user(actor);
        if let Some(previous) = user.creature.replace(id) {
            tracing::debug!(user = actor, previous, "Dead creature discarded");
        }
        Ok(Event::new("create_blockagotchi", actor)
            .creature(id)
            .field("name", name))
    }

    fn bathe(
        &mut self,
        actor: &str,
        bath_type: &str,
        paid: bool,
        now: DateTime<Utc>,
    ) -> Result<Event> {
        let id = self.living_creature_id(actor, "bathe")?;
        let price = self.config.economy.bath_price;
        if paid {
            self.ensure_funds(actor, price, "pay for a bath")?;
            self.charge(actor, price)?;
        }
        let (_, transition) =
            self.care(actor, "bathe", |c, ctx| c.bathe(bath_type, paid, now, ctx))?;
        Ok(Event::new("bathe_blockagotchi", actor)
            .creature(id)
            .transition(transition)
            .field("bath_type", bath_type)
            .field("is_paid", paid))
    }

    fn buy_item(&mut self, actor: &str, item_id: ItemId) -> Result<Event> {
        if self.world.user(actor).is_none() {
            return Err(CommandError::not_found(format!("user {actor}")));
        }
        let item = self.world.catalog_item(item_id)?;
        let (price, item_name) = (item.price, item.name.clone());
        self.ensure_funds(actor, price, &format!("buy item {item_name}"))?;

        self.charge(actor, price)?;

        let instance = self.world.mint_item(actor, item_id)?;
        Ok(Event::new("buy_item", actor)
            .field("item_id", item_id)
            .field("instance_id", instance)
            .field("price", price))
    }

    fn apply_item(&mut self, actor: &str, item_id: ItemId, now: DateTime<Utc>) -> Result<Event> {
        let id = self.living_creature_id(actor, "apply items to")?;
        let instance = self.world.find_in_inventory(actor, item_id).ok_or_else(|| {
            CommandError::validation(format!("User {actor} does not own item {item_id}."))
        })?;
        if self.world.find_equipped(id, item_id).is_some() {
            return Err(CommandError::validation(format!(
                "Item {item_id} is already equipped."
            )));
        }
        let bonus = happiness_of(self.world.catalog_item(item_id)?.price);

        self.world
            .move_item(instance, &Holder::Inventory(actor.to_string()), Holder::Equipped(id))?;
        if let Some(creature) = self.world.creature_mut(id) {
            creature.refresh_age(now);
            creature.adjust_happiness(bonus);
        }
        Ok(Event::new("apply_item", actor)
            .creature(id)
            .field("item_id", item_id)
            .field("instance_id", instance))
    }

    fn remove_item(&mut self, actor: &str, item_id: ItemId, now: DateTime<Utc>) -> Result<Event> {
        let id = self.living_creature_id(actor, "remove items from")?;
        let instance = self.world.find_equipped(id, item_id).ok_or_else(|| {
            CommandError::validation(format!("Item {item_id} is not equipped."))
        })?;
        let penalty = happiness_of(self.world.catalog_item(item_id)?.price);

        self.world
            .move_item(instance, &Holder::Equipped(id), Holder::Inventory(actor.to_string()))?;
        if let Some(creature) = self.world.creature_mut(id) {
            creature.refresh_age(now);
            creature.adjust_happiness(-penalty);
        }
        Ok(Event::new("remove_item", actor)
            .creature(id)
            .field("item_id", item_id)
            .field("instance_id", instance))
    }

    fn deposit(&mut self, actor: &str, beneficiary: &str, amount: u64) -> Result<Event> {
        if actor != self.config.world.portal_account {
            return Err(CommandError::validation(format!(
                "Deposits are only accepted from the portal, not {actor}."
            )));
        }
        if amount == 0 {
            return Err(CommandError::validation("Deposit amount must be positive."));
        }
        let beneficiary = beneficiary.to_lowercase();
        if beneficiary.is_empty() {
            return Err(CommandError::validation("Deposit needs a beneficiary."));
        }

        self.world.ledger_mut().deposit(&beneficiary, amount)?;

        Ok(Event::new("deposit", &beneficiary).field("amount", amount))
    }
}

fn happiness_of(price: u64) -> i64 {
    i64::try_from(price).unwrap_or(i64::MAX)
}
