//! In-memory world registry.
//!
//! [`WorldState`] is constructed explicitly and owned by the command
//! processor. Users and creatures live in ordered maps so that every
//! iteration (queries, ranking, digests) is reproducible.

use crate::catalog::Catalog;
use crate::error::{CommandError, Result};
use crate::ledger::Ledger;
use crate::lifecycle::CreatureLogic;
use blockagotchi_data::{
    Creature, CreatureId, Holder, InstanceId, Item, ItemId, ItemInstance, User,
};
use std::collections::BTreeMap;

/// Purchased item instances keyed by their own id.
///
/// Each instance carries exactly one [`Holder`]. The holder's own list
/// (a user inventory or a creature's equipped list) is kept in step by
/// [`WorldState::move_item`].
#[derive(Debug, Clone, Default)]
pub struct ItemArena {
    instances: BTreeMap<InstanceId, ItemInstance>,
    next_id: InstanceId,
}

impl ItemArena {
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.instances.get(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemInstance> {
        self.instances.values()
    }

    fn mint(&mut self, item_id: ItemId, holder: Holder) -> InstanceId {
        self.next_id += 1;
        let instance_id = self.next_id;
        self.instances.insert(
            instance_id,
            ItemInstance {
                instance_id,
                item_id,
                holder,
            },
        );
        instance_id
    }
}

pub struct WorldState {
    users: BTreeMap<String, User>,
    creatures: BTreeMap<CreatureId, Creature>,
    items: ItemArena,
    eggs_created: u32,
    supply_cap: u32,
    next_creature_id: CreatureId,
    ledger: Box<dyn Ledger>,
    catalog: Box<dyn Catalog>,
}

impl std::fmt::Debug for WorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldState")
            .field("users", &self.users.len())
            .field("creatures", &self.creatures.len())
            .field("items", &self.items.len())
            .field("eggs_created", &self.eggs_created)
            .field("supply_cap", &self.supply_cap)
            .finish()
    }
}

impl WorldState {
    pub fn new(supply_cap: u32, ledger: Box<dyn Ledger>, catalog: Box<dyn Catalog>) -> Self {
        Self {
            users: BTreeMap::new(),
            creatures: BTreeMap::new(),
            items: ItemArena::default(),
            eggs_created: 0,
            supply_cap,
            next_creature_id: 1,
            ledger,
            catalog,
        }
    }

    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Returns the user, registering an empty one on first contact.
    pub fn ensure_user(&mut self, id: &str) -> &mut User {
        self.users
            .entry(id.to_string())
            .or_insert_with(|| User::new(id))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    #[must_use]
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn insert_creature(&mut self, creature: Creature) {
        self.creatures.insert(creature.id(), creature);
    }

    /// Every creature ever created, dead ones included, ordered by id.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    /// The user's current creature, alive or not.
    #[must_use]
    pub fn creature_of(&self, user_id: &str) -> Option<&Creature> {
        let id = self.user(user_id)?.creature?;
        self.creature(id)
    }

    /// The user's current creature, only while alive.
    #[must_use]
    pub fn living_creature_of(&self, user_id: &str) -> Option<&Creature> {
        self.creature_of(user_id).filter(|c| c.is_alive())
    }

    #[must_use]
    pub fn eggs_created(&self) -> u32 {
        self.eggs_created
    }

    #[must_use]
    pub fn supply_cap(&self) -> u32 {
        self.supply_cap
    }

    #[must_use]
    pub fn supply_exhausted(&self) -> bool {
        self.eggs_created >= self.supply_cap
    }

    /// Hands out the next creature id and counts the egg against the cap.
    pub fn allocate_creature(&mut self) -> Result<CreatureId> {
        if self.supply_exhausted() {
            return Err(CommandError::validation(
                "Egg limit reached. Cannot create more blockagotchis.",
            ));
        }
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        self.eggs_created += 1;
        Ok(id)
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> &mut dyn Ledger {
        self.ledger.as_mut()
    }

    #[must_use]
    pub fn balance(&self, account: &str) -> u64 {
        self.ledger.balance(account)
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn catalog_item(&self, id: ItemId) -> Result<&Item> {
        self.catalog
            .item(id)
            .ok_or_else(|| CommandError::not_found(format!("item {id}")))
    }

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    /// First instance of catalog item `item_id` in the user's inventory.
    #[must_use]
    pub fn find_in_inventory(&self, user_id: &str, item_id: ItemId) -> Option<InstanceId> {
        let user = self.user(user_id)?;
        self.first_of(&user.inventory, item_id)
    }

    /// First instance of catalog item `item_id` equipped on the creature.
    #[must_use]
    pub fn find_equipped(&self, creature_id: CreatureId, item_id: ItemId) -> Option<InstanceId> {
        let creature = self.creature(creature_id)?;
        self.first_of(&creature.equipped, item_id)
    }

    fn first_of(&self, held: &[InstanceId], item_id: ItemId) -> Option<InstanceId> {
        held.iter()
            .copied()
            .find(|id| self.items.get(*id).is_some_and(|i| i.item_id == item_id))
    }

    /// Creates a new instance in an existing user's inventory.
    pub fn mint_item(&mut self, user_id: &str, item_id: ItemId) -> Result<InstanceId> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| CommandError::not_found(format!("user {user_id}")))?;
        let instance = self
            .items
            .mint(item_id, Holder::Inventory(user_id.to_string()));
        user.inventory.push(instance);
        Ok(instance)
    }

    /// Moves an instance between holders.
    ///
    /// Fails without touching anything unless the instance is currently
    /// held by `from` and `to` names an existing user or creature.
    pub fn move_item(&mut self, instance: InstanceId, from: &Holder, to: Holder) -> Result<()> {
        let current = self
            .items
            .get(instance)
            .ok_or_else(|| CommandError::not_found(format!("item instance {instance}")))?;
        if &current.holder != from {
            return Err(CommandError::validation(format!(
                "item instance {instance} is not held by {from:?}"
            )));
        }
        let destination_exists = match &to {
            Holder::Inventory(user) => self.users.contains_key(user),
            Holder::Equipped(creature) => self.creatures.contains_key(creature),
        };
        if !destination_exists {
            return Err(CommandError::not_found(format!("holder {to:?}")));
        }

        match from {
            Holder::Inventory(user) => {
                let user = self
                    .users
                    .get_mut(user)
                    .ok_or_else(|| CommandError::not_found(format!("user {user}")))?;
                let pos = user
                    .inventory
                    .iter()
                    .position(|i| *i == instance)
                    .ok_or_else(|| {
                        CommandError::validation(format!("item {instance} not in inventory"))
                    })?;
                user.inventory.remove(pos);
            }
            Holder::Equipped(creature) => {
                self.creatures
                    .get_mut(creature)
                    .ok_or_else(|| CommandError::not_found(format!("creature {creature}")))?
                    .remove_item(instance)?;
            }
        }

        match &to {
            Holder::Inventory(user) => {
                if let Some(user) = self.users.get_mut(user) {
                    user.inventory.push(instance);
                }
            }
            Holder::Equipped(creature) => {
                if let Some(creature) = self.creatures.get_mut(creature) {
                    creature.add_item(instance);
                }
            }
        }
        if let Some(entry) = self.items.instances.get_mut(&instance) {
            entry.holder = to;
        }
        Ok(())
    }
}
