use crate::{CreatureId, InstanceId};
use serde::{Deserialize, Serialize};

/// A player account inside the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Current creature, alive or not yet discarded.
    pub creature: Option<CreatureId>,
    /// Purchased but unequipped item instances, in acquisition order.
    pub inventory: Vec<InstanceId>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            creature: None,
            inventory: Vec::new(),
        }
    }
}
