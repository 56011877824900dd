use crate::{CreatureId, InstanceId, ItemId};
use serde::{Deserialize, Serialize};

/// Catalog entry. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub name: String,
    pub description: String,
    pub price: u64,
}

impl Item {
    pub fn new(item_id: ItemId, name: &str, description: &str, price: u64) -> Self {
        Self {
            item_id,
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }
}

/// The single holder of an item instance at any point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "holder", content = "id", rename_all = "snake_case")]
pub enum Holder {
    Inventory(String),
    Equipped(CreatureId),
}

/// A purchased copy of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub instance_id: InstanceId,
    pub item_id: ItemId,
    pub holder: Holder,
}
