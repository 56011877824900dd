//! Static shop catalog.

use blockagotchi_data::{Item, ItemId};
use std::collections::BTreeMap;

pub trait Catalog {
    fn item(&self, id: ItemId) -> Option<&Item>;
    /// Every item, ordered by id.
    fn all_items(&self) -> Vec<&Item>;
}

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::with_items(vec![
            Item::new(1, "Hat", "A nice hat for your blockagotchi", 10),
            Item::new(2, "Glasses", "Cool glasses for your blockagotchi", 15),
            Item::new(3, "Scarf", "A warm scarf for your blockagotchi", 20),
            Item::new(4, "Gotchi-Winter", "Winter skin for your blockagotchi device", 30),
            Item::new(5, "Gotchi-Summer", "Summer skin for your blockagotchi device", 30),
            Item::new(6, "Gotchi-Fall", "Fall skin for your blockagotchi device", 30),
            Item::new(7, "Gotchi-Spring", "Spring skin for your blockagotchi device", 30),
        ])
    }
}

impl StaticCatalog {
    /// Later entries win on duplicate ids.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.item_id, item)).collect(),
        }
    }
}

impl Catalog for StaticCatalog {
    fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    fn all_items(&self) -> Vec<&Item> {
        self.items.values().collect()
    }
}
