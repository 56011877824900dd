//! Core data structures for the Blockagotchi simulation.
//!
//! Plain, serializable state only. The rules that move this state forward
//! live in `blockagotchi_core`.

pub mod data;

pub use data::creature::{
    Biotype, CareState, Condition, Creature, CreatureIdentity, History, Lifecycle, Stage, SubType,
};
pub use data::food::FoodKind;
pub use data::item::{Holder, Item, ItemInstance};
pub use data::user::User;

/// Numeric creature identifier, assigned monotonically starting at 1.
pub type CreatureId = u64;
/// Catalog item identifier.
pub type ItemId = u32;
/// Identifier of a purchased item copy.
pub type InstanceId = u64;
