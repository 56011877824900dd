//! Core data structures for the Blockagotchi simulation.

pub mod creature;
pub mod food;
pub mod item;
pub mod user;
