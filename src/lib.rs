//! Player activity state machine for an action game character.
//!
//! The character moves between Ready, Rolling, attacking, ability casting,
//! gathering and Dead. States own the resources they acquire on entry and
//! release them when superseded; the world they act on is a set of traits
//! in [`game::world`].

pub mod config;
pub mod core;
pub mod engine;
pub mod game;
