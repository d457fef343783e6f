// Character system
//
// This module contains everything related to the player character:
// - Character aggregate owning input and the state machine
// - Activity states (ready, rolling, attacks, abilities, gathering, dead)
// - State machine driver with the alive guard
// - Per-tenure ownership of ability casts and gathering countdowns

pub mod ability;
pub mod character;
pub mod gathering;
pub mod machine;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use ability::{AbilityCast, AbilityHandle, AbilityKind, AbilityTenure, EffectId};
pub use character::{Character, Contact};
pub use gathering::GatherTenure;
pub use machine::PlayerStateMachine;
pub use state::{PlayerState, StateContext, StateKind, StateRequest, Transition};
