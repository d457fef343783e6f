// Input handling system
//
// Device polling lives outside this crate. This module only holds the
// per-frame action state the player state machine reads:
//
// - `action`: Game actions and the Ready-state priority order
// - `player`: Per-player pressed / just-pressed tracking with edge consumption
//
// ## Usage Example
//
// ```rust
// use player_fsm::engine::input::{Action, PlayerInput};
//
// let mut input = PlayerInput::new();
// input.press(Action::Dodge);
// // ... run the simulation step, which may consume the dodge edge ...
// input.update();
// ```

pub mod action;
pub mod player;

// Re-export commonly used types
pub use action::Action;
pub use player::PlayerInput;
