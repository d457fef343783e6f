// Per-player input state management

use super::action::Action;
use std::collections::HashSet;

/// Input state for the local player.
///
/// Filled by whatever polls the devices (outside this crate), read by the
/// state machine. States may [`consume`](PlayerInput::consume) an action to
/// clear its edge so it cannot re-trigger.
#[derive(Debug, Default, Clone)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear an action without producing a release event.
    /// Returns true if the action was pressed.
    pub fn consume(&mut self, action: Action) -> bool {
        self.just_pressed.remove(&action);
        self.pressed.remove(&action)
    }

    /// Update input state for a new frame
    /// Call this once per frame after the simulation has read it
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// First pressed action in `priority`, if any
    pub fn first_pressed(&self, priority: &[Action]) -> Option<Action> {
        priority.iter().copied().find(|action| self.is_pressed(*action))
    }
}
