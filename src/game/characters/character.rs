// Player character: owns the input state and the activity state machine

use log::debug;

use super::machine::PlayerStateMachine;
use super::state::{PlayerState, StateKind};
use crate::config::ControllerConfig;
use crate::engine::input::{Action, PlayerInput};
use crate::game::items::{NodeId, PickupId};
use crate::game::world::PlayerWorld;

/// Something the character is currently touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A loose item that can be picked up
    Pickup(PickupId),
    /// A resource node that can be gathered
    Gatherable(NodeId),
}

/// The player-controlled character
#[derive(Debug)]
pub struct Character {
    /// Character name (for display)
    pub name: String,
    /// Input state, filled by the input layer each frame
    pub input: PlayerInput,
    /// State machine for character behavior
    state_machine: PlayerStateMachine,
}

impl Character {
    /// Spawn the character in Ready
    pub fn new<W: PlayerWorld + ?Sized>(
        name: &str,
        config: ControllerConfig,
        world: &mut W,
    ) -> Self {
        Self {
            name: name.to_string(),
            input: PlayerInput::new(),
            state_machine: PlayerStateMachine::new(config, world),
        }
    }

    /// Advance one simulation tick. Does nothing once the game is over.
    pub fn update<W: PlayerWorld + ?Sized>(&mut self, dt: f32, world: &mut W) {
        if world.is_game_over() {
            return;
        }
        self.state_machine.tick(dt, &mut self.input, world);
    }

    /// React to a contact while interact is held. Returns true if something
    /// happened (item picked up or gathering started).
    pub fn interact<W: PlayerWorld + ?Sized>(
        &mut self,
        contact: Contact,
        world: &mut W,
    ) -> bool {
        if world.is_game_over() || !self.input.is_pressed(Action::Interact) {
            return false;
        }

        match contact {
            Contact::Pickup(id) => {
                // Pickups without an item are ignored
                let Some(item) = world.pickup(id).cloned() else {
                    return false;
                };
                if !world.add_item(&item, 1) {
                    debug!("No room for {}, leaving pickup {:?}", item.name, id);
                    return false;
                }
                world.destroy_pickup(id);
                debug!("{} picked up {}", self.name, item.name);
                true
            }
            Contact::Gatherable(node) => {
                self.state_machine
                    .begin_gathering(node, &mut self.input, world)
            }
        }
    }

    /// Get the current state
    pub fn state(&self) -> &PlayerState {
        self.state_machine.state()
    }

    pub fn state_kind(&self) -> StateKind {
        self.state_machine.kind()
    }

    pub fn state_machine(&self) -> &PlayerStateMachine {
        &self.state_machine
    }

    /// Check if character is alive
    pub fn is_alive(&self) -> bool {
        self.state_machine.kind() != StateKind::Dead
    }

    /// Clear per-frame input edges (called at end of frame)
    pub fn clear_input(&mut self) {
        self.input.update();
    }
}
