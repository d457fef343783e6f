// Player state machine driver

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::state::{PlayerState, StateContext, StateKind, StateRequest, Transition};
use crate::config::ControllerConfig;
use crate::engine::input::PlayerInput;
use crate::game::items::NodeId;
use crate::game::world::PlayerWorld;

/// Holds the single active [`PlayerState`] and advances it once per tick.
///
/// Each tick first runs the alive guard: any non-terminal state is replaced
/// by Dead as soon as the health collaborator reports the player dead.
/// Otherwise the active state's rule runs and its [`Transition`] is applied:
/// the old state's exit cleanup, then the new state's entry effects.
#[derive(Debug)]
pub struct PlayerStateMachine {
    state: PlayerState,
    previous: StateKind,
    state_time: f32,
    changed: bool,
    config: ControllerConfig,
    rng: SmallRng,
}

impl PlayerStateMachine {
    /// Start in Ready, running its entry effects
    pub fn new<W: PlayerWorld + ?Sized>(config: ControllerConfig, world: &mut W) -> Self {
        let rng = SmallRng::seed_from_u64(config.rng_seed);
        Self {
            state: PlayerState::ready(world),
            previous: StateKind::Ready,
            state_time: 0.0,
            changed: true,
            config,
            rng,
        }
    }

    /// Get the current state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Get the kind of the state before the last transition
    pub fn previous_kind(&self) -> StateKind {
        self.previous
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if the last tick (or construction) changed the state
    pub fn state_just_changed(&self) -> bool {
        self.changed
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Advance the machine by one simulation tick
    pub fn tick<W: PlayerWorld + ?Sized>(
        &mut self,
        dt: f32,
        input: &mut PlayerInput,
        world: &mut W,
    ) {
        self.changed = false;

        if !self.state.is_terminal() && !world.is_alive() {
            self.transition(StateRequest::Dead, input, world);
            return;
        }

        let transition = {
            let mut ctx = StateContext {
                input: &mut *input,
                world: &mut *world,
                config: &self.config,
                rng: &mut self.rng,
            };
            self.state.handle_input(dt, &mut ctx)
        };
        match transition {
            Transition::Stay => self.state_time += dt,
            Transition::To(request) => self.transition(request, input, world),
        }
    }

    /// Start gathering `node`. Only allowed from Ready while alive; returns
    /// whether the state changed.
    pub fn begin_gathering<W: PlayerWorld + ?Sized>(
        &mut self,
        node: NodeId,
        input: &mut PlayerInput,
        world: &mut W,
    ) -> bool {
        if self.kind() != StateKind::Ready || !world.is_alive() {
            return false;
        }
        if world.node(node).is_none() {
            warn!("Ignoring gather request for missing {:?}", node);
            return false;
        }
        self.transition(StateRequest::Gathering(node), input, world);
        true
    }

    fn transition<W: PlayerWorld + ?Sized>(
        &mut self,
        request: StateRequest,
        input: &mut PlayerInput,
        world: &mut W,
    ) {
        let mut ctx = StateContext {
            input,
            world,
            config: &self.config,
            rng: &mut self.rng,
        };
        self.state.exit(&mut ctx);
        let next = PlayerState::enter(request, &mut ctx);

        info!(
            "Player state: {} -> {}",
            self.state.kind().name(),
            next.kind().name()
        );
        self.previous = self.state.kind();
        self.state = next;
        self.state_time = 0.0;
        self.changed = true;
    }
}
