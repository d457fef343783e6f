// Player activity states and their transition rules

use log::{debug, info};
use rand::rngs::SmallRng;

use super::ability::{AbilityKind, AbilityTenure};
use super::gathering::GatherTenure;
use crate::config::ControllerConfig;
use crate::engine::input::{Action, PlayerInput};
use crate::game::items::NodeId;
use crate::game::world::{AnimationId, PlayerWorld};

/// Payload-free tag of a [`PlayerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Ready,
    Rolling,
    BasicAttack,
    BasicAbility,
    SpecializedAbility,
    Gathering,
    Dead,
}

impl StateKind {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Rolling => "rolling",
            Self::BasicAttack => "basic_attack",
            Self::BasicAbility => "basic_ability",
            Self::SpecializedAbility => "specialized_ability",
            Self::Gathering => "gathering",
            Self::Dead => "dead",
        }
    }
}

/// State to construct on a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRequest {
    Ready,
    Rolling,
    BasicAttack,
    BasicAbility,
    SpecializedAbility,
    Gathering(NodeId),
    Dead,
}

/// Outcome of one `handle_input` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep the current instance; nothing else happens
    Stay,
    /// Leave the current state and construct the requested one
    To(StateRequest),
}

/// Everything a state may read or command during one tick
pub struct StateContext<'a, W: ?Sized> {
    pub input: &'a mut PlayerInput,
    pub world: &'a mut W,
    pub config: &'a ControllerConfig,
    pub rng: &'a mut SmallRng,
}

/// What the player character is currently doing
#[derive(Debug)]
pub enum PlayerState {
    /// Free to move and act
    Ready,
    /// Dodge roll; movement locked until the roll clip ends
    Rolling,
    /// Single melee swing
    BasicAttack,
    /// Secondary ability, held until its cast completes
    BasicAbility(AbilityTenure),
    /// Special ability, held until its cast completes
    SpecializedAbility(AbilityTenure),
    /// Harvesting a resource node
    Gathering(GatherTenure),
    /// Terminal
    Dead,
}

impl PlayerState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Ready => StateKind::Ready,
            Self::Rolling => StateKind::Rolling,
            Self::BasicAttack => StateKind::BasicAttack,
            Self::BasicAbility(_) => StateKind::BasicAbility,
            Self::SpecializedAbility(_) => StateKind::SpecializedAbility,
            Self::Gathering(_) => StateKind::Gathering,
            Self::Dead => StateKind::Dead,
        }
    }

    /// Dead never leaves and is exempt from the alive guard
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Construct the Ready state, running its entry effects
    pub fn ready<W: PlayerWorld + ?Sized>(world: &mut W) -> Self {
        world.set_movement_enabled(true);
        Self::Ready
    }

    /// Construct the requested state, running its entry effects
    pub fn enter<W: PlayerWorld + ?Sized>(
        request: StateRequest,
        ctx: &mut StateContext<'_, W>,
    ) -> Self {
        match request {
            StateRequest::Ready => Self::ready(ctx.world),
            StateRequest::Rolling => {
                ctx.world.set_movement_enabled(false);
                ctx.world.play(AnimationId::Roll);
                ctx.input.consume(Action::Dodge);
                Self::Rolling
            }
            StateRequest::BasicAttack => {
                ctx.world.rotate_to_aim();
                ctx.world.melee_attack();
                Self::BasicAttack
            }
            StateRequest::BasicAbility => {
                Self::BasicAbility(AbilityTenure::begin(AbilityKind::Basic, ctx.world))
            }
            StateRequest::SpecializedAbility => Self::SpecializedAbility(AbilityTenure::begin(
                AbilityKind::Specialized,
                ctx.world,
            )),
            StateRequest::Gathering(node) => {
                Self::Gathering(GatherTenure::begin(node, ctx.world, ctx.config))
            }
            StateRequest::Dead => {
                info!("Player died, game over");
                ctx.world.set_game_over();
                ctx.world.play(AnimationId::Die);
                ctx.world.set_movement_enabled(false);
                Self::Dead
            }
        }
    }

    /// Variant-specific transition rule for one tick. The alive guard runs
    /// before this in the state machine, not here.
    pub fn handle_input<W: PlayerWorld + ?Sized>(
        &mut self,
        dt: f32,
        ctx: &mut StateContext<'_, W>,
    ) -> Transition {
        match self {
            Self::Ready => Self::ready_input(ctx),
            Self::Rolling => {
                if ctx.world.current_animation() == AnimationId::Roll {
                    return Transition::Stay;
                }
                ctx.world.set_movement_enabled(true);
                Transition::To(StateRequest::Ready)
            }
            Self::BasicAttack => Self::attack_exit(&*ctx.world),
            // Casts gate the exit: wait for completion, then return to Ready
            Self::BasicAbility(tenure) | Self::SpecializedAbility(tenure) => {
                if tenure.poll(ctx.world, ctx.config) {
                    Transition::To(StateRequest::Ready)
                } else {
                    Transition::Stay
                }
            }
            Self::Gathering(tenure) => {
                if tenure.update(dt, ctx.world, ctx.config, ctx.rng) {
                    Transition::To(StateRequest::Ready)
                } else {
                    Transition::Stay
                }
            }
            Self::Dead => Transition::Stay,
        }
    }

    /// Release anything this tenure still owns. Called when superseded.
    pub fn exit<W: PlayerWorld + ?Sized>(&mut self, ctx: &mut StateContext<'_, W>) {
        match self {
            Self::BasicAbility(tenure) | Self::SpecializedAbility(tenure) => {
                tenure.release(ctx.world)
            }
            Self::Gathering(tenure) => tenure.release(ctx.world),
            Self::Ready | Self::Rolling | Self::BasicAttack | Self::Dead => {}
        }
    }

    fn ready_input<W: PlayerWorld + ?Sized>(ctx: &mut StateContext<'_, W>) -> Transition {
        if ctx.world.current_animation() == ctx.config.ability_lockout {
            return Transition::Stay;
        }

        let request = match ctx.input.first_pressed(&Action::READY_PRIORITY) {
            Some(Action::PrimaryAttack) => StateRequest::BasicAttack,
            Some(Action::SecondaryAbility) => StateRequest::BasicAbility,
            Some(Action::SpecialAbility) => StateRequest::SpecializedAbility,
            Some(Action::Dodge) => StateRequest::Rolling,
            Some(Action::Interact) | None => return Transition::Stay,
        };
        debug!("Ready picked {:?}", request);
        Transition::To(request)
    }

    /// Shared exit rule of the attacking family: done once the animator is
    /// back in Idle
    fn attack_exit<W: PlayerWorld + ?Sized>(world: &W) -> Transition {
        if world.current_animation() == AnimationId::Idle {
            Transition::To(StateRequest::Ready)
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::testing::{Call, FakeWorld};
    use crate::game::items::MaterialType;
    use glam::Vec3;
    use rand::SeedableRng;

    struct Harness {
        world: FakeWorld,
        input: PlayerInput,
        config: ControllerConfig,
        rng: SmallRng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                world: FakeWorld::new(),
                input: PlayerInput::new(),
                config: ControllerConfig::default(),
                rng: SmallRng::seed_from_u64(3),
            }
        }

        fn ctx(&mut self) -> StateContext<'_, FakeWorld> {
            StateContext {
                input: &mut self.input,
                world: &mut self.world,
                config: &self.config,
                rng: &mut self.rng,
            }
        }

        fn enter(&mut self, request: StateRequest) -> PlayerState {
            PlayerState::enter(request, &mut self.ctx())
        }

        fn step(&mut self, state: &mut PlayerState, dt: f32) -> Transition {
            state.handle_input(dt, &mut self.ctx())
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(StateKind::Ready.name(), "ready");
        assert_eq!(StateKind::SpecializedAbility.name(), "specialized_ability");
    }

    #[test]
    fn test_ready_enables_movement() {
        let mut h = Harness::new();
        let state = h.enter(StateRequest::Ready);
        assert_eq!(state.kind(), StateKind::Ready);
        assert_eq!(h.world.calls, vec![Call::Movement(true)]);
    }

    #[test]
    fn test_ready_without_input_stays() {
        let mut h = Harness::new();
        let mut state = PlayerState::Ready;
        assert_eq!(h.step(&mut state, 0.1), Transition::Stay);
    }

    #[test]
    fn test_ready_priority_order() {
        let cases = [
            (
                vec![Action::PrimaryAttack, Action::SecondaryAbility],
                StateRequest::BasicAttack,
            ),
            (
                vec![Action::Dodge, Action::SecondaryAbility],
                StateRequest::BasicAbility,
            ),
            (
                vec![Action::Dodge, Action::SpecialAbility],
                StateRequest::SpecializedAbility,
            ),
            (vec![Action::Dodge], StateRequest::Rolling),
        ];

        for (pressed, expected) in cases {
            let mut h = Harness::new();
            for action in &pressed {
                h.input.press(*action);
            }
            let mut state = PlayerState::Ready;
            assert_eq!(
                h.step(&mut state, 0.1),
                Transition::To(expected),
                "pressed {pressed:?}"
            );
        }
    }

    #[test]
    fn test_interact_alone_does_not_leave_ready() {
        let mut h = Harness::new();
        h.input.press(Action::Interact);
        let mut state = PlayerState::Ready;
        assert_eq!(h.step(&mut state, 0.1), Transition::Stay);
    }

    #[test]
    fn test_lockout_animation_blocks_ready() {
        let mut h = Harness::new();
        h.world.animation = AnimationId::AbilityFinish;
        h.input.press(Action::PrimaryAttack);
        let mut state = PlayerState::Ready;
        assert_eq!(h.step(&mut state, 0.1), Transition::Stay);

        h.world.animation = AnimationId::Idle;
        assert_eq!(
            h.step(&mut state, 0.1),
            Transition::To(StateRequest::BasicAttack)
        );
    }

    #[test]
    fn test_rolling_entry_consumes_dodge() {
        let mut h = Harness::new();
        h.input.press(Action::Dodge);
        let state = h.enter(StateRequest::Rolling);

        assert_eq!(state.kind(), StateKind::Rolling);
        assert!(!h.input.is_pressed(Action::Dodge));
        assert_eq!(
            h.world.calls,
            vec![Call::Movement(false), Call::Play(AnimationId::Roll)]
        );
    }

    #[test]
    fn test_rolling_holds_while_roll_plays() {
        let mut h = Harness::new();
        let mut state = h.enter(StateRequest::Rolling);
        h.world.animation = AnimationId::Roll;

        for _ in 0..1000 {
            assert_eq!(h.step(&mut state, 0.016), Transition::Stay);
        }

        h.world.animation = AnimationId::Idle;
        h.world.calls.clear();
        assert_eq!(
            h.step(&mut state, 0.016),
            Transition::To(StateRequest::Ready)
        );
        assert_eq!(h.world.calls, vec![Call::Movement(true)]);
    }

    #[test]
    fn test_basic_attack_entry_and_exit() {
        let mut h = Harness::new();
        let mut state = h.enter(StateRequest::BasicAttack);
        assert_eq!(h.world.calls, vec![Call::RotateToAim, Call::MeleeAttack]);

        h.world.animation = AnimationId::Attack;
        assert_eq!(h.step(&mut state, 0.1), Transition::Stay);

        h.world.animation = AnimationId::Idle;
        assert_eq!(
            h.step(&mut state, 0.1),
            Transition::To(StateRequest::Ready)
        );
    }

    #[test]
    fn test_ability_ignores_idle_until_cast_completes() {
        let mut h = Harness::new();
        let mut state = h.enter(StateRequest::SpecializedAbility);
        h.world.animation = AnimationId::Idle;

        for _ in 0..10 {
            assert_eq!(h.step(&mut state, 0.1), Transition::Stay);
        }
        assert_eq!(
            h.world.count(|c| matches!(c, Call::StartAbility(_))),
            1
        );

        h.world.complete_casts = true;
        assert_eq!(
            h.step(&mut state, 0.1),
            Transition::To(StateRequest::Ready)
        );
    }

    #[test]
    fn test_ability_exit_before_completion_cancels() {
        let mut h = Harness::new();
        let mut state = h.enter(StateRequest::BasicAbility);
        let handle = match &state {
            PlayerState::BasicAbility(tenure) => tenure.handle().unwrap(),
            other => panic!("unexpected state {other:?}"),
        };

        state.exit(&mut h.ctx());
        assert!(h.world.calls.contains(&Call::Cancel(handle)));
    }

    #[test]
    fn test_gathering_enters_and_finishes() {
        let mut h = Harness::new();
        h.world
            .add_node(NodeId(1), Vec3::new(1.0, 0.0, 1.0), 4, MaterialType::Wood);
        let mut state = h.enter(StateRequest::Gathering(NodeId(1)));
        assert_eq!(state.kind(), StateKind::Gathering);

        assert_eq!(h.step(&mut state, 0.5), Transition::Stay);
        assert_eq!(
            h.step(&mut state, 0.5),
            Transition::To(StateRequest::Ready)
        );
        assert_eq!(h.world.nodes[&NodeId(1)].remaining, 3);
    }

    #[test]
    fn test_dead_entry_and_absorbing() {
        let mut h = Harness::new();
        let mut state = h.enter(StateRequest::Dead);

        assert!(state.is_terminal());
        assert!(h.world.game_over);
        assert_eq!(
            h.world.calls,
            vec![
                Call::GameOver,
                Call::Play(AnimationId::Die),
                Call::Movement(false)
            ]
        );

        for action in Action::ALL {
            h.input.press(action);
        }
        h.world.complete_casts = true;
        for _ in 0..10 {
            assert_eq!(h.step(&mut state, 1.0), Transition::Stay);
        }
    }
}
