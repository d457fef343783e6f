use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{info, warn};

use player_fsm::config::ControllerConfig;
use player_fsm::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use player_fsm::engine::input::Action;
use player_fsm::game::characters::{Character, Contact};
use player_fsm::game::items::{ItemDescriptor, MaterialType, NodeId, PickupId};
use player_fsm::game::sandbox::{HudEvent, Sandbox};
use player_fsm::game::world::GameFlags;

/// Headless run of the player state machine against the sandbox world
#[derive(Parser, Debug)]
#[command(name = "player-fsm")]
#[command(about = "Drive the player activity state machine with a scripted input timeline")]
struct Args {
    /// TOML file overriding the controller tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the gather jitter RNG (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rendered frames to simulate
    #[arg(long, default_value_t = 900)]
    frames: u64,

    /// Wall time of each rendered frame in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

/// One scripted input event
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press(Action),
    Release(Action),
    Gather,
    TakePickup,
    Damage(i32),
}

/// Input timeline, keyed by fixed simulation step
const SCRIPT: &[(u64, Cue)] = &[
    (5, Cue::Press(Action::Interact)),
    (5, Cue::TakePickup),
    (6, Cue::Gather),
    (7, Cue::Release(Action::Interact)),
    (90, Cue::Press(Action::Dodge)),
    (150, Cue::Press(Action::PrimaryAttack)),
    (152, Cue::Release(Action::PrimaryAttack)),
    (210, Cue::Press(Action::SecondaryAbility)),
    (212, Cue::Release(Action::SecondaryAbility)),
    // Pressed during the recovery pose, fires once it ends
    (250, Cue::Press(Action::SpecialAbility)),
    (300, Cue::Release(Action::SpecialAbility)),
    (400, Cue::Press(Action::Interact)),
    (400, Cue::Gather),
    (401, Cue::Release(Action::Interact)),
    (480, Cue::Press(Action::SecondaryAbility)),
    (490, Cue::Damage(1000)),
];

struct Props {
    node: NodeId,
    pickup: PickupId,
}

fn populate(world: &mut Sandbox) -> Result<Props> {
    let wood = ItemDescriptor::new("Wood", MaterialType::Wood, 0);
    let node = world
        .spawn_node(Vec3::new(3.0, 0.5, 1.0), 2, wood)
        .context("Failed to spawn tree")?;
    let berry = ItemDescriptor::new("Berry", MaterialType::Fiber, 3);
    let pickup = world.spawn_pickup(Vec3::new(1.0, 0.0, 0.0), berry);
    world.set_aim(Vec3::new(1.0, 0.0, 1.0));
    Ok(Props { node, pickup })
}

fn apply(cue: Cue, props: &Props, character: &mut Character, world: &mut Sandbox) {
    match cue {
        Cue::Press(action) => character.input.press(action),
        Cue::Release(action) => character.input.release(action),
        Cue::Gather => {
            if !character.interact(Contact::Gatherable(props.node), world) {
                warn!("Could not start gathering {:?}", props.node);
            }
        }
        Cue::TakePickup => {
            character.interact(Contact::Pickup(props.pickup), world);
        }
        Cue::Damage(amount) => world.damage(amount),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ControllerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ControllerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    info!("Controller config: {:?}", config);

    let mut world = Sandbox::new();
    let props = populate(&mut world)?;
    let mut character = Character::new("Player", config, &mut world);

    let mut game_loop = GameLoop::new();
    let frame_time = Duration::from_millis(args.frame_ms);
    let mut step: u64 = 0;
    let mut hud_events: usize = 0;

    'frames: for _ in 0..args.frames {
        let updates = game_loop.begin_frame(frame_time);
        for _ in 0..updates {
            for (_, cue) in SCRIPT.iter().filter(|(at, _)| *at == step) {
                apply(*cue, &props, &mut character, &mut world);
            }

            character.update(FIXED_TIMESTEP, &mut world);
            world.update(FIXED_TIMESTEP);
            character.clear_input();
            step += 1;

            for event in world.drain_hud() {
                if let HudEvent::ItemReceived { name, quantity } = &event {
                    info!("Received {} x{}", name, quantity);
                }
                hud_events += 1;
            }

            if world.is_game_over() {
                info!("Game over after {} steps", step);
                break 'frames;
            }
        }
    }

    info!(
        "Simulated {:.2}s over {} frames, final state {}",
        game_loop.simulated_secs(),
        game_loop.frame_count(),
        character.state_kind().name()
    );
    for slot in world.backpack.slots() {
        info!("Backpack: {} x{}", slot.item.name, slot.quantity);
    }
    info!(
        "Melee swings: {}, live effects: {}, wood nodes left: {}, HUD events: {}",
        world.abilities.melee_count(),
        world.abilities.live_effects(),
        world.resource_count(MaterialType::Wood),
        hud_events
    );

    Ok(())
}
