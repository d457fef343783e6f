// Collaborator interfaces the player state machine drives
//
// The state machine owns none of these subsystems. It reads status from them
// and issues commands to them, and every call is synchronous. A game binds
// them to its engine; the `sandbox` module binds them to in-memory fakes.

use glam::Vec3;
use serde::Deserialize;

use super::characters::ability::{AbilityCast, AbilityKind, EffectId};
use super::items::{ItemDescriptor, MaterialType, NodeId, PickupId, ResourceNode};

/// Animator states the controller cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationId {
    Idle,
    Roll,
    Attack,
    Ability,
    /// Recovery pose after an ability; blocks new actions while active
    AbilityFinish,
    Gather,
    Die,
}

/// Animation playback
pub trait Animator {
    /// The animator state that is active right now
    fn current_animation(&self) -> AnimationId;
    fn play(&mut self, clip: AnimationId);
    /// Select the gather swing for the tool of `material`
    fn set_gather_tool(&mut self, material: MaterialType);
}

/// Character locomotion and facing
pub trait Movement {
    fn set_movement_enabled(&mut self, enabled: bool);
    fn position(&self) -> Vec3;
    /// Turn to face `point`
    fn look_at(&mut self, point: Vec3);
    /// Turn toward the current aim direction
    fn rotate_to_aim(&mut self);
}

/// Weapons and gathering tools
pub trait Equipment {
    fn equip_tool(&mut self, material: MaterialType);
    fn unequip_tool(&mut self);
    fn set_weapons_active(&mut self, active: bool);
    /// The glow/trail element attached to the equipped weapon
    fn set_ability_visual(&mut self, active: bool);
}

pub trait Health {
    fn is_alive(&self) -> bool;
}

/// Ability execution. Effects run on the ability subsystem's own schedule;
/// callers only poll.
pub trait Abilities {
    fn melee_attack(&mut self);
    fn start_ability(&mut self, kind: AbilityKind) -> AbilityCast;
    /// Pure status query, safe to call any number of times
    fn is_complete(&self, cast: &AbilityCast) -> bool;
    /// Stop an in-flight cast and despawn its effect
    fn cancel(&mut self, cast: AbilityCast);
    fn destroy_effect_after(&mut self, effect: EffectId, delay: f32);
}

pub trait Inventory {
    /// Returns false when the item did not fit
    fn add_item(&mut self, item: &ItemDescriptor, quantity: u32) -> bool;
}

pub trait Hud {
    /// Gathering progress in [0, 1]
    fn report_gather_progress(&mut self, fraction: f32);
    fn report_item_received(&mut self, item: &ItemDescriptor, quantity: u32);
}

/// Tracks how many nodes of each material are alive, for respawning
pub trait ResourceRegistry {
    fn remove_resource(&mut self, material: MaterialType);
}

/// Scene objects the character interacts with
pub trait Scene {
    fn node(&self, id: NodeId) -> Option<&ResourceNode>;
    fn node_mut(&mut self, id: NodeId) -> Option<&mut ResourceNode>;
    fn destroy_node(&mut self, id: NodeId);
    fn pickup(&self, id: PickupId) -> Option<&ItemDescriptor>;
    fn destroy_pickup(&mut self, id: PickupId);
}

/// Process-wide game flags read by the outer loop
pub trait GameFlags {
    fn set_game_over(&mut self);
    fn is_game_over(&self) -> bool;
}

/// Everything a player state may touch
pub trait PlayerWorld:
    Animator
    + Movement
    + Equipment
    + Health
    + Abilities
    + Inventory
    + Hud
    + ResourceRegistry
    + Scene
    + GameFlags
{
}

impl<T> PlayerWorld for T where
    T: Animator
        + Movement
        + Equipment
        + Health
        + Abilities
        + Inventory
        + Hud
        + ResourceRegistry
        + Scene
        + GameFlags
        + ?Sized
{
}
