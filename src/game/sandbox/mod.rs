// In-memory world
//
// Binds every collaborator trait to simple subsystems so the player state
// machine can run headless:
// - Animation player with one-shot clips falling back to Idle
// - Ability runner with timed casts, cancellation and delayed effect cleanup
// - Health pool, stacking backpack, HUD event log
// - Resource nodes, pickups and the per-material registry

pub mod abilities;
pub mod animation;
pub mod health;
pub mod inventory;

pub use abilities::{AbilityRunner, AbilityTimings};
pub use animation::{AnimationClip, AnimationPlayer};
pub use health::HealthPool;
pub use inventory::{Backpack, Slot};

use std::collections::HashMap;

use glam::Vec3;
use log::debug;

use super::characters::{AbilityCast, AbilityKind, EffectId};
use super::items::{ItemDescriptor, MaterialType, NodeId, PickupId, ResourceNode};
use super::world::{
    Abilities, AnimationId, Animator, Equipment, GameFlags, Health, Hud, Inventory, Movement,
    ResourceRegistry, Scene,
};

/// Sandbox errors
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Unknown resource node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Resource node must hold at least one gather, got {0}")]
    EmptyNode(i32),
}

/// Something the HUD was asked to show
#[derive(Debug, Clone, PartialEq)]
pub enum HudEvent {
    GatherProgress(f32),
    ItemReceived { name: String, quantity: u32 },
}

/// A loose item lying in the scene
#[derive(Debug, Clone)]
struct Pickup {
    position: Vec3,
    item: ItemDescriptor,
}

#[derive(Debug)]
pub struct Sandbox {
    pub animation: AnimationPlayer,
    pub abilities: AbilityRunner,
    pub health: HealthPool,
    pub backpack: Backpack,

    hud: Vec<HudEvent>,
    registry: HashMap<MaterialType, u32>,
    nodes: HashMap<NodeId, ResourceNode>,
    pickups: HashMap<PickupId, Pickup>,
    next_entity: u32,

    position: Vec3,
    facing: Vec3,
    aim: Vec3,
    movement_enabled: bool,
    tool: Option<MaterialType>,
    weapons_active: bool,
    ability_visual: bool,
    game_over: bool,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            animation: AnimationPlayer::with_standard_animations(),
            abilities: AbilityRunner::new(AbilityTimings::default()),
            health: HealthPool::default(),
            backpack: Backpack::default(),
            hud: Vec::new(),
            registry: HashMap::new(),
            nodes: HashMap::new(),
            pickups: HashMap::new(),
            next_entity: 0,
            position: Vec3::ZERO,
            facing: Vec3::Z,
            aim: Vec3::Z,
            movement_enabled: true,
            tool: None,
            weapons_active: true,
            ability_visual: false,
            game_over: false,
        }
    }

    /// Place a resource node and count it in the registry
    pub fn spawn_node(
        &mut self,
        position: Vec3,
        remaining: i32,
        item: ItemDescriptor,
    ) -> Result<NodeId, SandboxError> {
        if remaining <= 0 {
            return Err(SandboxError::EmptyNode(remaining));
        }

        self.next_entity += 1;
        let id = NodeId(self.next_entity);
        *self.registry.entry(item.material).or_insert(0) += 1;
        debug!("Spawned {} node {:?} at {}", item.name, id, position);
        self.nodes
            .insert(id, ResourceNode::new(id, position, remaining, item));
        Ok(id)
    }

    pub fn spawn_pickup(&mut self, position: Vec3, item: ItemDescriptor) -> PickupId {
        self.next_entity += 1;
        let id = PickupId(self.next_entity);
        self.pickups.insert(id, Pickup { position, item });
        id
    }

    /// Advance every subsystem by `dt`
    pub fn update(&mut self, dt: f32) {
        self.animation.update(dt);
        self.abilities.update(dt);
        self.abilities.prune_completed();
        self.health.update(dt);
    }

    pub fn damage(&mut self, amount: i32) {
        self.health.damage(amount);
        debug!(
            "Took {} damage ({}/{})",
            amount,
            self.health.current(),
            self.health.max()
        );
    }

    /// Walk by `delta` if movement is enabled. Returns whether it moved.
    pub fn try_move(&mut self, delta: Vec3) -> bool {
        if !self.movement_enabled {
            return false;
        }
        self.position += delta;
        true
    }

    pub fn set_aim(&mut self, direction: Vec3) {
        self.aim = direction.normalize_or_zero();
    }

    pub fn node_position(&self, id: NodeId) -> Result<Vec3, SandboxError> {
        self.nodes
            .get(&id)
            .map(|node| node.position)
            .ok_or(SandboxError::UnknownNode(id))
    }

    pub fn pickup_position(&self, id: PickupId) -> Option<Vec3> {
        self.pickups.get(&id).map(|pickup| pickup.position)
    }

    /// Live nodes of `material`
    pub fn resource_count(&self, material: MaterialType) -> u32 {
        self.registry.get(&material).copied().unwrap_or(0)
    }

    pub fn hud(&self) -> &[HudEvent] {
        &self.hud
    }

    pub fn drain_hud(&mut self) -> Vec<HudEvent> {
        std::mem::take(&mut self.hud)
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    pub fn tool(&self) -> Option<MaterialType> {
        self.tool
    }

    pub fn weapons_active(&self) -> bool {
        self.weapons_active
    }

    pub fn ability_visual(&self) -> bool {
        self.ability_visual
    }
}

impl Animator for Sandbox {
    fn current_animation(&self) -> AnimationId {
        self.animation.current()
    }

    fn play(&mut self, clip: AnimationId) {
        self.animation.play(clip);
    }

    fn set_gather_tool(&mut self, material: MaterialType) {
        self.animation.set_gather_tool(material.tool_index());
    }
}

impl Movement for Sandbox {
    fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn look_at(&mut self, point: Vec3) {
        let direction = (point - self.position).normalize_or_zero();
        if direction != Vec3::ZERO {
            self.facing = direction;
        }
    }

    fn rotate_to_aim(&mut self) {
        if self.aim != Vec3::ZERO {
            self.facing = self.aim;
        }
    }
}

impl Equipment for Sandbox {
    fn equip_tool(&mut self, material: MaterialType) {
        self.tool = Some(material);
    }

    fn unequip_tool(&mut self) {
        self.tool = None;
        // Putting the tool away ends the swing loop
        if self.animation.current() == AnimationId::Gather {
            self.animation.play(AnimationId::Idle);
        }
    }

    fn set_weapons_active(&mut self, active: bool) {
        self.weapons_active = active;
    }

    fn set_ability_visual(&mut self, active: bool) {
        self.ability_visual = active;
    }
}

impl Health for Sandbox {
    fn is_alive(&self) -> bool {
        self.health.is_alive()
    }
}

impl Abilities for Sandbox {
    fn melee_attack(&mut self) {
        self.abilities.melee_attack();
        self.animation.play_from_start(AnimationId::Attack);
    }

    fn start_ability(&mut self, kind: AbilityKind) -> AbilityCast {
        self.animation.play_from_start(AnimationId::Ability);
        self.abilities.start(kind)
    }

    fn is_complete(&self, cast: &AbilityCast) -> bool {
        self.abilities.is_complete(cast)
    }

    fn cancel(&mut self, cast: AbilityCast) {
        self.abilities.cancel(cast);
    }

    fn destroy_effect_after(&mut self, effect: EffectId, delay: f32) {
        self.abilities.destroy_effect_after(effect, delay);
    }
}

impl Inventory for Sandbox {
    fn add_item(&mut self, item: &ItemDescriptor, quantity: u32) -> bool {
        self.backpack.add(item, quantity)
    }
}

impl Hud for Sandbox {
    fn report_gather_progress(&mut self, fraction: f32) {
        self.hud.push(HudEvent::GatherProgress(fraction));
    }

    fn report_item_received(&mut self, item: &ItemDescriptor, quantity: u32) {
        debug!("HUD: received {} x{}", item.name, quantity);
        self.hud.push(HudEvent::ItemReceived {
            name: item.name.clone(),
            quantity,
        });
    }
}

impl ResourceRegistry for Sandbox {
    fn remove_resource(&mut self, material: MaterialType) {
        if let Some(count) = self.registry.get_mut(&material) {
            *count = count.saturating_sub(1);
        }
    }
}

impl Scene for Sandbox {
    fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ResourceNode> {
        self.nodes.get_mut(&id)
    }

    fn destroy_node(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    fn pickup(&self, id: PickupId) -> Option<&ItemDescriptor> {
        self.pickups.get(&id).map(|pickup| &pickup.item)
    }

    fn destroy_pickup(&mut self, id: PickupId) {
        self.pickups.remove(&id);
    }
}

impl GameFlags for Sandbox {
    fn set_game_over(&mut self) {
        if !self.game_over {
            debug!("Game-over flag raised");
        }
        self.game_over = true;
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
