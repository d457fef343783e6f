// Recording fake for the collaborator traits, used by the state tests

use std::collections::HashMap;

use glam::Vec3;

use super::ability::{AbilityCast, AbilityHandle, AbilityKind, EffectId};
use crate::game::items::{ItemDescriptor, MaterialType, NodeId, PickupId, ResourceNode};
use crate::game::world::{
    Abilities, AnimationId, Animator, Equipment, GameFlags, Health, Hud, Inventory, Movement,
    ResourceRegistry, Scene,
};

/// One command or report issued to the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Play(AnimationId),
    GatherTool(MaterialType),
    Movement(bool),
    LookAt(Vec3),
    RotateToAim,
    EquipTool(MaterialType),
    UnequipTool,
    Weapons(bool),
    AbilityVisual(bool),
    MeleeAttack,
    StartAbility(AbilityKind),
    Cancel(AbilityHandle),
    DestroyEffectAfter(EffectId, f32),
    AddItem(String, u32),
    GatherProgress(f32),
    ItemReceived(String, u32),
    DestroyNode(NodeId),
    RemoveResource(MaterialType),
    DestroyPickup(PickupId),
    GameOver,
}

/// Scriptable world: tests set the status fields, then inspect `calls`
#[derive(Debug)]
pub struct FakeWorld {
    pub calls: Vec<Call>,
    pub animation: AnimationId,
    pub alive: bool,
    pub complete_casts: bool,
    pub inventory_accepts: bool,
    pub position: Vec3,
    pub nodes: HashMap<NodeId, ResourceNode>,
    pub pickups: HashMap<PickupId, ItemDescriptor>,
    pub game_over: bool,
    pub last_effect: Option<EffectId>,
    next_id: u64,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            animation: AnimationId::Idle,
            alive: true,
            complete_casts: false,
            inventory_accepts: true,
            position: Vec3::ZERO,
            nodes: HashMap::new(),
            pickups: HashMap::new(),
            game_over: false,
            last_effect: None,
            next_id: 1,
        }
    }

    pub fn add_node(
        &mut self,
        id: NodeId,
        position: Vec3,
        remaining: i32,
        material: MaterialType,
    ) {
        let item = ItemDescriptor::new(&format!("{material:?}"), material, id.0);
        self.nodes
            .insert(id, ResourceNode::new(id, position, remaining, item));
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(*call)).count()
    }
}

impl Animator for FakeWorld {
    fn current_animation(&self) -> AnimationId {
        self.animation
    }

    fn play(&mut self, clip: AnimationId) {
        self.calls.push(Call::Play(clip));
    }

    fn set_gather_tool(&mut self, material: MaterialType) {
        self.calls.push(Call::GatherTool(material));
    }
}

impl Movement for FakeWorld {
    fn set_movement_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::Movement(enabled));
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn look_at(&mut self, point: Vec3) {
        self.calls.push(Call::LookAt(point));
    }

    fn rotate_to_aim(&mut self) {
        self.calls.push(Call::RotateToAim);
    }
}

impl Equipment for FakeWorld {
    fn equip_tool(&mut self, material: MaterialType) {
        self.calls.push(Call::EquipTool(material));
    }

    fn unequip_tool(&mut self) {
        self.calls.push(Call::UnequipTool);
    }

    fn set_weapons_active(&mut self, active: bool) {
        self.calls.push(Call::Weapons(active));
    }

    fn set_ability_visual(&mut self, active: bool) {
        self.calls.push(Call::AbilityVisual(active));
    }
}

impl Health for FakeWorld {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Abilities for FakeWorld {
    fn melee_attack(&mut self) {
        self.calls.push(Call::MeleeAttack);
    }

    fn start_ability(&mut self, kind: AbilityKind) -> AbilityCast {
        self.calls.push(Call::StartAbility(kind));
        let handle = AbilityHandle(self.next_id);
        let effect = EffectId(self.next_id + 1000);
        self.next_id += 1;
        self.last_effect = Some(effect);
        AbilityCast {
            handle,
            effect: Some(effect),
        }
    }

    fn is_complete(&self, _cast: &AbilityCast) -> bool {
        self.complete_casts
    }

    fn cancel(&mut self, cast: AbilityCast) {
        self.calls.push(Call::Cancel(cast.handle));
    }

    fn destroy_effect_after(&mut self, effect: EffectId, delay: f32) {
        self.calls.push(Call::DestroyEffectAfter(effect, delay));
    }
}

impl Inventory for FakeWorld {
    fn add_item(&mut self, item: &ItemDescriptor, quantity: u32) -> bool {
        self.calls.push(Call::AddItem(item.name.clone(), quantity));
        self.inventory_accepts
    }
}

impl Hud for FakeWorld {
    fn report_gather_progress(&mut self, fraction: f32) {
        self.calls.push(Call::GatherProgress(fraction));
    }

    fn report_item_received(&mut self, item: &ItemDescriptor, quantity: u32) {
        self.calls.push(Call::ItemReceived(item.name.clone(), quantity));
    }
}

impl ResourceRegistry for FakeWorld {
    fn remove_resource(&mut self, material: MaterialType) {
        self.calls.push(Call::RemoveResource(material));
    }
}

impl Scene for FakeWorld {
    fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ResourceNode> {
        self.nodes.get_mut(&id)
    }

    fn destroy_node(&mut self, id: NodeId) {
        self.calls.push(Call::DestroyNode(id));
        self.nodes.remove(&id);
    }

    fn pickup(&self, id: PickupId) -> Option<&ItemDescriptor> {
        self.pickups.get(&id)
    }

    fn destroy_pickup(&mut self, id: PickupId) {
        self.calls.push(Call::DestroyPickup(id));
        self.pickups.remove(&id);
    }
}

impl GameFlags for FakeWorld {
    fn set_game_over(&mut self) {
        self.calls.push(Call::GameOver);
        self.game_over = true;
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
