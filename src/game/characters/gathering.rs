// Gathering a resource node: countdown, shake, and yield

use glam::Vec3;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::ControllerConfig;
use crate::core::math::{level_with, random_in_unit_sphere};
use crate::core::Timer;
use crate::game::items::{ItemDescriptor, NodeId};
use crate::game::world::{AnimationId, PlayerWorld};

/// Data owned by one Gathering tenure
#[derive(Debug, Clone, PartialEq)]
pub struct GatherTenure {
    target: NodeId,
    /// Where the node rested before shaking started; `None` once restored
    rest_position: Option<Vec3>,
    /// What the node yields, cached on enter
    item: Option<ItemDescriptor>,
    timer: Timer,
    tool_equipped: bool,
}

impl GatherTenure {
    /// Run the entry effects: stop, face the node, swing the matching tool
    pub fn begin<W: PlayerWorld + ?Sized>(
        target: NodeId,
        world: &mut W,
        config: &ControllerConfig,
    ) -> Self {
        world.set_movement_enabled(false);

        let node = world
            .node(target)
            .map(|node| (node.position, node.item.clone()));

        let (rest_position, item, tool_equipped) = match node {
            Some((position, item)) => {
                let facing = level_with(position, world.position());
                world.look_at(facing);

                world.set_gather_tool(item.material);
                world.play(AnimationId::Gather);

                world.set_weapons_active(false);
                world.equip_tool(item.material);
                debug!("Gathering {} from {:?}", item.name, target);

                (Some(position), Some(item), true)
            }
            None => {
                warn!("Gathering target {:?} does not exist", target);
                (None, None, false)
            }
        };

        Self {
            target,
            rest_position,
            item,
            timer: Timer::new(config.gather_duration),
            tool_equipped,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Per-tick work. Returns true on the tick the gather finishes.
    pub fn update<W, R>(
        &mut self,
        dt: f32,
        world: &mut W,
        config: &ControllerConfig,
        rng: &mut R,
    ) -> bool
    where
        W: PlayerWorld + ?Sized,
        R: Rng + ?Sized,
    {
        if let Some(rest) = self.rest_position {
            if let Some(node) = world.node_mut(self.target) {
                // Shake around the rest point but keep the node's own height
                let mut shaken = rest + random_in_unit_sphere(rng) * config.gather_jitter;
                shaken.y = node.position.y;
                node.position = shaken;
            }
        }
        world.report_gather_progress(self.timer.progress());

        if !self.timer.tick(dt) {
            return false;
        }

        self.restore(world);
        if let Some(item) = self.item.take() {
            self.collect(item, world, config);
        }
        true
    }

    /// Undo the tenure's scene and equipment changes. Safe to call twice.
    pub fn release<W: PlayerWorld + ?Sized>(&mut self, world: &mut W) {
        self.restore(world);
    }

    fn restore<W: PlayerWorld + ?Sized>(&mut self, world: &mut W) {
        if let Some(rest) = self.rest_position.take() {
            if let Some(node) = world.node_mut(self.target) {
                node.position = rest;
            }
        }
        if self.tool_equipped {
            world.unequip_tool();
            world.set_weapons_active(true);
            self.tool_equipped = false;
        }
    }

    fn collect<W: PlayerWorld + ?Sized>(
        &self,
        item: ItemDescriptor,
        world: &mut W,
        config: &ControllerConfig,
    ) {
        if world.node(self.target).is_none() {
            warn!("{:?} vanished before the gather finished", self.target);
            return;
        }

        let quantity = config.gather_yield;
        if !world.add_item(&item, quantity) {
            warn!("Inventory refused {} x{}", item.name, quantity);
        }

        let depleted = match world.node_mut(self.target) {
            Some(node) => {
                node.remaining -= 1;
                node.is_depleted()
            }
            None => false,
        };
        world.report_item_received(&item, quantity);

        if depleted {
            info!("{:?} depleted", self.target);
            world.destroy_node(self.target);
            world.remove_resource(item.material);
        }
    }
}
