// Item and resource node data containers

use glam::Vec3;

/// Identifier of a gatherable resource node in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Identifier of a loose pickup lying in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupId(pub u32);

/// Raw material a node yields. The discriminant doubles as the gather tool
/// index and the animator's `GatherTool` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Wood = 0,
    Stone = 1,
    Ore = 2,
    Fiber = 3,
}

impl MaterialType {
    /// Index into the tool holder and value of the `GatherTool` parameter
    pub fn tool_index(self) -> i32 {
        self as i32
    }
}

/// Description of an inventory item (what a node yields, what a pickup is)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    /// Display name
    pub name: String,
    /// Material category
    pub material: MaterialType,
    /// Handle of the HUD icon shown when the item is received
    pub icon: u32,
}

impl ItemDescriptor {
    pub fn new(name: &str, material: MaterialType, icon: u32) -> Self {
        Self {
            name: name.to_string(),
            material,
            icon,
        }
    }
}

/// A gatherable resource node (tree, rock, vein...)
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub id: NodeId,
    /// Current world position, shaken while being gathered
    pub position: Vec3,
    /// Remaining gathers before the node is depleted
    pub remaining: i32,
    /// What a successful gather yields
    pub item: ItemDescriptor,
}

impl ResourceNode {
    pub fn new(id: NodeId, position: Vec3, remaining: i32, item: ItemDescriptor) -> Self {
        Self {
            id,
            position,
            remaining,
            item,
        }
    }

    pub fn material(&self) -> MaterialType {
        self.item.material
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining <= 0
    }
}
