// Sandbox inventory: stacking slots with a fixed capacity

use crate::game::items::ItemDescriptor;

/// One occupied inventory slot
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub item: ItemDescriptor,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Backpack {
    slots: Vec<Slot>,
    capacity: usize,
}

impl Backpack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Stack onto a matching slot, otherwise take a free one.
    /// Returns false when there is no room.
    pub fn add(&mut self, item: &ItemDescriptor, quantity: u32) -> bool {
        if quantity == 0 {
            return true;
        }

        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.item == *item) {
            slot.quantity = slot.quantity.saturating_add(quantity);
            return true;
        }

        if self.slots.len() >= self.capacity {
            return false;
        }
        self.slots.push(Slot {
            item: item.clone(),
            quantity,
        });
        true
    }

    /// Total quantity held under `name`
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item.name == name)
            .map(|slot| slot.quantity)
            .sum()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}

impl Default for Backpack {
    fn default() -> Self {
        Self::new(16)
    }
}
