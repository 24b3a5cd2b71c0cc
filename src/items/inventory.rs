//! Slot-indexed item storage plus the seven equipment slots.
//!
//! Storage and the equipped array are disjoint: equipping atomically moves
//! one unit out of storage into the slot, and the bumped item (if any) moves
//! back the other way. An item is never in both places at once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_MAX_SLOTS, NUM_EQUIP_SLOTS, NUM_STATS};
use crate::core::error::{GameError, SaveError};
use crate::items::types::{EquipSlot, EquipmentItem};

/// One stack of a stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: EquipmentItem,
    pub quantity: u32,
    pub slot_index: usize,
}

/// Result of an equip attempt. Only `Equipped` mutates the inventory.
#[derive(Debug, Clone, PartialEq)]
pub enum EquipOutcome {
    Equipped { replaced: Option<EquipmentItem> },
    NotInInventory,
    RequirementsNotMet,
    /// The previously equipped item had nowhere to go; nothing changed.
    NoRoomForReplaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Rarity,
    Slot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryManager {
    entries: HashMap<String, InventoryEntry>,
    equipped: [Option<EquipmentItem>; NUM_EQUIP_SLOTS],
    max_slots: usize,
}

impl Default for InventoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::with_max_slots(DEFAULT_MAX_SLOTS)
    }

    pub fn with_max_slots(max_slots: usize) -> Self {
        Self {
            entries: HashMap::new(),
            equipped: [None, None, None, None, None, None, None],
            max_slots,
        }
    }

    // ── Storage ─────────────────────────────────────────────────

    /// Adds items to storage, merging into an existing stack when the id is
    /// already present. Returns false when a new stack is needed but every
    /// slot is occupied.
    pub fn add_item(&mut self, item: EquipmentItem, quantity: u32) -> bool {
        if let Some(entry) = self.entries.get_mut(&item.id) {
            entry.quantity += quantity;
            return true;
        }
        if self.entries.len() >= self.max_slots {
            return false;
        }
        let slot_index = self.lowest_free_index();
        self.entries.insert(
            item.id.clone(),
            InventoryEntry {
                item,
                quantity,
                slot_index,
            },
        );
        true
    }

    /// Removes up to `quantity` units; false when the stack is missing or
    /// too small. The slot index is released when the stack empties.
    pub fn remove_item(&mut self, id: &str, quantity: u32) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if entry.quantity < quantity {
            return false;
        }
        entry.quantity -= quantity;
        if entry.quantity == 0 {
            self.entries.remove(id);
        }
        true
    }

    pub fn entry(&self, id: &str) -> Option<&InventoryEntry> {
        self.entries.get(id)
    }

    pub fn iter_entries(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    pub fn occupied_slots(&self) -> usize {
        self.entries.len()
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots - self.entries.len()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Changes capacity. Shrinking below current occupancy is a caller bug.
    pub fn set_max_slots(&mut self, max_slots: usize) -> Result<(), GameError> {
        if max_slots < self.entries.len() {
            return Err(GameError::SlotsBelowOccupancy {
                requested: max_slots,
                occupied: self.entries.len(),
            });
        }
        self.max_slots = max_slots;
        Ok(())
    }

    fn lowest_free_index(&self) -> usize {
        let mut used: Vec<usize> = self.entries.values().map(|e| e.slot_index).collect();
        used.sort_unstable();
        let mut index = 0;
        for slot in used {
            if slot == index {
                index += 1;
            }
        }
        index
    }

    /// Moves a stack to another slot index, swapping with the occupant.
    pub fn move_item(&mut self, id: &str, new_slot_index: usize) -> bool {
        if new_slot_index >= self.max_slots || !self.entries.contains_key(id) {
            return false;
        }
        let old_index = self.entries[id].slot_index;
        let occupant = self
            .entries
            .iter()
            .find(|(other, e)| e.slot_index == new_slot_index && other.as_str() != id)
            .map(|(other, _)| other.clone());

        if let Some(other) = occupant {
            self.entries.get_mut(&other).unwrap().slot_index = old_index;
        }
        self.entries.get_mut(id).unwrap().slot_index = new_slot_index;
        true
    }

    /// Reassigns slot indices in sorted order. Not stable across keys.
    pub fn sort_inventory(&mut self, key: SortKey) {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort_by(|a, b| {
            let ea = &self.entries[a].item;
            let eb = &self.entries[b].item;
            match key {
                SortKey::Name => ea.name.cmp(&eb.name),
                SortKey::Rarity => eb.rarity.cmp(&ea.rarity).then_with(|| ea.name.cmp(&eb.name)),
                SortKey::Slot => ea
                    .slot
                    .index()
                    .cmp(&eb.slot.index())
                    .then_with(|| ea.name.cmp(&eb.name)),
            }
        });
        for (index, id) in ids.iter().enumerate() {
            self.entries.get_mut(id).unwrap().slot_index = index;
        }
    }

    // ── Equipment ───────────────────────────────────────────────

    pub fn equipped(&self, slot: EquipSlot) -> Option<&EquipmentItem> {
        self.equipped[slot.index()].as_ref()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.equipped.iter().filter_map(|item| item.as_ref())
    }

    /// Equips a stored item, checking its requirements against the supplied
    /// stat/level snapshot. The previously equipped item for that slot goes
    /// back to storage; when it cannot fit, the whole operation rolls back.
    pub fn equip_item(
        &mut self,
        id: &str,
        stats: &[i32; NUM_STATS],
        level: u32,
    ) -> EquipOutcome {
        let Some(entry) = self.entries.get(id) else {
            return EquipOutcome::NotInInventory;
        };
        if !entry.item.meets_requirements(stats, level) {
            return EquipOutcome::RequirementsNotMet;
        }

        let item = entry.item.clone();
        let slot = item.slot.index();

        // Free one unit first so a size-1 stack releases its storage slot
        // for the bumped item.
        self.remove_item(id, 1);
        let previous = self.equipped[slot].take();

        if let Some(prev) = previous.clone() {
            if !self.add_item(prev, 1) {
                // Roll back: reinstall the old item, return the unit.
                self.equipped[slot] = previous;
                self.add_item(item, 1);
                return EquipOutcome::NoRoomForReplaced;
            }
        }

        self.equipped[slot] = Some(item);
        EquipOutcome::Equipped { replaced: previous }
    }

    /// Moves the equipped item for a slot back into storage. Returns false
    /// (no state change) when the slot is empty or storage has no room.
    pub fn unequip_item(&mut self, slot: EquipSlot) -> bool {
        let Some(item) = self.equipped[slot.index()].clone() else {
            return false;
        };
        if !self.add_item(item, 1) {
            return false;
        }
        self.equipped[slot.index()] = None;
        true
    }

    // ── Serialization ───────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(text)?)
    }
}
