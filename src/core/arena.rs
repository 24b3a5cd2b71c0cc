//! Slot arena with free-list recycling.
//!
//! Projectiles and area effects churn every frame; recycling slots keeps the
//! hot loop free of map rehashing and unbounded growth. Handles are plain
//! `u64` ids that stay unique across recycling.

use std::collections::HashMap;

/// Fixed-slot storage for live per-frame records.
///
/// Insertion reuses the lowest freed slot before growing the backing vec.
/// Lookup by id goes through a side index so despawned handles simply miss.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    index: HashMap<u64, usize>,
    next_id: u64,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Inserts a record and returns its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(value);
                slot
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        id
    }

    /// Removes a record by handle, returning it if it was live.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        let slot = self.index.remove(&id)?;
        let value = self.slots[slot].take();
        self.free.push(slot);
        value
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of backing slots ever allocated (live + freed).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> {
        self.index
            .iter()
            .filter_map(|(&id, &slot)| self.slots[slot].as_ref().map(|v| (id, v)))
    }

    /// Ids of all live records. Collected up front so callers can mutate
    /// records (or remove them) while walking the list.
    pub fn ids(&self) -> Vec<u64> {
        self.index.keys().copied().collect()
    }
}
