//! Pure stat composition over a StatBlock + InventoryManager snapshot.
//!
//! Equipment bonuses sum additively, multipliers multiply, and the final
//! derived stats run through the same formulas as the StatBlock itself.
//! Nothing here mutates the inventory; the only mutating entry point is
//! [`apply_equipment_modifiers`], which materializes bonuses onto the block
//! for systems that read the StatBlock directly.

use serde::{Deserialize, Serialize};

use crate::character::stat_block::{StatBlock, StatModifier};
use crate::character::stats::{DerivedStats, StatKind};
use crate::core::constants::NUM_STATS;
use crate::items::inventory::InventoryManager;
use crate::items::types::EquipmentItem;

/// Id prefix for modifiers materialized from equipment. Totals computed
/// here always exclude these, so a stale or missing re-application never
/// double-counts (or drops) equipment on the pure read path.
pub const EQUIPMENT_MODIFIER_PREFIX: &str = "equip:";

/// Snapshot of a character's equipment-adjusted stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub totals: [i32; NUM_STATS],
    pub derived: DerivedStats,
    /// Taken live from the StatBlock, not recomputed.
    pub current_health: i32,
    pub current_mana: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipChange {
    Equip,
    Unequip,
}

/// Sums additive bonuses across all equipped items.
pub fn equipment_bonuses(inventory: &InventoryManager) -> [i32; NUM_STATS] {
    let mut bonuses = [0; NUM_STATS];
    for item in inventory.iter_equipped() {
        for stat in StatKind::all() {
            bonuses[stat.index()] += item.bonus(stat);
        }
    }
    bonuses
}

/// Multiplies per-stat multipliers across all equipped items (1.0 default).
pub fn equipment_multipliers(inventory: &InventoryManager) -> [f64; NUM_STATS] {
    let mut multipliers = [1.0; NUM_STATS];
    for item in inventory.iter_equipped() {
        for stat in StatKind::all() {
            multipliers[stat.index()] *= item.multiplier(stat);
        }
    }
    multipliers
}

/// `floor((base + bonuses) * multipliers)` per stat, where base is the
/// block's effective value minus any materialized equipment modifiers.
pub fn total_stats(block: &StatBlock, inventory: &InventoryManager) -> [i32; NUM_STATS] {
    let equipped: Vec<&EquipmentItem> = inventory.iter_equipped().collect();
    totals_from_items(block, &equipped)
}

fn totals_from_items(block: &StatBlock, items: &[&EquipmentItem]) -> [i32; NUM_STATS] {
    let mut totals = [0; NUM_STATS];
    for stat in StatKind::all() {
        let base = block.effective_stat_excluding(stat, EQUIPMENT_MODIFIER_PREFIX);
        let bonus: i32 = items.iter().map(|item| item.bonus(stat)).sum();
        let multiplier: f64 = items.iter().map(|item| item.multiplier(stat)).product();
        totals[stat.index()] = ((base + bonus) as f64 * multiplier).floor() as i32;
    }
    totals
}

/// Full equipment-adjusted snapshot: totals plus derived stats, with the
/// live current health/mana copied through.
pub fn final_stats(block: &StatBlock, inventory: &InventoryManager) -> FinalStats {
    let totals = total_stats(block, inventory);
    FinalStats {
        totals,
        derived: DerivedStats::from_values(totals),
        current_health: block.current_health(),
        current_mana: block.current_mana(),
    }
}

/// Previews total stats after a hypothetical equip or unequip, without
/// touching the real inventory. Returns `None` when the item is not where
/// the change expects it (not stored for an equip, not worn for an
/// unequip).
pub fn simulate_equipment_change(
    block: &StatBlock,
    inventory: &InventoryManager,
    item_id: &str,
    change: EquipChange,
) -> Option<[i32; NUM_STATS]> {
    match change {
        EquipChange::Equip => {
            let candidate = &inventory.entry(item_id)?.item;
            let mut items: Vec<&EquipmentItem> = inventory
                .iter_equipped()
                .filter(|worn| worn.slot != candidate.slot)
                .collect();
            items.push(candidate);
            Some(totals_from_items(block, &items))
        }
        EquipChange::Unequip => {
            inventory.iter_equipped().find(|worn| worn.id == item_id)?;
            let items: Vec<&EquipmentItem> = inventory
                .iter_equipped()
                .filter(|worn| worn.id != item_id)
                .collect();
            Some(totals_from_items(block, &items))
        }
    }
}

/// Materializes current equipment bonuses as permanent StatModifiers on the
/// block, tagged per item id. Re-invoke after every equip/unequip; previous
/// equipment modifiers are cleared first.
pub fn apply_equipment_modifiers(block: &mut StatBlock, inventory: &InventoryManager) {
    block.remove_modifiers_with_prefix(EQUIPMENT_MODIFIER_PREFIX);
    for item in inventory.iter_equipped() {
        for stat in StatKind::all() {
            let bonus = item.bonus(stat);
            if bonus != 0 {
                let id = format!("{}{}:{}", EQUIPMENT_MODIFIER_PREFIX, item.id, stat.abbrev());
                block.add_modifier_with_id(&id, StatModifier::permanent(stat, bonus, &item.id));
            }
        }
    }
}
