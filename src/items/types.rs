use serde::{Deserialize, Serialize};

use crate::character::stats::StatKind;
use crate::core::constants::NUM_STATS;
use crate::core::error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Head,
    Body,
    Paws,
    Tail,
    Accessory,
    Weapon,
    Chest,
}

impl EquipSlot {
    pub fn all() -> [EquipSlot; 7] {
        [
            EquipSlot::Head,
            EquipSlot::Body,
            EquipSlot::Paws,
            EquipSlot::Tail,
            EquipSlot::Accessory,
            EquipSlot::Weapon,
            EquipSlot::Chest,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            EquipSlot::Head => 0,
            EquipSlot::Body => 1,
            EquipSlot::Paws => 2,
            EquipSlot::Tail => 3,
            EquipSlot::Accessory => 4,
            EquipSlot::Weapon => 5,
            EquipSlot::Chest => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Paws => "Paws",
            EquipSlot::Tail => "Tail",
            EquipSlot::Accessory => "Accessory",
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Chest => "Chest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 1,
    Uncommon = 2,
    Rare = 3,
    Epic = 4,
    Legendary = 5,
}

impl Rarity {
    /// Numeric tier in [1, 5].
    pub fn tier(&self) -> u8 {
        *self as u8
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Minimums a character must meet before equipping an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemRequirements {
    pub level: u32,
    pub stats: [i32; NUM_STATS],
}

impl ItemRequirements {
    pub fn met_by(&self, stats: &[i32; NUM_STATS], level: u32) -> bool {
        level >= self.level && StatKind::all().iter().all(|s| stats[s.index()] >= self.stats[s.index()])
    }
}

/// Static definition of one piece of equipment. Immutable after
/// construction; gameplay state (quantity, slot index, equipped-or-not)
/// lives in the inventory, never on the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub slot: EquipSlot,
    pub category: ItemCategory,
    pub rarity: Rarity,
    #[serde(default)]
    pub requirements: ItemRequirements,
    /// Additive per-stat bonuses.
    #[serde(default)]
    pub bonuses: [i32; NUM_STATS],
    /// Per-stat multipliers; 1.0 means no effect.
    #[serde(default = "unit_multipliers")]
    pub multipliers: [f64; NUM_STATS],
    #[serde(default)]
    pub description: String,
}

fn unit_multipliers() -> [f64; NUM_STATS] {
    [1.0; NUM_STATS]
}

impl EquipmentItem {
    pub fn new(id: &str, name: &str, slot: EquipSlot, category: ItemCategory, rarity: Rarity) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            category,
            rarity,
            requirements: ItemRequirements::default(),
            bonuses: [0; NUM_STATS],
            multipliers: unit_multipliers(),
            description: String::new(),
        }
    }

    pub fn with_bonus(mut self, stat: StatKind, value: i32) -> Self {
        self.bonuses[stat.index()] = value;
        self
    }

    pub fn with_multiplier(mut self, stat: StatKind, factor: f64) -> Self {
        self.multipliers[stat.index()] = factor;
        self
    }

    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.requirements.level = level;
        self
    }

    pub fn with_stat_requirement(mut self, stat: StatKind, minimum: i32) -> Self {
        self.requirements.stats[stat.index()] = minimum;
        self
    }

    pub fn with_description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn bonus(&self, stat: StatKind) -> i32 {
        self.bonuses[stat.index()]
    }

    pub fn multiplier(&self, stat: StatKind) -> f64 {
        self.multipliers[stat.index()]
    }

    /// Checks level and stat requirements against a caller-supplied
    /// snapshot of the character's stats.
    pub fn meets_requirements(&self, stats: &[i32; NUM_STATS], level: u32) -> bool {
        self.requirements.met_by(stats, level)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(text)?)
    }
}
