use serde::{Deserialize, Serialize};

use crate::core::constants::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatKind {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    Luck,
}

impl StatKind {
    pub fn all() -> [StatKind; NUM_STATS] {
        [
            StatKind::Strength,
            StatKind::Dexterity,
            StatKind::Intelligence,
            StatKind::Vitality,
            StatKind::Luck,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            StatKind::Strength => "STR",
            StatKind::Dexterity => "DEX",
            StatKind::Intelligence => "INT",
            StatKind::Vitality => "VIT",
            StatKind::Luck => "LCK",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatKind::Strength => 0,
            StatKind::Dexterity => 1,
            StatKind::Intelligence => 2,
            StatKind::Vitality => 3,
            StatKind::Luck => 4,
        }
    }
}

/// The five allocatable attributes, each clamped to [1, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseStats {
    values: [i32; NUM_STATS],
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseStats {
    pub fn new() -> Self {
        Self {
            values: [BASE_STAT_VALUE; NUM_STATS],
        }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        self.values[stat.index()]
    }

    /// Sets a stat, clamping into the legal [1, 100] range.
    pub fn set(&mut self, stat: StatKind, value: i32) {
        self.values[stat.index()] = value.clamp(STAT_MIN, STAT_MAX);
    }

    pub fn as_array(&self) -> [i32; NUM_STATS] {
        self.values
    }
}

/// Combat stats computed from (effective) base stats. Never authored
/// directly; recomputed whenever base stats or modifiers change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_health: i32,
    pub max_mana: i32,
    pub physical_damage: i32,
    pub magic_damage: i32,
    pub defense: f64,
    pub evasion: f64,
    /// Percent chance for a critical hit.
    pub crit_chance: f64,
    /// Percent damage dealt on a critical hit (150 = 1.5x).
    pub crit_damage: f64,
}

impl DerivedStats {
    /// Runs the derived-stat formulas over a stat array (base, effective,
    /// or equipment-composed totals — callers pick which).
    pub fn from_values(values: [i32; NUM_STATS]) -> Self {
        let strength = values[StatKind::Strength.index()];
        let dexterity = values[StatKind::Dexterity.index()];
        let intelligence = values[StatKind::Intelligence.index()];
        let vitality = values[StatKind::Vitality.index()];
        let luck = values[StatKind::Luck.index()];

        Self {
            max_health: HEALTH_BASE + vitality * HEALTH_PER_VITALITY,
            max_mana: MANA_BASE + intelligence * MANA_PER_INTELLIGENCE,
            physical_damage: strength * PHYSICAL_DAMAGE_PER_STRENGTH,
            magic_damage: intelligence * MAGIC_DAMAGE_PER_INTELLIGENCE,
            defense: vitality as f64 + strength as f64 * DEFENSE_PER_STRENGTH,
            evasion: dexterity as f64 * EVASION_PER_DEXTERITY,
            crit_chance: luck as f64 * CRIT_CHANCE_PER_LUCK
                + dexterity as f64 * CRIT_CHANCE_PER_DEXTERITY,
            crit_damage: CRIT_DAMAGE_BASE_PERCENT + luck as f64 * CRIT_DAMAGE_PER_LUCK,
        }
    }
}
