//! StatBlock: allocatable base stats, timed modifiers, and derived combat
//! stats for one actor.
//!
//! Mutating operations return [`StatEvent`]s describing what happened so the
//! driver loop can forward them to the presentation layer. The block never
//! holds listener callbacks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::stats::{BaseStats, DerivedStats, StatKind};
use crate::core::constants::*;
use crate::core::error::{GameError, SaveError};

/// A single event produced by a StatBlock operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StatEvent {
    /// A base stat changed value (allocation or undo).
    StatChanged { stat: StatKind, old: i32, new: i32 },
    /// A timed modifier ran out and was pruned.
    ModifierExpired { id: String },
    /// Health reached zero.
    Died,
    /// Health left zero.
    Revived,
}

/// Additive adjustment to one base stat, with an optional expiry.
///
/// A negative `duration_ms` marks the modifier permanent; `expires_at` is
/// stamped against the owning block's clock when the modifier is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatKind,
    pub value: i32,
    pub duration_ms: f64,
    pub source: String,
    #[serde(default)]
    pub expires_at: Option<f64>,
}

impl StatModifier {
    pub fn new(stat: StatKind, value: i32, duration_ms: f64, source: &str) -> Self {
        Self {
            stat,
            value,
            duration_ms,
            source: source.to_string(),
            expires_at: None,
        }
    }

    /// A modifier that never expires on its own.
    pub fn permanent(stat: StatKind, value: i32, source: &str) -> Self {
        Self::new(stat, value, -1.0, source)
    }
}

/// One allocation on the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct AllocationRecord {
    stat: StatKind,
    old_value: i32,
    cost: i32,
}

/// Base stats, modifiers, derived stats, and vitals for one actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBlock {
    base: BaseStats,
    derived: DerivedStats,
    current_health: i32,
    current_mana: i32,
    available_points: i32,
    modifiers: HashMap<String, StatModifier>,
    undo_stack: Vec<AllocationRecord>,
    #[serde(default)]
    clock_ms: f64,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl StatBlock {
    pub fn new() -> Self {
        let base = BaseStats::new();
        let derived = DerivedStats::from_values(base.as_array());
        Self {
            base,
            current_health: derived.max_health,
            current_mana: derived.max_mana,
            derived,
            available_points: 0,
            modifiers: HashMap::new(),
            undo_stack: Vec::new(),
            clock_ms: 0.0,
        }
    }

    pub fn base_stat(&self, stat: StatKind) -> i32 {
        self.base.get(stat)
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn current_mana(&self) -> i32 {
        self.current_mana
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn available_points(&self) -> i32 {
        self.available_points
    }

    // ── Stat point allocation ───────────────────────────────────

    /// Grants allocatable stat points. Negative amounts are a caller bug.
    pub fn add_stat_points(&mut self, amount: i32) -> Result<(), GameError> {
        if amount < 0 {
            return Err(GameError::NegativeAmount(amount as i64));
        }
        self.available_points += amount;
        Ok(())
    }

    /// Cost of raising a stat from its current value: 1 below 50, then one
    /// more per full 10 points at or above 50.
    pub fn allocation_cost(&self, stat: StatKind) -> i32 {
        let value = self.base.get(stat);
        if value < ALLOCATION_COST_KNEE {
            1
        } else {
            2 + (value - ALLOCATION_COST_KNEE) / ALLOCATION_COST_STEP
        }
    }

    /// Spends points to raise a stat by one. Returns the resulting events,
    /// or an empty vec when the allocation is rejected (not enough points,
    /// or the stat is already at cap).
    pub fn allocate_stat_point(&mut self, stat: StatKind) -> Vec<StatEvent> {
        let old = self.base.get(stat);
        let cost = self.allocation_cost(stat);
        if old >= STAT_MAX || self.available_points < cost {
            return Vec::new();
        }

        self.available_points -= cost;
        self.base.set(stat, old + 1);

        if self.undo_stack.len() == ALLOCATION_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(AllocationRecord {
            stat,
            old_value: old,
            cost,
        });

        self.recompute();
        vec![StatEvent::StatChanged {
            stat,
            old,
            new: old + 1,
        }]
    }

    /// Reverts the most recent allocation, refunding its exact cost.
    /// Returns false when the history is empty.
    pub fn undo_last_allocation(&mut self) -> bool {
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };
        self.base.set(record.stat, record.old_value);
        self.available_points += record.cost;
        self.recompute();
        true
    }

    // ── Modifiers ───────────────────────────────────────────────

    /// Adds a modifier under a generated id, returning the id.
    pub fn add_modifier(&mut self, modifier: StatModifier) -> String {
        let id = Uuid::new_v4().to_string();
        self.add_modifier_with_id(&id, modifier);
        id
    }

    /// Adds a modifier under a caller-supplied id, replacing any modifier
    /// already stored under that id.
    pub fn add_modifier_with_id(&mut self, id: &str, mut modifier: StatModifier) {
        modifier.expires_at = if modifier.duration_ms < 0.0 {
            None
        } else {
            Some(self.clock_ms + modifier.duration_ms)
        };
        self.modifiers.insert(id.to_string(), modifier);
        self.recompute();
    }

    pub fn remove_modifier(&mut self, id: &str) -> bool {
        if self.modifiers.remove(id).is_none() {
            return false;
        }
        self.recompute();
        true
    }

    /// Removes every modifier whose id starts with `prefix`. Returns how
    /// many were removed.
    pub fn remove_modifiers_with_prefix(&mut self, prefix: &str) -> usize {
        let ids: Vec<String> = self
            .modifiers
            .keys()
            .filter(|id| id.starts_with(prefix))
            .cloned()
            .collect();
        for id in &ids {
            self.modifiers.remove(id);
        }
        if !ids.is_empty() {
            self.recompute();
        }
        ids.len()
    }

    pub fn modifier(&self, id: &str) -> Option<&StatModifier> {
        self.modifiers.get(id)
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    fn modifier_sum(&self, stat: StatKind) -> i32 {
        self.modifiers
            .values()
            .filter(|m| m.stat == stat)
            .map(|m| m.value)
            .sum()
    }

    /// Base value plus all active modifiers, floored at 1.
    pub fn effective_stat(&self, stat: StatKind) -> i32 {
        (self.base.get(stat) + self.modifier_sum(stat)).max(STAT_MIN)
    }

    /// Like [`effective_stat`](Self::effective_stat) but ignoring modifiers
    /// whose id starts with `prefix` (used by the stat calculator to keep
    /// materialized equipment modifiers from double-counting).
    pub fn effective_stat_excluding(&self, stat: StatKind, prefix: &str) -> i32 {
        let sum: i32 = self
            .modifiers
            .iter()
            .filter(|(id, m)| m.stat == stat && !id.starts_with(prefix))
            .map(|(_, m)| m.value)
            .sum();
        (self.base.get(stat) + sum).max(STAT_MIN)
    }

    pub fn effective_values(&self) -> [i32; NUM_STATS] {
        let mut values = [0; NUM_STATS];
        for stat in StatKind::all() {
            values[stat.index()] = self.effective_stat(stat);
        }
        values
    }

    // ── Vitals ──────────────────────────────────────────────────

    /// Applies a health delta, clamped to [0, max]. Emits `Died` when health
    /// reaches zero and `Revived` when it leaves zero.
    pub fn modify_health(&mut self, delta: i32) -> Vec<StatEvent> {
        let old = self.current_health;
        self.current_health = (old + delta).clamp(0, self.derived.max_health);

        let mut events = Vec::new();
        if old > 0 && self.current_health == 0 {
            events.push(StatEvent::Died);
        } else if old == 0 && self.current_health > 0 {
            events.push(StatEvent::Revived);
        }
        events
    }

    /// Applies a mana delta, clamped to [0, max].
    pub fn modify_mana(&mut self, delta: i32) {
        self.current_mana = (self.current_mana + delta).clamp(0, self.derived.max_mana);
    }

    // ── Frame update ────────────────────────────────────────────

    /// Advances the block's clock and prunes expired modifiers.
    pub fn update(&mut self, dt_ms: f64) -> Vec<StatEvent> {
        self.clock_ms += dt_ms;

        let expired: Vec<String> = self
            .modifiers
            .iter()
            .filter(|(_, m)| matches!(m.expires_at, Some(at) if at <= self.clock_ms))
            .map(|(id, _)| id.clone())
            .collect();

        if expired.is_empty() {
            return Vec::new();
        }
        for id in &expired {
            self.modifiers.remove(id);
        }
        self.recompute();
        expired
            .into_iter()
            .map(|id| StatEvent::ModifierExpired { id })
            .collect()
    }

    /// Recomputes derived stats from effective base stats. Current health
    /// and mana are preserved but re-clamped to the new maximums.
    fn recompute(&mut self) {
        self.derived = DerivedStats::from_values(self.effective_values());
        self.current_health = self.current_health.clamp(0, self.derived.max_health);
        self.current_mana = self.current_mana.clamp(0, self.derived.max_mana);
    }

    // ── Serialization ───────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        let mut block: StatBlock = serde_json::from_str(text)?;
        // Hand-edited saves can carry out-of-range base values; re-setting
        // each one runs it through the [1, 100] clamp.
        for stat in StatKind::all() {
            block.base.set(stat, block.base.get(stat));
        }
        // Derived values in the save may predate a formula change.
        block.recompute();
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with_points(points: i32) -> StatBlock {
        let mut block = StatBlock::new();
        block.add_stat_points(points).unwrap();
        block
    }

    #[test]
    fn test_allocation_scenario_five_strength_points() {
        let mut block = block_with_points(5);

        for _ in 0..5 {
            let events = block.allocate_stat_point(StatKind::Strength);
            assert_eq!(events.len(), 1);
        }
        assert_eq!(block.base_stat(StatKind::Strength), 15);
        assert_eq!(block.available_points(), 0);

        // Sixth attempt has no points to spend.
        assert!(block.allocate_stat_point(StatKind::Strength).is_empty());
        assert_eq!(block.base_stat(StatKind::Strength), 15);
    }

    #[test]
    fn test_allocation_cost_escalates_at_50() {
        let mut block = StatBlock::new();
        for (value, expected) in [(10, 1), (49, 1), (50, 2), (59, 2), (60, 3), (90, 6), (99, 6)] {
            block.base_stat_set_for_test(StatKind::Luck, value);
            assert_eq!(
                block.allocation_cost(StatKind::Luck),
                expected,
                "cost at value {value}"
            );
        }
    }

    #[test]
    fn test_allocation_rejected_at_cap() {
        let mut block = block_with_points(100);
        block.base_stat_set_for_test(StatKind::Strength, 100);
        assert!(block.allocate_stat_point(StatKind::Strength).is_empty());
    }

    #[test]
    fn test_undo_round_trip() {
        let mut block = block_with_points(10);
        block.base_stat_set_for_test(StatKind::Dexterity, 50);

        let before_points = block.available_points();
        assert!(!block.allocate_stat_point(StatKind::Dexterity).is_empty());
        assert_eq!(block.base_stat(StatKind::Dexterity), 51);
        assert_eq!(block.available_points(), before_points - 2);

        assert!(block.undo_last_allocation());
        assert_eq!(block.base_stat(StatKind::Dexterity), 50);
        assert_eq!(block.available_points(), before_points);
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let mut block = block_with_points(20);
        for _ in 0..12 {
            assert!(!block.allocate_stat_point(StatKind::Vitality).is_empty());
        }
        let mut undone = 0;
        while block.undo_last_allocation() {
            undone += 1;
        }
        assert_eq!(undone, 10);
    }

    #[test]
    fn test_undo_empty_history() {
        let mut block = StatBlock::new();
        assert!(!block.undo_last_allocation());
    }

    #[test]
    fn test_modifier_affects_derived_stats() {
        let mut block = StatBlock::new();
        let before = block.derived().max_health;

        let id = block.add_modifier(StatModifier::permanent(StatKind::Vitality, 5, "potion"));
        assert_eq!(block.derived().max_health, before + 50);

        assert!(block.remove_modifier(&id));
        assert_eq!(block.derived().max_health, before);
        assert!(!block.remove_modifier(&id));
    }

    #[test]
    fn test_timed_modifier_expires_on_update() {
        let mut block = StatBlock::new();
        block.add_modifier(StatModifier::new(StatKind::Strength, 10, 500.0, "buff"));
        assert_eq!(block.effective_stat(StatKind::Strength), 20);

        assert!(block.update(300.0).is_empty());
        assert_eq!(block.effective_stat(StatKind::Strength), 20);

        let events = block.update(300.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StatEvent::ModifierExpired { .. }));
        assert_eq!(block.effective_stat(StatKind::Strength), 10);
    }

    #[test]
    fn test_permanent_modifier_never_expires() {
        let mut block = StatBlock::new();
        block.add_modifier(StatModifier::permanent(StatKind::Luck, 3, "blessing"));
        assert!(block.update(1_000_000.0).is_empty());
        assert_eq!(block.effective_stat(StatKind::Luck), 13);
    }

    #[test]
    fn test_effective_stat_floors_at_one() {
        let mut block = StatBlock::new();
        block.add_modifier(StatModifier::permanent(StatKind::Strength, -50, "curse"));
        assert_eq!(block.effective_stat(StatKind::Strength), 1);
    }

    #[test]
    fn test_health_clamped_after_modifier_removal() {
        let mut block = StatBlock::new();
        let id = block.add_modifier(StatModifier::permanent(StatKind::Vitality, 20, "feast"));
        block.modify_health(10_000); // top off at the boosted max
        let boosted = block.current_health();
        assert_eq!(boosted, block.derived().max_health);

        block.remove_modifier(&id);
        assert!(block.current_health() <= block.derived().max_health);
        assert_eq!(block.current_health(), block.derived().max_health);
    }

    #[test]
    fn test_died_and_revived_events() {
        let mut block = StatBlock::new();
        let max = block.derived().max_health;

        let events = block.modify_health(-max);
        assert_eq!(events, vec![StatEvent::Died]);
        assert_eq!(block.current_health(), 0);
        assert!(!block.is_alive());

        // Further damage at zero emits nothing.
        assert!(block.modify_health(-10).is_empty());

        let events = block.modify_health(25);
        assert_eq!(events, vec![StatEvent::Revived]);
        assert!(block.is_alive());
    }

    #[test]
    fn test_mana_clamps() {
        let mut block = StatBlock::new();
        block.modify_mana(-10_000);
        assert_eq!(block.current_mana(), 0);
        block.modify_mana(10_000);
        assert_eq!(block.current_mana(), block.derived().max_mana);
    }

    #[test]
    fn test_negative_stat_points_rejected() {
        let mut block = StatBlock::new();
        assert_eq!(
            block.add_stat_points(-5),
            Err(GameError::NegativeAmount(-5))
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut block = block_with_points(3);
        block.allocate_stat_point(StatKind::Intelligence);
        block.add_modifier_with_id(
            "buff:focus",
            StatModifier::permanent(StatKind::Intelligence, 4, "focus"),
        );
        block.modify_health(-17);

        let json = block.to_json().unwrap();
        let restored = StatBlock::from_json(&json).unwrap();
        assert_eq!(restored.base_stat(StatKind::Intelligence), 11);
        assert_eq!(restored.effective_stat(StatKind::Intelligence), 15);
        assert_eq!(restored.current_health(), block.current_health());
        assert_eq!(restored.available_points(), block.available_points());
    }

    #[test]
    fn test_from_json_clamps_out_of_range_base_stats() {
        let json = StatBlock::new()
            .to_json()
            .unwrap()
            .replace("[10,10,10,10,10]", "[500,0,10,10,10]");

        let block = StatBlock::from_json(&json).unwrap();
        assert_eq!(block.base_stat(StatKind::Strength), 100);
        assert_eq!(block.base_stat(StatKind::Dexterity), 1);
        assert_eq!(block.derived().physical_damage, 200);
    }

    #[test]
    fn test_from_json_malformed_input() {
        assert!(matches!(
            StatBlock::from_json("{truncated"),
            Err(SaveError::Syntax(_))
        ));
        assert!(matches!(
            StatBlock::from_json("{\"wrong\": true}"),
            Err(SaveError::Structure(_))
        ));
    }

    impl StatBlock {
        /// Test-only direct write that bypasses allocation costs.
        fn base_stat_set_for_test(&mut self, stat: StatKind, value: i32) {
            self.base.set(stat, value);
            self.recompute();
        }
    }
}
