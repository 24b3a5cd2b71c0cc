//! Integration test: stat allocation -> derived stats -> persistence.
//!
//! Walks a character through point allocation, undo, timed buffs, and a
//! save/load round trip, checking the derived-stat invariants hold at
//! every step.

use wildfang::character::stat_block::{StatEvent, StatModifier};
use wildfang::character::stats::StatKind;
use wildfang::core::error::SaveError;
use wildfang::StatBlock;

// =========================================================================
// Allocation and undo
// =========================================================================

#[test]
fn test_allocation_spends_points_and_updates_derived() {
    let mut block = StatBlock::new();
    block.add_stat_points(5).unwrap();

    for _ in 0..5 {
        assert!(!block.allocate_stat_point(StatKind::Vitality).is_empty());
    }
    assert_eq!(block.base_stat(StatKind::Vitality), 15);
    assert_eq!(block.available_points(), 0);
    assert_eq!(block.derived().max_health, 100 + 15 * 10);

    // No points left: the sixth attempt is rejected and changes nothing.
    assert!(block.allocate_stat_point(StatKind::Vitality).is_empty());
    assert_eq!(block.base_stat(StatKind::Vitality), 15);
}

#[test]
fn test_undo_restores_exact_value_and_cost_up_to_depth() {
    let mut block = StatBlock::new();
    block.add_stat_points(50).unwrap();

    let mut history = Vec::new();
    for _ in 0..10 {
        let before = (
            block.base_stat(StatKind::Luck),
            block.available_points(),
        );
        assert!(!block.allocate_stat_point(StatKind::Luck).is_empty());
        history.push(before);
    }

    for (value, points) in history.into_iter().rev() {
        assert!(block.undo_last_allocation());
        assert_eq!(block.base_stat(StatKind::Luck), value);
        assert_eq!(block.available_points(), points);
    }
    assert!(!block.undo_last_allocation(), "history depth is 10");
}

// =========================================================================
// Modifiers and vitals
// =========================================================================

#[test]
fn test_health_preserved_and_clamped_across_modifier_changes() {
    let mut block = StatBlock::new();
    block.modify_health(-50);
    let wounded = block.current_health();

    let id = block.add_modifier(StatModifier::permanent(StatKind::Vitality, 10, "feast"));
    assert_eq!(
        block.current_health(),
        wounded,
        "raising max health must not heal"
    );
    assert!(block.current_health() <= block.derived().max_health);

    block.remove_modifier(&id);
    assert!(block.current_health() <= block.derived().max_health);
}

#[test]
fn test_buff_expiry_emits_event_and_reverts_stats() {
    let mut block = StatBlock::new();
    block.add_modifier(StatModifier::new(StatKind::Strength, 20, 2500.0, "war-howl"));
    assert_eq!(block.derived().physical_damage, 60);

    let mut expired = Vec::new();
    for _ in 0..30 {
        expired.extend(block.update(100.0));
    }
    assert_eq!(expired.len(), 1);
    assert!(matches!(expired[0], StatEvent::ModifierExpired { .. }));
    assert_eq!(block.derived().physical_damage, 20);
}

#[test]
fn test_death_and_revival_transitions() {
    let mut block = StatBlock::new();
    let max = block.derived().max_health;

    assert_eq!(block.modify_health(-max), vec![StatEvent::Died]);
    assert_eq!(block.modify_health(1), vec![StatEvent::Revived]);
    // Already above zero: a further heal is silent.
    assert!(block.modify_health(5).is_empty());
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn test_save_load_round_trip_preserves_progression() {
    let mut block = StatBlock::new();
    block.add_stat_points(8).unwrap();
    block.allocate_stat_point(StatKind::Dexterity);
    block.allocate_stat_point(StatKind::Dexterity);
    block.add_modifier_with_id(
        "buff:haste",
        StatModifier::permanent(StatKind::Dexterity, 5, "haste"),
    );
    block.modify_health(-33);

    let restored = StatBlock::from_json(&block.to_json().unwrap()).unwrap();
    assert_eq!(restored.base_stat(StatKind::Dexterity), 12);
    assert_eq!(restored.effective_stat(StatKind::Dexterity), 17);
    assert_eq!(restored.available_points(), 6);
    assert_eq!(restored.current_health(), block.current_health());
    assert_eq!(restored.derived(), block.derived());
}

#[test]
fn test_corrupt_saves_are_distinguishable() {
    assert!(matches!(
        StatBlock::from_json("garbage}{"),
        Err(SaveError::Syntax(_))
    ));
    assert!(matches!(
        StatBlock::from_json("{\"base\": \"nope\"}"),
        Err(SaveError::Structure(_))
    ));
}
