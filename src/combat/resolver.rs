//! Pure combat math: hit checks and damage rolls.
//!
//! These functions never fail and never touch state; every request produces
//! a deterministic result for the given rolls. All randomness comes in
//! through the caller's `Rng` so tests can seed it.

use rand::Rng;

use crate::character::stats::DerivedStats;
use crate::core::constants::*;

/// Outcome of a hit check: whether the attack lands, and whether it crits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRoll {
    pub hit: bool,
    pub critical: bool,
}

/// Chance for the attack to land, before any roll: 85 minus 0.8 per point
/// of defender evasion, clamped to [5, 95].
pub fn hit_chance(defender: &DerivedStats) -> f64 {
    (BASE_HIT_CHANCE - defender.evasion * EVASION_HIT_FACTOR).clamp(HIT_CHANCE_MIN, HIT_CHANCE_MAX)
}

/// Rolls hit and crit. The crit roll is independent of the hit roll and
/// only meaningful when the attack lands; crit chance caps at 50.
pub fn hit_check(attacker: &DerivedStats, defender: &DerivedStats, rng: &mut impl Rng) -> HitRoll {
    let hit = rng.gen_range(0.0..=100.0) <= hit_chance(defender);
    let crit_chance = attacker.crit_chance.min(CRIT_CHANCE_CAP);
    let critical = hit && rng.gen_range(0.0..=100.0) <= crit_chance;
    HitRoll { hit, critical }
}

/// Physical damage: attack power plus weapon bonus, ±10% variance, minus
/// half the defender's defense, floored at 1, then the crit multiplier.
pub fn physical_damage(
    attacker: &DerivedStats,
    defender: &DerivedStats,
    weapon_bonus: i32,
    critical: bool,
    rng: &mut impl Rng,
) -> i32 {
    damage_roll(
        attacker.physical_damage + weapon_bonus,
        defender.defense * PHYSICAL_DEFENSE_FACTOR,
        attacker.crit_damage,
        critical,
        rng,
    )
}

/// Magic damage: same pipeline with a softer defense coefficient — magic
/// is mitigated less by defense.
pub fn magic_damage(
    attacker: &DerivedStats,
    defender: &DerivedStats,
    weapon_bonus: i32,
    critical: bool,
    rng: &mut impl Rng,
) -> i32 {
    damage_roll(
        attacker.magic_damage + weapon_bonus,
        defender.defense * MAGIC_DEFENSE_FACTOR,
        attacker.crit_damage,
        critical,
        rng,
    )
}

fn damage_roll(
    base: i32,
    mitigation: f64,
    crit_damage_percent: f64,
    critical: bool,
    rng: &mut impl Rng,
) -> i32 {
    let variance = rng.gen_range(1.0 - DAMAGE_VARIANCE..=1.0 + DAMAGE_VARIANCE);
    let mut damage = (base as f64 * variance - mitigation).max(MIN_DAMAGE as f64);
    if critical {
        damage *= crit_damage_percent / 100.0;
    }
    (damage.floor() as i32).max(MIN_DAMAGE)
}
