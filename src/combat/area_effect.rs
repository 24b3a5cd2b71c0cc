//! Area-of-effect engine: instant bursts and damage-over-time fields.
//!
//! Instant effects run one damage pass and never enter the active list.
//! Overtime effects stay in the arena and re-run the pass once per full
//! second of elapsed time until their duration runs out.

use std::collections::HashMap;

use log::{debug, warn};
use rand::Rng;

use crate::combat::types::{CombatTarget, Vec2};
use crate::core::arena::SlotArena;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Instant,
    Overtime,
}

/// Static definition of an area effect.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEffectType {
    pub id: String,
    pub base_damage: i32,
    pub radius: f64,
    pub kind: EffectKind,
    /// Ignored for instant effects.
    pub duration_ms: f64,
}

/// One active (overtime) effect.
#[derive(Debug, Clone)]
pub struct AreaEffect {
    pub type_id: String,
    pub center: Vec2,
    pub radius: f64,
    /// Caster-scaled damage, computed once at creation.
    pub damage: i32,
    pub total_duration_ms: f64,
    pub remaining_ms: f64,
    pub source_id: String,
    tick_accumulator_ms: f64,
}

/// Damage applied to one target by a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaHit {
    pub target_id: String,
    pub damage: i32,
    pub critical: bool,
    pub target_died: bool,
}

/// What `create_area_effect` did: the initial pass, and the handle of the
/// persisting effect for overtime kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEffectReport {
    pub effect: Option<u64>,
    pub damage: i32,
    pub hits: Vec<AreaHit>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AreaEffectEvent {
    /// An overtime effect re-applied its damage pass.
    Tick { effect: u64, hits: Vec<AreaHit> },
    Expired { effect: u64 },
}

pub struct AreaEffectEngine {
    types: HashMap<String, AreaEffectType>,
    active: SlotArena<AreaEffect>,
}

impl Default for AreaEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaEffectEngine {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            active: SlotArena::new(),
        }
    }

    /// Engine pre-loaded with the built-in effect kinds.
    pub fn with_default_types() -> Self {
        let mut engine = Self::new();
        for ty in default_area_effect_types() {
            engine.register_type(ty);
        }
        engine
    }

    pub fn register_type(&mut self, ty: AreaEffectType) {
        self.types.insert(ty.id.clone(), ty);
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn effect(&self, id: u64) -> Option<&AreaEffect> {
        self.active.get(id)
    }

    /// Creates an effect at `center` and immediately runs its first damage
    /// pass. Returns `None` for unknown type ids. Damage scales with the
    /// caster's intelligence: `floor(base * (1 + int/100))`.
    pub fn create_area_effect(
        &mut self,
        type_id: &str,
        center: Vec2,
        source_id: &str,
        caster_intelligence: i32,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
    ) -> Option<AreaEffectReport> {
        let Some(ty) = self.types.get(type_id).cloned() else {
            warn!("unknown area effect type {type_id:?}");
            return None;
        };

        let damage =
            (ty.base_damage as f64 * (1.0 + caster_intelligence as f64 / 100.0)).floor() as i32;
        let hits = damage_pass(center, ty.radius, damage, source_id, targets, rng);

        let effect = match ty.kind {
            EffectKind::Instant => None,
            EffectKind::Overtime => {
                let id = self.active.insert(AreaEffect {
                    type_id: ty.id.clone(),
                    center,
                    radius: ty.radius,
                    damage,
                    total_duration_ms: ty.duration_ms,
                    remaining_ms: ty.duration_ms,
                    source_id: source_id.to_string(),
                    tick_accumulator_ms: 0.0,
                });
                debug!("area effect {id} created ({type_id})");
                Some(id)
            }
        };

        Some(AreaEffectReport {
            effect,
            damage,
            hits,
        })
    }

    /// Advances overtime effects: one damage pass per full second elapsed,
    /// removal once the duration is spent.
    pub fn update(
        &mut self,
        dt_ms: f64,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
    ) -> Vec<AreaEffectEvent> {
        let mut events = Vec::new();

        for id in self.active.ids() {
            let mut passes = 0;
            let expired = {
                let effect = self.active.get_mut(id).expect("active id");
                let step = dt_ms.min(effect.remaining_ms);
                effect.remaining_ms -= step;
                effect.tick_accumulator_ms += step;
                while effect.tick_accumulator_ms >= AOE_TICK_INTERVAL_MS {
                    effect.tick_accumulator_ms -= AOE_TICK_INTERVAL_MS;
                    passes += 1;
                }
                effect.remaining_ms <= 0.0
            };

            for _ in 0..passes {
                let (center, radius, damage, source_id) = {
                    let effect = self.active.get(id).expect("active id");
                    (
                        effect.center,
                        effect.radius,
                        effect.damage,
                        effect.source_id.clone(),
                    )
                };
                let hits = damage_pass(center, radius, damage, &source_id, targets, rng);
                events.push(AreaEffectEvent::Tick { effect: id, hits });
            }

            if expired {
                self.active.remove(id);
                debug!("area effect {id} expired");
                events.push(AreaEffectEvent::Expired { effect: id });
            }
        }

        events
    }

    /// True when `(x, y)` lies inside any currently active effect.
    pub fn is_point_in_area(&self, x: f64, y: f64) -> bool {
        let point = Vec2::new(x, y);
        self.active
            .iter()
            .any(|(_, effect)| effect.center.distance(point) <= effect.radius)
    }
}

/// Damage multiplier at `distance` from the center: linear falloff down to
/// 0.5 at the edge.
pub fn falloff_multiplier(distance: f64, radius: f64) -> f64 {
    (1.0 - (distance / radius) * 0.5).max(AOE_FALLOFF_FLOOR)
}

/// One damage pass over every live target inside the radius, excluding the
/// source. Each hit rolls an independent 10% critical for double damage.
fn damage_pass(
    center: Vec2,
    radius: f64,
    damage: i32,
    source_id: &str,
    targets: &mut [CombatTarget],
    rng: &mut impl Rng,
) -> Vec<AreaHit> {
    let mut hits = Vec::new();
    for target in targets.iter_mut() {
        if !target.is_alive() || target.id == source_id {
            continue;
        }
        let distance = center.distance(target.position);
        if distance > radius {
            continue;
        }

        let multiplier = falloff_multiplier(distance, radius);
        let mitigated = (damage as f64 * multiplier).floor() - target.stat_block.derived().defense;
        let mut per_target = (mitigated.floor() as i32).max(MIN_DAMAGE);

        let critical = rng.gen_bool(AOE_CRIT_CHANCE);
        if critical {
            per_target = (per_target as f64 * AOE_CRIT_MULTIPLIER) as i32;
        }

        let died = target
            .stat_block
            .modify_health(-per_target)
            .iter()
            .any(|e| matches!(e, crate::character::stat_block::StatEvent::Died));

        hits.push(AreaHit {
            target_id: target.id.clone(),
            damage: per_target,
            critical,
            target_died: died,
        });
    }
    hits
}

/// Built-in area effect kinds.
pub fn default_area_effect_types() -> Vec<AreaEffectType> {
    vec![
        AreaEffectType {
            id: "ember-burst".to_string(),
            base_damage: 30,
            radius: 100.0,
            kind: EffectKind::Instant,
            duration_ms: 0.0,
        },
        AreaEffectType {
            id: "thorn-field".to_string(),
            base_damage: 12,
            radius: 140.0,
            kind: EffectKind::Overtime,
            duration_ms: 5000.0,
        },
        AreaEffectType {
            id: "frost-ring".to_string(),
            base_damage: 20,
            radius: 80.0,
            kind: EffectKind::Overtime,
            duration_ms: 3000.0,
        },
    ]
}
