//! Ballistic projectile engine: straight shots, gravity-compensated arcs,
//! piercing, and secondary explosions.
//!
//! Live projectiles sit in a slot arena and are integrated every frame.
//! Firing snapshots the caster's derived stats; resolution at impact time
//! uses that snapshot, not whatever the caster looks like later.

use std::collections::HashMap;

use log::{debug, warn};
use rand::Rng;

use crate::character::stats::DerivedStats;
use crate::combat::resolver;
use crate::combat::types::{CombatTarget, Vec2};
use crate::core::arena::SlotArena;
use crate::core::constants::*;

/// Static definition of a projectile kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileType {
    pub id: String,
    /// Pixels per second.
    pub speed: f64,
    /// Multiplier applied to the resolver's damage roll.
    pub damage: f64,
    /// Point-radius collision distance against targets.
    pub collision_radius: f64,
    /// Total travel distance before despawning.
    pub range: f64,
    /// 0.0 flies flat; 1.0 takes full gravity.
    pub gravity_factor: f64,
    pub piercing: bool,
    /// Secondary blast radius at the impact point, if any.
    pub explosion_radius: Option<f64>,
}

/// One in-flight projectile.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub type_id: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub remaining_range: f64,
    pub source_id: String,
    already_hit: Vec<String>,
    caster: DerivedStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    Impact,
    RangeExhausted,
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileEvent {
    Hit {
        projectile: u64,
        target_id: String,
        damage: i32,
        critical: bool,
        target_died: bool,
    },
    /// The projectile reached a target but the hit roll failed.
    Evaded { projectile: u64, target_id: String },
    ExplosionHit {
        projectile: u64,
        target_id: String,
        damage: i32,
        target_died: bool,
    },
    Despawned {
        projectile: u64,
        reason: DespawnReason,
    },
}

pub struct ProjectileEngine {
    types: HashMap<String, ProjectileType>,
    live: SlotArena<Projectile>,
}

impl Default for ProjectileEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileEngine {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            live: SlotArena::new(),
        }
    }

    /// Engine pre-loaded with the built-in projectile kinds.
    pub fn with_default_types() -> Self {
        let mut engine = Self::new();
        for ty in default_projectile_types() {
            engine.register_type(ty);
        }
        engine
    }

    pub fn register_type(&mut self, ty: ProjectileType) {
        self.types.insert(ty.id.clone(), ty);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn projectile(&self, id: u64) -> Option<&Projectile> {
        self.live.get(id)
    }

    /// Fires a straight shot from `src` toward `dst`. Returns the handle,
    /// or `None` for an unknown type or a zero-length direction.
    pub fn fire_projectile(
        &mut self,
        type_id: &str,
        src: Vec2,
        dst: Vec2,
        source_id: &str,
        caster: &DerivedStats,
    ) -> Option<u64> {
        let ty = self.lookup(type_id)?;
        let direction = Vec2::new(dst.x - src.x, dst.y - src.y).normalized()?;
        let velocity = direction.scaled(ty.speed);
        Some(self.spawn(type_id, src, velocity, ty.range, source_id, caster))
    }

    /// Fires with a gravity-compensated arc: the vertical velocity is
    /// solved so the parabola passes through `dst` at the estimated flight
    /// time (horizontal speed damped to 80%). Zero-gravity types fall back
    /// to the straight shot.
    pub fn fire_projectile_with_arc(
        &mut self,
        type_id: &str,
        src: Vec2,
        dst: Vec2,
        source_id: &str,
        caster: &DerivedStats,
    ) -> Option<u64> {
        let ty = self.lookup(type_id)?;
        if ty.gravity_factor == 0.0 {
            return self.fire_projectile(type_id, src, dst, source_id, caster);
        }

        let delta = Vec2::new(dst.x - src.x, dst.y - src.y);
        let distance = delta.length();
        if distance == 0.0 {
            return None;
        }
        let gravity = GRAVITY * ty.gravity_factor;
        let time = distance / (ty.speed * ARC_HORIZONTAL_DAMPING);
        let velocity = Vec2::new(delta.x / time, delta.y / time - 0.5 * gravity * time);
        Some(self.spawn(type_id, src, velocity, ty.range, source_id, caster))
    }

    fn lookup(&self, type_id: &str) -> Option<ProjectileType> {
        match self.types.get(type_id) {
            Some(ty) => Some(ty.clone()),
            None => {
                warn!("unknown projectile type {type_id:?}");
                None
            }
        }
    }

    fn spawn(
        &mut self,
        type_id: &str,
        position: Vec2,
        velocity: Vec2,
        range: f64,
        source_id: &str,
        caster: &DerivedStats,
    ) -> u64 {
        let id = self.live.insert(Projectile {
            type_id: type_id.to_string(),
            position,
            velocity,
            remaining_range: range,
            source_id: source_id.to_string(),
            already_hit: Vec::new(),
            caster: *caster,
        });
        debug!("projectile {id} spawned ({type_id})");
        id
    }

    /// Integrates every live projectile by `dt_ms` and resolves collisions
    /// against `targets`.
    pub fn update(
        &mut self,
        dt_ms: f64,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
    ) -> Vec<ProjectileEvent> {
        let dt = dt_ms / 1000.0;
        let mut events = Vec::new();

        for id in self.live.ids() {
            let ty = {
                let projectile = self.live.get(id).expect("live id");
                self.types[&projectile.type_id].clone()
            };

            // Integrate.
            let despawn = {
                let projectile = self.live.get_mut(id).expect("live id");
                projectile.velocity.y += GRAVITY * ty.gravity_factor * dt;
                let step = projectile.velocity.scaled(dt);
                projectile.position = projectile.position.offset(step);
                projectile.remaining_range -= step.length();

                if projectile.remaining_range <= 0.0 {
                    Some(DespawnReason::RangeExhausted)
                } else if out_of_bounds(projectile.position) {
                    Some(DespawnReason::OutOfBounds)
                } else {
                    None
                }
            };

            if let Some(reason) = despawn {
                self.live.remove(id);
                debug!("projectile {id} despawned: {reason:?}");
                events.push(ProjectileEvent::Despawned {
                    projectile: id,
                    reason,
                });
                continue;
            }

            if self.collide(id, &ty, targets, rng, &mut events) {
                self.live.remove(id);
                events.push(ProjectileEvent::Despawned {
                    projectile: id,
                    reason: DespawnReason::Impact,
                });
            }
        }

        events
    }

    /// Runs collision for one projectile. Returns true when the projectile
    /// should despawn (non-piercing impact).
    fn collide(
        &mut self,
        id: u64,
        ty: &ProjectileType,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
        events: &mut Vec<ProjectileEvent>,
    ) -> bool {
        for index in 0..targets.len() {
            let (position, caster, skip) = {
                let projectile = self.live.get(id).expect("live id");
                let target = &targets[index];
                let skip = !target.is_alive()
                    || target.id == projectile.source_id
                    || projectile.already_hit.contains(&target.id)
                    || projectile.position.distance(target.position) > ty.collision_radius;
                (projectile.position, projectile.caster, skip)
            };
            if skip {
                continue;
            }

            let target_id = targets[index].id.clone();
            self.live
                .get_mut(id)
                .expect("live id")
                .already_hit
                .push(target_id.clone());

            let roll = resolver::hit_check(&caster, targets[index].stat_block.derived(), rng);
            if roll.hit {
                let rolled = resolver::physical_damage(
                    &caster,
                    targets[index].stat_block.derived(),
                    0,
                    roll.critical,
                    rng,
                );
                let damage = ((rolled as f64 * ty.damage).floor() as i32).max(MIN_DAMAGE);
                let died = apply_damage(&mut targets[index], damage);
                events.push(ProjectileEvent::Hit {
                    projectile: id,
                    target_id: target_id.clone(),
                    damage,
                    critical: roll.critical,
                    target_died: died,
                });

                if let Some(radius) = ty.explosion_radius {
                    self.explode(id, ty, position, radius, &caster, targets, events);
                }
            } else {
                events.push(ProjectileEvent::Evaded {
                    projectile: id,
                    target_id,
                });
            }

            if !ty.piercing {
                return true;
            }
        }
        false
    }

    /// Secondary blast at the impact point: 70% of the projectile's damage,
    /// attenuated to 50% at the blast edge, against targets not yet hit.
    fn explode(
        &mut self,
        id: u64,
        ty: &ProjectileType,
        center: Vec2,
        radius: f64,
        caster: &DerivedStats,
        targets: &mut [CombatTarget],
        events: &mut Vec<ProjectileEvent>,
    ) {
        let base =
            (caster.physical_damage as f64 * ty.damage * EXPLOSION_DAMAGE_SCALE).max(MIN_DAMAGE as f64);

        for index in 0..targets.len() {
            let skip = {
                let projectile = self.live.get(id).expect("live id");
                let target = &targets[index];
                !target.is_alive()
                    || target.id == projectile.source_id
                    || projectile.already_hit.contains(&target.id)
                    || center.distance(target.position) > radius
            };
            if skip {
                continue;
            }

            let target_id = targets[index].id.clone();
            self.live
                .get_mut(id)
                .expect("live id")
                .already_hit
                .push(target_id.clone());

            let distance = center.distance(targets[index].position);
            let falloff = 1.0 - EXPLOSION_EDGE_FALLOFF * (distance / radius);
            let damage = ((base * falloff).floor() as i32).max(MIN_DAMAGE);
            let died = apply_damage(&mut targets[index], damage);
            events.push(ProjectileEvent::ExplosionHit {
                projectile: id,
                target_id,
                damage,
                target_died: died,
            });
        }
    }
}

fn apply_damage(target: &mut CombatTarget, damage: i32) -> bool {
    target
        .stat_block
        .modify_health(-damage)
        .iter()
        .any(|e| matches!(e, crate::character::stat_block::StatEvent::Died))
}

fn out_of_bounds(position: Vec2) -> bool {
    position.x < -PLAYFIELD_MARGIN
        || position.x > PLAYFIELD_WIDTH + PLAYFIELD_MARGIN
        || position.y < -PLAYFIELD_MARGIN
        || position.y > PLAYFIELD_HEIGHT + PLAYFIELD_MARGIN
}

/// Built-in projectile kinds.
pub fn default_projectile_types() -> Vec<ProjectileType> {
    vec![
        ProjectileType {
            id: "ember-bolt".to_string(),
            speed: 600.0,
            damage: 1.0,
            collision_radius: 16.0,
            range: 480.0,
            gravity_factor: 0.0,
            piercing: false,
            explosion_radius: None,
        },
        ProjectileType {
            id: "stone-shot".to_string(),
            speed: 420.0,
            damage: 1.4,
            collision_radius: 20.0,
            range: 640.0,
            gravity_factor: 1.0,
            piercing: false,
            explosion_radius: None,
        },
        ProjectileType {
            id: "thorn-volley".to_string(),
            speed: 520.0,
            damage: 0.8,
            collision_radius: 14.0,
            range: 560.0,
            gravity_factor: 0.0,
            piercing: true,
            explosion_radius: None,
        },
        ProjectileType {
            id: "bursting-seed".to_string(),
            speed: 380.0,
            damage: 1.2,
            collision_radius: 18.0,
            range: 520.0,
            gravity_factor: 0.6,
            piercing: false,
            explosion_radius: Some(90.0),
        },
    ]
}
