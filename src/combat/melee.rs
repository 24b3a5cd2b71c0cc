//! Melee action state machine: strike, block, dodge.
//!
//! Actions never run on timers; the controller stores a start timestamp and
//! `update(dt_ms)` compares elapsed time against the action's duration each
//! tick. Nothing interrupts an action mid-duration except its own expiry.

use std::collections::VecDeque;

use rand::Rng;

use crate::character::stats::DerivedStats;
use crate::combat::resolver;
use crate::combat::types::{CombatTarget, Stance, Vec2};
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Strike,
    Block,
    Dodge,
}

impl ActionKind {
    fn duration_ms(&self) -> f64 {
        match self {
            ActionKind::Strike => ATTACK_DURATION_MS,
            ActionKind::Block => BLOCK_DURATION_MS,
            ActionKind::Dodge => DODGE_DURATION_MS,
        }
    }
}

/// The one action a controller may be running.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CombatAction {
    kind: ActionKind,
    started_at: f64,
    duration_ms: f64,
}

/// An action waiting for the controller to go Idle. Strikes carry the
/// point the attack was aimed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedAction {
    pub kind: ActionKind,
    pub aim: Vec2,
}

/// What a resolved strike did to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub target_id: String,
    pub hit: bool,
    pub critical: bool,
    pub blocked: bool,
    pub dodged: bool,
    pub damage: i32,
    pub target_died: bool,
}

/// Result of a strike attempt. Only `Resolved` started an action.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    Resolved(AttackReport),
    /// Another action is still running.
    Busy,
    /// The 1000ms attack cooldown has not elapsed.
    OnCooldown,
    /// No live target within melee range of the actor.
    NoTargetInRange,
}

/// Events surfaced by `update` for the driver to render.
#[derive(Debug, Clone, PartialEq)]
pub enum MeleeEvent {
    ActionEnded { kind: ActionKind },
    ActionStarted { kind: ActionKind },
    /// A queued strike was dequeued and resolved.
    QueuedAttack(AttackOutcome),
}

#[derive(Debug, Clone)]
pub struct MeleeCombatController {
    position: Vec2,
    current: Option<CombatAction>,
    queue: VecDeque<QueuedAction>,
    clock_ms: f64,
    last_attack_at: Option<f64>,
    last_dodge_at: Option<f64>,
}

impl MeleeCombatController {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            current: None,
            queue: VecDeque::new(),
            clock_ms: 0.0,
            last_attack_at: None,
            last_dodge_at: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_action(&self) -> Option<ActionKind> {
        self.current.map(|a| a.kind)
    }

    /// Defensive posture to mirror onto this actor's CombatTarget.
    pub fn stance(&self) -> Stance {
        match self.current_action() {
            Some(ActionKind::Block) => Stance::Blocking,
            Some(ActionKind::Dodge) => Stance::Dodging,
            _ => Stance::Neutral,
        }
    }

    fn attack_on_cooldown(&self) -> bool {
        matches!(self.last_attack_at, Some(at) if self.clock_ms - at < ATTACK_COOLDOWN_MS)
    }

    fn dodge_on_cooldown(&self) -> bool {
        matches!(self.last_dodge_at, Some(at) if self.clock_ms - at < DODGE_COOLDOWN_MS)
    }

    // ── Entry points ────────────────────────────────────────────

    /// Attempts a strike aimed at `(x, y)`. Requires Idle, an elapsed
    /// attack cooldown, and a live target within melee range of the
    /// actor; among in-range targets the one nearest the aim point is hit.
    pub fn perform_attack(
        &mut self,
        x: f64,
        y: f64,
        attacker: &DerivedStats,
        weapon_bonus: i32,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
    ) -> AttackOutcome {
        if self.current.is_some() {
            return AttackOutcome::Busy;
        }
        if self.attack_on_cooldown() {
            return AttackOutcome::OnCooldown;
        }

        let aim = Vec2::new(x, y);
        let Some(index) = self.pick_target(aim, targets) else {
            return AttackOutcome::NoTargetInRange;
        };

        let report = resolve_strike(attacker, weapon_bonus, &mut targets[index], rng);

        self.current = Some(CombatAction {
            kind: ActionKind::Strike,
            started_at: self.clock_ms,
            duration_ms: ActionKind::Strike.duration_ms(),
        });
        self.last_attack_at = Some(self.clock_ms);
        AttackOutcome::Resolved(report)
    }

    /// Raises a block. Rejected while any action is running; a running
    /// action only ends by its own expiry.
    pub fn start_block(&mut self) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.current = Some(CombatAction {
            kind: ActionKind::Block,
            started_at: self.clock_ms,
            duration_ms: ActionKind::Block.duration_ms(),
        });
        true
    }

    /// Starts a dodge. Rejected while any action is running or the dodge
    /// cooldown has not elapsed.
    pub fn perform_dodge(&mut self) -> bool {
        if self.current.is_some() || self.dodge_on_cooldown() {
            return false;
        }
        self.current = Some(CombatAction {
            kind: ActionKind::Dodge,
            started_at: self.clock_ms,
            duration_ms: ActionKind::Dodge.duration_ms(),
        });
        self.last_dodge_at = Some(self.clock_ms);
        true
    }

    pub fn queue_action(&mut self, action: QueuedAction) {
        self.queue.push_back(action);
    }

    /// Drops every queued-but-not-started action. The running action, if
    /// any, is unaffected.
    pub fn clear_action_queue(&mut self) {
        self.queue.clear();
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    // ── Frame update ────────────────────────────────────────────

    /// Advances the clock, expires the current action when its duration has
    /// elapsed, and dequeues at most one queued action if Idle.
    pub fn update(
        &mut self,
        dt_ms: f64,
        attacker: &DerivedStats,
        weapon_bonus: i32,
        targets: &mut [CombatTarget],
        rng: &mut impl Rng,
    ) -> Vec<MeleeEvent> {
        self.clock_ms += dt_ms;
        let mut events = Vec::new();

        if let Some(action) = self.current {
            if self.clock_ms - action.started_at >= action.duration_ms {
                self.current = None;
                events.push(MeleeEvent::ActionEnded { kind: action.kind });
            }
        }

        if self.current.is_none() {
            if let Some(queued) = self.queue.pop_front() {
                match queued.kind {
                    ActionKind::Strike => {
                        let outcome = self.perform_attack(
                            queued.aim.x,
                            queued.aim.y,
                            attacker,
                            weapon_bonus,
                            targets,
                            rng,
                        );
                        events.push(MeleeEvent::QueuedAttack(outcome));
                    }
                    ActionKind::Block => {
                        if self.start_block() {
                            events.push(MeleeEvent::ActionStarted {
                                kind: ActionKind::Block,
                            });
                        }
                    }
                    ActionKind::Dodge => {
                        if self.perform_dodge() {
                            events.push(MeleeEvent::ActionStarted {
                                kind: ActionKind::Dodge,
                            });
                        }
                    }
                }
            }
        }

        events
    }

    /// Nearest-to-aim live target within melee range of the actor.
    fn pick_target(&self, aim: Vec2, targets: &[CombatTarget]) -> Option<usize> {
        targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_alive() && self.position.distance(t.position) <= MELEE_RANGE)
            .min_by(|(_, a), (_, b)| {
                aim.distance(a.position)
                    .partial_cmp(&aim.distance(b.position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index)
    }
}

/// Resolves one strike against a target. Defender stance is checked before
/// any damage math: Dodging converts the swing to a miss, Blocking lands
/// the swing for zero damage.
fn resolve_strike(
    attacker: &DerivedStats,
    weapon_bonus: i32,
    target: &mut CombatTarget,
    rng: &mut impl Rng,
) -> AttackReport {
    let roll = resolver::hit_check(attacker, target.stat_block.derived(), rng);

    match target.stance {
        Stance::Dodging => {
            return AttackReport {
                target_id: target.id.clone(),
                hit: false,
                critical: false,
                blocked: false,
                dodged: true,
                damage: 0,
                target_died: false,
            };
        }
        Stance::Blocking => {
            return AttackReport {
                target_id: target.id.clone(),
                hit: roll.hit,
                critical: roll.critical,
                blocked: true,
                dodged: false,
                damage: 0,
                target_died: false,
            };
        }
        Stance::Neutral => {}
    }

    if !roll.hit {
        return AttackReport {
            target_id: target.id.clone(),
            hit: false,
            critical: false,
            blocked: false,
            dodged: false,
            damage: 0,
            target_died: false,
        };
    }

    let damage = resolver::physical_damage(
        attacker,
        target.stat_block.derived(),
        weapon_bonus,
        roll.critical,
        rng,
    );
    let died = target
        .stat_block
        .modify_health(-damage)
        .iter()
        .any(|e| matches!(e, crate::character::stat_block::StatEvent::Died));

    AttackReport {
        target_id: target.id.clone(),
        hit: true,
        critical: roll.critical,
        blocked: false,
        dodged: false,
        damage,
        target_died: died,
    }
}
