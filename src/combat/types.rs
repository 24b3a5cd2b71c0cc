use serde::{Deserialize, Serialize};

use crate::character::stat_block::StatBlock;

/// 2D position/direction in playfield pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        Vec2::new(other.x - self.x, other.y - self.y).length()
    }

    /// Unit vector in the same direction; `None` for the zero vector.
    pub fn normalized(&self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        Some(Vec2::new(self.x / len, self.y / len))
    }

    pub fn scaled(&self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    pub fn offset(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// Defensive posture a target is in while damage against it resolves.
/// Mirrored from the owning actor's melee controller each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Neutral,
    Blocking,
    Dodging,
}

/// A live combat participant. Owns its StatBlock; the engines read and
/// write health through it but never hold onto it.
#[derive(Debug, Clone)]
pub struct CombatTarget {
    pub id: String,
    pub position: Vec2,
    pub stat_block: StatBlock,
    pub stance: Stance,
}

impl CombatTarget {
    pub fn new(id: &str, position: Vec2, stat_block: StatBlock) -> Self {
        Self {
            id: id.to_string(),
            position,
            stat_block,
            stance: Stance::Neutral,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stat_block.is_alive()
    }
}
