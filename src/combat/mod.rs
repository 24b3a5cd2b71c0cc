//! Combat resolution: pure hit/damage math, the melee action state machine,
//! and the two spatial damage-delivery engines (projectiles and AOE).

#![allow(unused_imports)]

pub mod area_effect;
pub mod melee;
pub mod projectile;
pub mod resolver;
pub mod types;

pub use area_effect::*;
pub use melee::*;
pub use projectile::*;
pub use resolver::*;
pub use types::*;
