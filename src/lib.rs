//! Wildfang - Action RPG Combat & Progression Core
//!
//! This crate resolves combat interactions and character power progression:
//! base/derived stats with timed modifiers, slot-based equipment and
//! inventory, melee actions with cooldowns, ballistic projectiles, and
//! area-of-effect bursts. The host loop drives it by calling `update(dt_ms)`
//! on each engine once per frame and forwarding the returned events to the
//! rendering/UI layer.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;

pub use character::stat_block::StatBlock;
pub use combat::area_effect::AreaEffectEngine;
pub use combat::melee::MeleeCombatController;
pub use combat::projectile::ProjectileEngine;
pub use items::inventory::InventoryManager;
