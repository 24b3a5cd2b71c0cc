//! Character stats: base attributes, derived combat stats, modifiers, and
//! equipment-aware composition.

#![allow(unused_imports)]

pub mod calculator;
pub mod stat_block;
pub mod stats;

pub use calculator::*;
pub use stat_block::*;
pub use stats::*;
