//! Core plumbing: tuning constants, error taxonomy, and the slot arena.

#![allow(unused_imports)]

pub mod arena;
pub mod constants;
pub mod error;

pub use arena::*;
pub use constants::*;
pub use error::*;
