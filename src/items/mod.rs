//! Item system: equipment definitions, the starter catalog, and inventory
//! management.

#![allow(unused_imports)]

pub mod catalog;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use inventory::*;
pub use types::*;
