//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). Encounter rules live in the boss, not here.

pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod snapshot;
