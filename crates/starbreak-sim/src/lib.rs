//! Boss encounter engine for STARBREAK.
//!
//! Owns the boss state machine, its minion shield and attack timers, and
//! the hecs world they play out in. Produces an `EncounterSnapshot` per tick.

pub mod boss;
pub mod engine;
pub mod error;
pub mod minions;
pub mod progression;
pub mod systems;
pub mod world;

pub use boss::{Boss, BossSettings, DamageOutcome};
pub use engine::{EncounterEngine, SimConfig};
pub use error::EncounterError;
pub use progression::{EncounterListener, Progression, SharedProgression};
pub use starbreak_core as core;
pub use world::{HecsWorld, SpatialWorld};
