//! STARBREAK headless runner.
//!
//! Wires the encounter engine to a game-loop thread, an autopilot pilot
//! and log output. No rendering; snapshots go to a caller-supplied sink.

pub mod autopilot;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use starbreak_core as core;
