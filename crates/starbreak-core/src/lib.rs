//! Core types and definitions for the STARBREAK boss encounter.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, the phase table and its
//! configuration, and constants. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod phase;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
