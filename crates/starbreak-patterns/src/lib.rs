//! Attack pattern generators for STARBREAK.
//!
//! Pure functions and small resumable state objects that compute projectile
//! emissions (origin, direction, speed, tag) from phase parameters.
//! No ECS dependency: callers hand the emissions to the spatial world.

pub mod emission;
pub mod homing;
pub mod radial;
pub mod ring;
pub mod spiral;
pub mod spread;

pub use emission::Emission;
pub use starbreak_core as core;

#[cfg(test)]
mod tests;
