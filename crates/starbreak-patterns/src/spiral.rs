//! Spiral burst: one projectile at a time, each rotated from the last.
//!
//! A `SpiralBurst` is a resumable state object. The owner polls it once per
//! tick and it hands back at most one shot when the next one is due, so a
//! long spiral never blocks the tick. Cancelling stops it for good.

use glam::Vec2;

use starbreak_core::enums::ProjectileTag;
use starbreak_core::types::direction_from_degrees;

use crate::emission::Emission;

/// Parameters copied from the phase entry when a spiral starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub count: i32,
    /// Degrees added per shot.
    pub angle_step: f32,
    /// Seconds between shots.
    pub shot_delay: f64,
    pub speed: f32,
}

/// A shot handed out by [`SpiralBurst::poll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralShot {
    /// Scheduled time of this shot (start + step * delay).
    pub due_at: f64,
    pub emission: Emission,
}

/// One in-flight spiral sequence.
#[derive(Debug, Clone)]
pub struct SpiralBurst {
    params: SpiralParams,
    origin: Vec2,
    started_at: f64,
    emitted: usize,
    total: usize,
    cancelled: bool,
}

impl SpiralBurst {
    /// Start a spiral at `started_at`. The first shot is due immediately.
    /// A non-positive count produces a burst that is already finished.
    pub fn new(params: SpiralParams, origin: Vec2, started_at: f64) -> Self {
        Self {
            params,
            origin,
            started_at,
            emitted: 0,
            total: params.count.max(0) as usize,
            cancelled: false,
        }
    }

    /// Emit the next shot if it is due at `now`.
    pub fn poll(&mut self, now: f64) -> Option<SpiralShot> {
        if self.is_finished() {
            return None;
        }

        let due_at = self.started_at + self.emitted as f64 * self.params.shot_delay.max(0.0);
        if now < due_at {
            return None;
        }

        let angle = self.emitted as f32 * self.params.angle_step;
        self.emitted += 1;
        Some(SpiralShot {
            due_at,
            emission: Emission {
                origin: self.origin,
                direction: direction_from_degrees(angle),
                speed: self.params.speed,
                tag: ProjectileTag::Spiral,
            },
        })
    }

    /// Abandon the sequence. Returns how many shots were never fired.
    pub fn cancel(&mut self) -> usize {
        let remaining = self.remaining();
        self.cancelled = true;
        remaining
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.emitted >= self.total
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Shots not yet fired (zero once cancelled).
    pub fn remaining(&self) -> usize {
        if self.cancelled {
            0
        } else {
            self.total - self.emitted
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
