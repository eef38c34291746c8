//! Meta-progression and the listener seam the boss reports through.
//!
//! The boss is handed its listener at construction and never looks one up.

use std::sync::{Arc, Mutex};

use starbreak_core::state::ProgressionView;

/// Facts about a finished fight, passed to the listener exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct DefeatReport {
    pub defeated_at: f64,
    pub max_hp: i32,
    /// Phase index the boss was in when it died.
    pub final_phase: usize,
    pub minions_destroyed: u32,
}

/// Receives encounter milestones.
pub trait EncounterListener: Send {
    fn on_boss_defeated(&mut self, report: &DefeatReport);

    fn on_phase_changed(&mut self, _from: usize, _to: usize) {}
}

impl<T: EncounterListener> EncounterListener for Arc<Mutex<T>> {
    fn on_boss_defeated(&mut self, report: &DefeatReport) {
        match self.lock() {
            Ok(mut inner) => inner.on_boss_defeated(report),
            Err(_) => tracing::error!("listener lock poisoned, defeat not recorded"),
        }
    }

    fn on_phase_changed(&mut self, from: usize, to: usize) {
        if let Ok(mut inner) = self.lock() {
            inner.on_phase_changed(from, to);
        }
    }
}

/// Listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl EncounterListener for NullListener {
    fn on_boss_defeated(&mut self, _report: &DefeatReport) {}
}

/// Score, fragments and the asteroid spawner switch.
#[derive(Debug, Clone)]
pub struct Progression {
    score: u32,
    fragments: u32,
    bosses_defeated: u32,
    boss_spawn_score: u32,
    fragment_reward: u32,
    boss_spawned: bool,
    asteroid_spawning_enabled: bool,
}

pub type SharedProgression = Arc<Mutex<Progression>>;

impl Progression {
    pub fn new(boss_spawn_score: u32, fragment_reward: u32) -> Self {
        Self {
            score: 0,
            fragments: 0,
            bosses_defeated: 0,
            boss_spawn_score,
            fragment_reward,
            boss_spawned: false,
            asteroid_spawning_enabled: true,
        }
    }

    pub fn shared(boss_spawn_score: u32, fragment_reward: u32) -> SharedProgression {
        Arc::new(Mutex::new(Self::new(boss_spawn_score, fragment_reward)))
    }

    /// Add score. Returns true the first time this crosses the boss
    /// threshold; asteroid spawning pauses until the boss is defeated. The
    /// boss only ever spawns once per run.
    pub fn add_score(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.boss_spawned || self.score < self.boss_spawn_score {
            return false;
        }
        self.boss_spawned = true;
        self.asteroid_spawning_enabled = false;
        tracing::info!(score = self.score, "boss spawn threshold reached");
        true
    }

    /// Spend fragments if enough are banked.
    pub fn spend_fragments(&mut self, amount: u32) -> bool {
        if amount > self.fragments {
            return false;
        }
        self.fragments -= amount;
        true
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fragments(&self) -> u32 {
        self.fragments
    }

    pub fn bosses_defeated(&self) -> u32 {
        self.bosses_defeated
    }

    pub fn asteroid_spawning_enabled(&self) -> bool {
        self.asteroid_spawning_enabled
    }

    pub fn view(&self) -> ProgressionView {
        ProgressionView {
            score: self.score,
            fragments: self.fragments,
            bosses_defeated: self.bosses_defeated,
            asteroid_spawning_enabled: self.asteroid_spawning_enabled,
        }
    }
}

impl EncounterListener for Progression {
    fn on_boss_defeated(&mut self, report: &DefeatReport) {
        self.fragments += self.fragment_reward;
        self.bosses_defeated += 1;
        self.asteroid_spawning_enabled = true;
        tracing::info!(
            fragments = self.fragments,
            final_phase = report.final_phase,
            "boss defeat recorded"
        );
    }
}
