//! Game loop thread: runs the encounter engine at TICK_RATE and hands every
//! snapshot to a sink.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc`. The latest snapshot is also stored in shared
//! state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use starbreak_core::config::EncounterConfig;
use starbreak_core::constants::TICK_RATE;
use starbreak_core::enums::EncounterStatus;
use starbreak_core::state::EncounterSnapshot;
use starbreak_sim::engine::{EncounterEngine, SimConfig};

use crate::autopilot::Autopilot;
use crate::state::{AppState, GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop runs.
pub struct LoopConfig {
    pub seed: u64,
    pub encounter: EncounterConfig,
    /// Sleep between ticks to match wall-clock time. Off runs flat out.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    pub autopilot: bool,
    /// Exit once the encounter completes or aborts.
    pub stop_when_finished: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: SimConfig::default().seed,
            encounter: EncounterConfig::default(),
            realtime: true,
            max_ticks: None,
            autopilot: false,
            stop_when_finished: false,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    Disconnected,
    TickLimit,
    Finished,
}

/// Spawns the game loop in a new thread.
///
/// Returns the shared state for sending commands and polling snapshots,
/// and the thread handle yielding why the loop exited.
pub fn spawn_game_loop<S>(
    config: LoopConfig,
    sink: S,
) -> io::Result<(AppState, JoinHandle<LoopExit>)>
where
    S: FnMut(&EncounterSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let handle = std::thread::Builder::new()
        .name("starbreak-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &shared, sink))?;

    Ok((
        AppState {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        handle,
    ))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit or,
/// when asked, the end of the encounter.
fn run_game_loop<S>(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<EncounterSnapshot>>,
    mut sink: S,
) -> LoopExit
where
    S: FnMut(&EncounterSnapshot),
{
    let mut engine = EncounterEngine::new(
        SimConfig {
            seed: config.seed,
            ..Default::default()
        },
        config.encounter,
    );
    let mut autopilot = config.autopilot.then(Autopilot::default);
    let mut ticks: u64 = 0;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Encounter(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return LoopExit::Shutdown,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return LoopExit::Disconnected,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Autopilot reacts to what it sees, applied next tick
        if let Some(pilot) = autopilot.as_mut() {
            engine.queue_commands(pilot.plan(&snapshot));
        }

        // 4. Hand the snapshot to the sink
        sink(&snapshot);

        let finished = matches!(
            snapshot.status,
            EncounterStatus::Complete | EncounterStatus::Aborted
        );

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if config.stop_when_finished && finished {
            return LoopExit::Finished;
        }
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            return LoopExit::TickLimit;
        }
        if !config.realtime {
            continue;
        }

        // 6. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
