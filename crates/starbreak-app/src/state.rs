//! State shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use starbreak_core::commands::EncounterCommand;
use starbreak_core::state::EncounterSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forward to the encounter engine.
    Encounter(EncounterCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<EncounterSnapshot>>>;

/// Handles the runner keeps after starting the loop.
pub struct AppState {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
}

impl AppState {
    /// Forward an engine command. Returns false once the loop has exited.
    pub fn send(&self, command: EncounterCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::Encounter(command))
            .is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }

    pub fn latest(&self) -> Option<EncounterSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
