//! State shared between the input bridge and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use clicktech_core::commands::InputEvent;
use clicktech_core::state::SceneSnapshot;

/// Commands sent from the input bridge to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// Input to forward to the active scene.
    Input(InputEvent),
    /// Stop the game loop.
    Shutdown,
}

/// Handles to a running game loop.
pub struct AppState {
    /// `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, written by the loop after every frame.
    pub latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    /// Set by `start_game_loop`, cleared by the loop thread on exit.
    pub running: Arc<Mutex<bool>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Arc::new(Mutex::new(false)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender for the running loop, if any.
    pub fn sender(&self) -> Option<mpsc::Sender<GameLoopCommand>> {
        self.command_tx.lock().ok().and_then(|tx| tx.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().map(|flag| *flag).unwrap_or(false)
    }

    pub fn latest(&self) -> Option<SceneSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
