//! Game loop thread: runs the arcade engine at a fixed frame rate and
//! emits snapshots.
//!
//! The engine is created inside this thread and never leaves it. Input
//! arrives via `mpsc` channel. Snapshots go to a `SnapshotSink` and are
//! stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use clicktech_core::state::SceneSnapshot;
use clicktech_sim::{ArcadeEngine, EngineConfig};

use crate::error::{AppError, BridgeError};
use crate::state::GameLoopCommand;

/// Destination of the per-frame snapshots.
pub trait SnapshotSink: Send {
    fn emit(&mut self, snapshot: &SceneSnapshot) -> Result<(), BridgeError>;
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input bridge and the thread handle.
/// `running` is cleared when the loop exits.
pub fn spawn_game_loop(
    engine_config: EngineConfig,
    frame_ms: u64,
    sink: Box<dyn SnapshotSink>,
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    running: Arc<Mutex<bool>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("clicktech-game-loop".into())
        .spawn(move || {
            let engine = ArcadeEngine::new(engine_config);
            run_game_loop(engine, frame_ms, cmd_rx, sink, &latest_snapshot);
            if let Ok(mut flag) = running.lock() {
                *flag = false;
            }
        })
        .map_err(|source| AppError::Spawn {
            name: "game loop",
            source,
        })?;

    Ok((cmd_tx, handle))
}

/// Runs until Shutdown, channel disconnect, a quit from the menu, or a
/// sink failure.
fn run_game_loop(
    mut engine: ArcadeEngine,
    frame_ms: u64,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    mut sink: Box<dyn SnapshotSink>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
) {
    let frame = Duration::from_millis(frame_ms);
    let mut next_frame_time = Instant::now();
    info!(frame_ms, "game_loop_started");

    loop {
        // 1. Drain pending input
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(input)) => engine.queue_input(input),
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game_loop_shutdown");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    return;
                }
            }
        }

        // 2. Apply input, advance one frame of virtual time
        let snapshot = engine.frame(frame_ms);

        // 3. Emit
        if let Err(error) = sink.emit(&snapshot) {
            warn!(%error, "snapshot sink failed, stopping");
            return;
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if engine.is_quit_requested() {
            info!("game_loop_quit");
            return;
        }

        // 5. Sleep until the next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind; reset instead of replaying missed frames
            next_frame_time = now;
        }
    }
}
