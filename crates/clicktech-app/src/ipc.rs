//! Line-oriented JSON bridge.
//!
//! Input: one `InputEvent` per stdin line. Output: one `SceneSnapshot`
//! per stdout line.

use std::io::{BufRead, Write};
use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::{info, warn};

use clicktech_core::commands::InputEvent;
use clicktech_core::state::SceneSnapshot;

use crate::config::AppConfig;
use crate::error::{AppError, BridgeError};
use crate::game_loop::{self, SnapshotSink};
use crate::state::{AppState, GameLoopCommand};

/// Start the game loop. Fails if one is already running.
pub fn start_game_loop(
    state: &AppState,
    config: &AppConfig,
    sink: Box<dyn SnapshotSink>,
) -> Result<JoinHandle<()>, AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::LoopPanicked)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(
        config.engine_config(),
        config.frame_ms,
        sink,
        state.latest_snapshot.clone(),
        state.running.clone(),
    )?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::LoopPanicked)?;
    *tx_lock = Some(cmd_tx);
    *running = true;
    info!(seed = config.seed, path = %config.high_score_path.display(), "arcade_started");
    Ok(handle)
}

/// Forward one input event to the running loop.
pub fn send_input(state: &AppState, input: InputEvent) -> Result<(), BridgeError> {
    let tx = state.sender().ok_or(BridgeError::LoopClosed)?;
    tx.send(GameLoopCommand::Input(input))
        .map_err(|_| BridgeError::LoopClosed)
}

/// Latest snapshot, for polling.
pub fn get_snapshot(state: &AppState) -> Option<SceneSnapshot> {
    state.latest()
}

/// Parse one input line. Blank lines carry no event.
pub fn parse_input_line(line: &str) -> Result<Option<InputEvent>, BridgeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Forward every event read from `reader` until EOF, then ask the loop to
/// shut down. Malformed lines are logged and skipped. Returns how many
/// events were forwarded.
pub fn forward_input(
    reader: impl BufRead,
    tx: &mpsc::Sender<GameLoopCommand>,
) -> Result<usize, BridgeError> {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = line?;
        match parse_input_line(&line) {
            Ok(Some(input)) => {
                tx.send(GameLoopCommand::Input(input))
                    .map_err(|_| BridgeError::LoopClosed)?;
                forwarded += 1;
            }
            Ok(None) => {}
            Err(error) => warn!(%error, line = line.trim(), "input line skipped"),
        }
    }
    let _ = tx.send(GameLoopCommand::Shutdown);
    Ok(forwarded)
}

/// Read stdin on its own thread.
pub fn spawn_stdin_bridge(tx: mpsc::Sender<GameLoopCommand>) -> Result<JoinHandle<()>, AppError> {
    std::thread::Builder::new()
        .name("clicktech-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            match forward_input(stdin.lock(), &tx) {
                Ok(count) => info!(count, "input closed"),
                Err(BridgeError::LoopClosed) => {}
                Err(error) => warn!(%error, "input bridge failed"),
            }
        })
        .map_err(|source| AppError::Spawn {
            name: "input",
            source,
        })
}

/// Writes each snapshot as one JSON line.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SnapshotSink for JsonLinesSink<W> {
    fn emit(&mut self, snapshot: &SceneSnapshot) -> Result<(), BridgeError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
