use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clicktech_app::config::AppConfig;
use clicktech_app::error::AppError;
use clicktech_app::ipc::{self, JsonLinesSink};
use clicktech_app::state::AppState;

fn main() {
    init_tracing();
    if let Err(error) = run() {
        error!(%error, "clicktech exited with an error");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    info!("=== Click Tech Startup ===");
    let config = AppConfig::from_env()?;

    let state = AppState::new();
    let sink = Box::new(JsonLinesSink::new(std::io::stdout()));
    let game_loop = ipc::start_game_loop(&state, &config, sink)?;

    if let Some(tx) = state.sender() {
        // Detached: a quit from the menu must not wait for stdin to close.
        ipc::spawn_stdin_bridge(tx)?;
    }

    game_loop.join().map_err(|_| AppError::LoopPanicked)?;
    info!("=== Click Tech Shutdown ===");
    Ok(())
}

/// Logs go to stderr; stdout carries snapshots.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
