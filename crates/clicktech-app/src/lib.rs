//! Click Tech host application.
//!
//! Runs the arcade engine on its own thread at a fixed frame rate, reads
//! input events as JSON lines on stdin and writes one snapshot per frame
//! as a JSON line on stdout. Logs go to stderr.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod ipc;
pub mod state;

pub use clicktech_core as core;
