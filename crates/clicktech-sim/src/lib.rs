//! Scene engine for the Click Tech arcade.
//!
//! Owns the timer scheduler and the active scene, runs every scene's
//! simulation on a virtual clock, persists high scores, and produces
//! `SceneSnapshot`s for whatever surface draws them.

pub mod engine;
pub mod error;
pub mod highscores;
pub mod keyframe;
pub mod scenes;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use clicktech_core as core;
pub use engine::{ArcadeEngine, EngineConfig};

#[cfg(test)]
mod tests;
