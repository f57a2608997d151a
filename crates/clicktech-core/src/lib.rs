//! Core types and definitions for the Click Tech arcade.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, the collision test, components, input commands, events,
//! render snapshots, and tuning constants.
//! It has no dependency on any runtime, ECS, or windowing framework.

pub mod collision;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
