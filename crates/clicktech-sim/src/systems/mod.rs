//! Systems shared by several scenes.
//!
//! Systems are plain functions over the scene `World`. They do not own
//! state; everything they touch lives in components.

pub mod clouds;
pub mod movement;
pub mod particles;
pub mod snapshot;
