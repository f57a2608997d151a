//! Pursuit AI for friendly defense units.
//!
//! Implements nearest-overhead-threat targeting, dead-zone tracking,
//! persisted idle drift, and play-field clamping.

pub mod controller;
pub mod profiles;

pub use clicktech_core as core;

#[cfg(test)]
mod tests;
