//! encore: a terminal player for a gated album release.
//!
//! Bonus tracks and full-length previews stay locked until the listener
//! subscribes; the unlock flag persists across runs.

pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod media;
pub mod player;
pub mod playlist;
pub mod preview;
pub mod runtime;
pub mod storage;
pub mod subscribe;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{EncoreError, Result};
