//! Track-detail preview playback.
//!
//! While the album is locked the detail view may only play the first
//! `threshold` seconds of a track. [`enforce`] and [`clamp_seek`] are the
//! policy as pure functions; [`PreviewPlayer`] applies them to its own
//! single-track media element, separate from the persistent player.

mod player;
mod policy;

pub use player::{DetailCommand, PreviewPlayer};
pub use policy::{ForcedAction, PreviewDecision, clamp_seek, enforce};

#[cfg(test)]
mod tests;
