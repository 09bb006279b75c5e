//! Persistent player module.
//!
//! `Player` is the track-sequencing state machine; the submodules hold its
//! commands and state types, bonus-aware stepping, the session snapshot and
//! small display helpers used by the front-end.

mod display;
mod machine;
mod navigation;
mod snapshot;
mod types;

pub use display::{VolumeIcon, duration_label, format_time};
pub use machine::Player;
pub use snapshot::{PlayerSnapshot, save_snapshot, take_snapshot};
pub use types::*;
