//! Front-end view model shared by both screens.
//!
//! `App` holds what only the terminal UI cares about: the list cursor, the
//! subscription overlay and a transient status line. Playback state itself
//! lives in the player.

mod model;

pub use model::*;
