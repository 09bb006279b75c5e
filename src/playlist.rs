//! Playlist source: the ordered album track list.
//!
//! The list comes from the playlist endpoint when it answers, and from the
//! built-in album list otherwise. It is loaded once and never mutated.

mod fallback;
mod model;
mod source;
mod wire;

pub use fallback::built_in_tracks;
pub use model::{Playlist, TrackDescriptor};
pub use source::{HttpPlaylistFetcher, PlaylistFetcher, PlaylistSource, built_in_playlist};
pub use wire::{TrackRecord, WireDuration, parse_clock};
