//! Media-related small types and handles.
//!
//! This module defines the play-request ticket, the notifications a media
//! element reports back, and the shared clock handle.

use std::sync::{Arc, Mutex};

/// Identifies one play request.
///
/// `generation` increases on every request so a late answer to an older
/// request can be told apart from the current one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayTicket {
    pub generation: u64,
    pub index: usize,
}

/// Identifies one `load`; progress reports carry it so a report about the
/// previous media can be told apart from one about the current media.
pub type LoadId = u64;

/// Notifications from the media element, delivered on the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Current playback position (seconds).
    TimeUpdate { load: LoadId, secs: f64 },
    /// The loaded media played to its end.
    Ended { load: LoadId },
    /// The media element learned the real duration (seconds).
    MetadataReady { load: LoadId, duration: f64 },
    /// Outcome of the play request identified by `ticket`.
    PlayResolved {
        ticket: PlayTicket,
        outcome: Result<(), String>,
    },
}

/// Commands understood by the audio thread.
#[derive(Debug)]
pub enum MediaCmd {
    Load { location: String, load: LoadId },
    Play(PlayTicket),
    Pause,
    Seek(f64),
    SetVolume(f32),
    Quit,
}

/// Position and duration published by the audio thread.
#[derive(Debug, Clone, Default)]
pub struct MediaClock {
    pub current_time: f64,
    pub duration: Option<f64>,
}

pub type ClockHandle = Arc<Mutex<MediaClock>>;
