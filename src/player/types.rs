//! Player model types: commands, outcomes and the observable state.

/// Invoked with no arguments when gated content is attempted while locked.
pub type GatePrompt = Box<dyn FnMut()>;

/// User intents forwarded by the front-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    Next,
    Previous,
    /// Play the track at this playlist index.
    Select(usize),
    /// Play the track with this album number.
    SelectNumber(u32),
    /// Seek to a fraction of the total duration.
    Seek(f64),
    /// Seek relative to the current position (seconds).
    SeekBy(f64),
    SetVolume(f32),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    /// Pause and keep the loaded track.
    Close,
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or a request was issued).
    Applied,
    /// Blocked by the access gate; the gate prompt fired.
    Gated,
    /// Invalid input or nothing to act on; state untouched.
    Refused,
    /// Stale or irrelevant notification; state untouched.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No track selected yet.
    Idle,
    /// A track is loaded, paused or playing.
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_index: Option<usize>,
    pub playing: bool,
    pub volume: f32,
    pub elapsed: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_index: None,
            playing: false,
            volume: 1.0,
            elapsed: 0.0,
        }
    }
}

/// One row of the "Up Next" list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub index: usize,
    pub number: u32,
    pub title: String,
    pub duration_label: String,
    pub is_current: bool,
}
