//! The persistent player's state machine.
//!
//! `Player` owns the playlist, the observable `PlayerState` and the media
//! element. Every mutation goes through a transition method; the front-end
//! only reads state and forwards `Command`s and `MediaEvent`s.

use log::{debug, info, warn};

use crate::config::PlayerSettings;
use crate::gate::AccessGate;
use crate::media::{LoadId, MediaElement, MediaEvent, PlayTicket};
use crate::playlist::{Playlist, TrackDescriptor};

use super::display::duration_label;
use super::navigation::{next_playable, previous_playable};
use super::snapshot::PlayerSnapshot;
use super::types::{Command, GatePrompt, Outcome, Phase, PlayerState, QueueEntry};

pub struct Player<M: MediaElement> {
    playlist: Playlist,
    gate: AccessGate,
    media: M,
    settings: PlayerSettings,
    state: PlayerState,
    /// Level restored by unmuting.
    last_volume: f32,
    generation: u64,
    pending: Option<PlayTicket>,
    /// Stamp of the source currently loaded into the media element.
    load_id: LoadId,
    /// Duration reported by the media element for the current track.
    media_duration: Option<f64>,
    on_gate_prompt: GatePrompt,
}

impl<M: MediaElement> Player<M> {
    pub fn new(
        playlist: Playlist,
        gate: AccessGate,
        mut media: M,
        settings: PlayerSettings,
        on_gate_prompt: GatePrompt,
    ) -> Self {
        let volume = if settings.initial_volume.is_finite() {
            settings.initial_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        media.set_volume(volume);

        Self {
            playlist,
            gate,
            media,
            settings,
            state: PlayerState {
                volume,
                ..PlayerState::default()
            },
            last_volume: if volume > 0.0 { volume } else { 1.0 },
            generation: 0,
            pending: None,
            load_id: 0,
            media_duration: None,
            on_gate_prompt,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state.current_index {
            Some(_) => Phase::Ready,
            None => Phase::Idle,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.state.current_index.and_then(|i| self.playlist.get(i))
    }

    /// Media-reported duration, else the playlist's, else whatever the
    /// element knows so far.
    pub fn total_duration(&self) -> Option<f64> {
        let valid = |d: &f64| d.is_finite() && *d > 0.0;
        self.media_duration
            .or_else(|| self.current_track().and_then(|t| t.duration_seconds))
            .filter(valid)
            .or_else(|| self.media.duration().filter(valid))
    }

    pub fn dispatch(&mut self, cmd: Command) -> Outcome {
        match cmd {
            Command::TogglePlay => self.toggle_play(),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Select(index) => self.select_track(index),
            Command::SelectNumber(number) => self.select_number(number),
            Command::Seek(fraction) => self.seek(fraction),
            Command::SeekBy(delta) => self.seek_by(delta),
            Command::SetVolume(level) => self.set_volume(level),
            Command::VolumeUp => self.set_volume(self.state.volume + self.settings.volume_step),
            Command::VolumeDown => self.set_volume(self.state.volume - self.settings.volume_step),
            Command::ToggleMute => self.toggle_mute(),
            Command::Close => self.close(),
        }
    }

    pub fn handle_media(&mut self, event: MediaEvent) -> Outcome {
        match event {
            MediaEvent::TimeUpdate { load, secs } => {
                if !self.is_current_load(load) || !secs.is_finite() {
                    return Outcome::Ignored;
                }
                self.state.elapsed = secs.max(0.0);
                Outcome::Applied
            }
            MediaEvent::Ended { load } => {
                if !self.is_current_load(load) {
                    debug!("ignoring end of superseded load {load}");
                    return Outcome::Ignored;
                }
                self.state.playing = false;
                self.next()
            }
            MediaEvent::MetadataReady { load, duration } => {
                if !self.is_current_load(load) || !(duration.is_finite() && duration > 0.0) {
                    return Outcome::Ignored;
                }
                self.media_duration = Some(duration);
                Outcome::Applied
            }
            MediaEvent::PlayResolved { ticket, outcome } => self.resolve_play(ticket, outcome),
        }
    }

    pub fn select_track(&mut self, index: usize) -> Outcome {
        self.start_track(index, true)
    }

    pub fn select_number(&mut self, number: u32) -> Outcome {
        match self.playlist.index_of(number) {
            Some(index) => self.select_track(index),
            None => {
                warn!("no track numbered {number}");
                Outcome::Refused
            }
        }
    }

    pub fn toggle_play(&mut self) -> Outcome {
        if self.state.current_index.is_none() {
            return self.select_track(0);
        }
        // A pending start counts as playing so the toggle can cancel it.
        if self.state.playing || self.pending.is_some() {
            self.pause_playback();
        } else {
            self.request_play();
        }
        Outcome::Applied
    }

    pub fn next(&mut self) -> Outcome {
        let unlocked = self.gate.is_unlocked();
        match next_playable(self.playlist.tracks(), self.state.current_index, unlocked) {
            Some(index) => self.select_track(index),
            None => self.no_playable_track(),
        }
    }

    pub fn previous(&mut self) -> Outcome {
        if self.state.current_index.is_some()
            && self.media.current_time() > self.settings.restart_threshold_secs
        {
            self.media.set_current_time(0.0);
            self.state.elapsed = 0.0;
            return Outcome::Applied;
        }

        let unlocked = self.gate.is_unlocked();
        match previous_playable(self.playlist.tracks(), self.state.current_index, unlocked) {
            Some(index) => self.select_track(index),
            None => self.no_playable_track(),
        }
    }

    /// Jump to `fraction` of the track. Non-finite input is refused; finite
    /// input is clamped into `[0, 1]`.
    pub fn seek(&mut self, fraction: f64) -> Outcome {
        if !fraction.is_finite() || self.state.current_index.is_none() {
            return Outcome::Refused;
        }
        let Some(total) = self.total_duration() else {
            return Outcome::Refused;
        };
        self.seek_to(fraction.clamp(0.0, 1.0) * total)
    }

    pub fn seek_by(&mut self, delta: f64) -> Outcome {
        if !delta.is_finite() || self.state.current_index.is_none() {
            return Outcome::Refused;
        }
        let target = self.state.elapsed + delta;
        let target = match self.total_duration() {
            Some(total) => target.clamp(0.0, total),
            None => target.max(0.0),
        };
        self.seek_to(target)
    }

    pub fn set_volume(&mut self, level: f32) -> Outcome {
        if !level.is_finite() {
            return Outcome::Refused;
        }
        let level = level.clamp(0.0, 1.0);
        self.state.volume = level;
        if level > 0.0 {
            self.last_volume = level;
        }
        self.media.set_volume(level);
        Outcome::Applied
    }

    /// Toggle between silence and the last non-zero level.
    pub fn toggle_mute(&mut self) -> Outcome {
        if self.state.volume > 0.0 {
            self.last_volume = self.state.volume;
            self.state.volume = 0.0;
            self.media.set_volume(0.0);
        } else {
            self.state.volume = self.last_volume;
            self.media.set_volume(self.last_volume);
        }
        Outcome::Applied
    }

    pub fn close(&mut self) -> Outcome {
        if self.state.current_index.is_none() {
            return Outcome::Refused;
        }
        self.pause_playback();
        Outcome::Applied
    }

    /// The "Up Next" list; locked bonus tracks are hidden.
    pub fn queue(&self) -> Vec<QueueEntry> {
        let unlocked = self.gate.is_unlocked();
        self.playlist
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, t)| unlocked || !t.is_bonus)
            .map(|(index, t)| QueueEntry {
                index,
                number: t.number,
                title: t.title.clone(),
                duration_label: duration_label(t.duration_seconds),
                is_current: self.state.current_index == Some(index),
            })
            .collect()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_index: self.state.current_index,
            elapsed_seconds: self.state.elapsed,
            volume: self.state.volume,
            is_playing: self.state.playing,
        }
    }

    /// Reinstate a snapshot: volume, track, position, and playback only if
    /// the snapshot was playing.
    pub fn restore(&mut self, snapshot: &PlayerSnapshot) -> Outcome {
        self.set_volume(snapshot.volume);

        let Some(index) = snapshot.current_index else {
            return Outcome::Applied;
        };
        let outcome = self.start_track(index, snapshot.is_playing);
        if outcome == Outcome::Applied
            && snapshot.elapsed_seconds.is_finite()
            && snapshot.elapsed_seconds > 0.0
        {
            self.media.set_current_time(snapshot.elapsed_seconds);
            self.state.elapsed = snapshot.elapsed_seconds;
        }
        outcome
    }

    fn start_track(&mut self, index: usize, autoplay: bool) -> Outcome {
        let Some(track) = self.playlist.get(index) else {
            warn!(
                "refusing track index {index}: playlist has {} tracks",
                self.playlist.len()
            );
            return Outcome::Refused;
        };
        if track.is_bonus && self.gate.is_locked() {
            info!("track {} is locked bonus content", track.number);
            (self.on_gate_prompt)();
            return Outcome::Gated;
        }

        let location = track.audio_location.clone();
        debug!("selecting track {} ({location})", track.number);

        self.state.current_index = Some(index);
        self.state.elapsed = 0.0;
        self.state.playing = false;
        self.media_duration = None;
        self.pending = None;
        self.load_id += 1;
        self.media.load(&location, self.load_id);

        if autoplay {
            self.request_play();
        }
        Outcome::Applied
    }

    fn request_play(&mut self) {
        let Some(index) = self.state.current_index else {
            return;
        };
        self.generation += 1;
        let ticket = PlayTicket {
            generation: self.generation,
            index,
        };
        self.pending = Some(ticket);
        self.media.play(ticket);
    }

    fn pause_playback(&mut self) {
        // Any in-flight play request is now stale.
        self.generation += 1;
        self.pending = None;
        self.state.playing = false;
        self.media.pause();
    }

    fn resolve_play(&mut self, ticket: PlayTicket, outcome: Result<(), String>) -> Outcome {
        if self.pending != Some(ticket) || self.state.current_index != Some(ticket.index) {
            debug!("ignoring stale play result for {ticket:?}");
            return Outcome::Ignored;
        }
        self.pending = None;
        match outcome {
            Ok(()) => {
                self.state.playing = true;
                Outcome::Applied
            }
            Err(e) => {
                warn!("playback did not start: {e}");
                self.state.playing = false;
                Outcome::Refused
            }
        }
    }

    fn is_current_load(&self, load: LoadId) -> bool {
        self.state.current_index.is_some() && load == self.load_id
    }

    fn seek_to(&mut self, secs: f64) -> Outcome {
        self.media.set_current_time(secs);
        self.state.elapsed = secs;
        Outcome::Applied
    }

    fn no_playable_track(&mut self) -> Outcome {
        warn!("no playable track while the album is locked");
        (self.on_gate_prompt)();
        Outcome::Gated
    }
}
