use log::{debug, info, warn};

use crate::config::PreviewSettings;
use crate::gate::AccessGate;
use crate::media::{LoadId, MediaElement, MediaEvent, PlayTicket};
use crate::player::{GatePrompt, Outcome};
use crate::playlist::TrackDescriptor;

use super::policy::{ForcedAction, clamp_seek, enforce};

/// Intents on the track-detail view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailCommand {
    TogglePlay,
    /// Seek to a fraction of the track.
    Seek(f64),
    ScrubForward,
    ScrubBack,
}

/// Single-track player for the detail view.
pub struct PreviewPlayer<M: MediaElement> {
    track: TrackDescriptor,
    gate: AccessGate,
    media: M,
    settings: PreviewSettings,
    playing: bool,
    elapsed: f64,
    media_duration: Option<f64>,
    generation: u64,
    pending: Option<PlayTicket>,
    load_id: LoadId,
    on_gate_prompt: GatePrompt,
}

impl<M: MediaElement> PreviewPlayer<M> {
    pub fn new(
        track: TrackDescriptor,
        gate: AccessGate,
        mut media: M,
        settings: PreviewSettings,
        on_gate_prompt: GatePrompt,
    ) -> Self {
        let load_id = 1;
        media.load(&track.audio_location, load_id);
        Self {
            track,
            gate,
            media,
            settings,
            playing: false,
            elapsed: 0.0,
            media_duration: None,
            generation: 0,
            pending: None,
            load_id,
            on_gate_prompt,
        }
    }

    pub fn track(&self) -> &TrackDescriptor {
        &self.track
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn threshold(&self) -> f64 {
        self.settings.threshold_secs
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn total_duration(&self) -> Option<f64> {
        let valid = |d: &f64| d.is_finite() && *d > 0.0;
        self.media_duration
            .or(self.track.duration_seconds)
            .filter(valid)
            .or_else(|| self.media.duration().filter(valid))
    }

    /// The "preview only" notice is shown exactly while locked.
    pub fn preview_notice_visible(&self) -> bool {
        self.gate.is_locked()
    }

    /// Swap in another track, paused at zero.
    pub fn load_track(&mut self, track: TrackDescriptor) {
        self.stop();
        self.media_duration = None;
        self.load_id += 1;
        self.media.load(&track.audio_location, self.load_id);
        debug!("preview now on track {}", track.number);
        self.track = track;
    }

    pub fn dispatch(&mut self, cmd: DetailCommand) -> Outcome {
        match cmd {
            DetailCommand::TogglePlay => self.toggle_play(),
            DetailCommand::Seek(fraction) => self.seek(fraction),
            DetailCommand::ScrubForward => self.scrub(self.settings.scrub_seconds as f64),
            DetailCommand::ScrubBack => self.scrub(-(self.settings.scrub_seconds as f64)),
        }
    }

    pub fn toggle_play(&mut self) -> Outcome {
        if self.playing || self.pending.is_some() {
            self.stop_request();
            self.playing = false;
            self.media.pause();
        } else {
            self.generation += 1;
            let ticket = PlayTicket {
                generation: self.generation,
                index: 0,
            };
            self.pending = Some(ticket);
            self.media.play(ticket);
        }
        Outcome::Applied
    }

    pub fn handle_media(&mut self, event: MediaEvent) -> Outcome {
        match event {
            MediaEvent::TimeUpdate { load, secs } => {
                // Paused positions come from our own seeks.
                if load != self.load_id || !self.playing || !secs.is_finite() {
                    return Outcome::Ignored;
                }
                self.elapsed = secs.max(0.0);
                let decision = enforce(self.elapsed, self.gate.is_locked(), self.threshold());
                match decision.forced {
                    Some(ForcedAction::PauseRewindAndPrompt) => {
                        info!(
                            "preview of track {} reached {}s",
                            self.track.number,
                            self.threshold()
                        );
                        self.stop();
                        (self.on_gate_prompt)();
                        Outcome::Gated
                    }
                    None => Outcome::Applied,
                }
            }
            MediaEvent::Ended { load } => {
                if load != self.load_id || !self.playing {
                    return Outcome::Ignored;
                }
                self.stop();
                Outcome::Applied
            }
            MediaEvent::MetadataReady { load, duration } => {
                if load != self.load_id || !(duration.is_finite() && duration > 0.0) {
                    return Outcome::Ignored;
                }
                self.media_duration = Some(duration);
                Outcome::Applied
            }
            MediaEvent::PlayResolved { ticket, outcome } => {
                if self.pending != Some(ticket) {
                    debug!("ignoring stale preview play result {ticket:?}");
                    return Outcome::Ignored;
                }
                self.pending = None;
                match outcome {
                    Ok(()) => {
                        self.playing = true;
                        Outcome::Applied
                    }
                    Err(e) => {
                        warn!("preview playback did not start: {e}");
                        Outcome::Refused
                    }
                }
            }
        }
    }

    /// Seek to `fraction` of the track, no further than the preview limit
    /// while locked.
    pub fn seek(&mut self, fraction: f64) -> Outcome {
        if !fraction.is_finite() {
            return Outcome::Refused;
        }
        let Some(total) = self.total_duration() else {
            return Outcome::Refused;
        };
        let target = fraction.clamp(0.0, 1.0) * total;
        self.seek_to(clamp_seek(target, self.gate.is_locked(), self.threshold()))
    }

    /// Move by `delta` seconds inside the track and the preview limit.
    pub fn scrub(&mut self, delta: f64) -> Outcome {
        if !delta.is_finite() {
            return Outcome::Refused;
        }
        let mut target = self.elapsed + delta;
        if let Some(total) = self.total_duration() {
            target = target.min(total);
        }
        self.seek_to(clamp_seek(target, self.gate.is_locked(), self.threshold()))
    }

    fn seek_to(&mut self, secs: f64) -> Outcome {
        self.media.set_current_time(secs);
        self.elapsed = secs;
        Outcome::Applied
    }

    /// Pause and rewind to zero.
    fn stop(&mut self) {
        self.stop_request();
        self.playing = false;
        self.media.pause();
        self.seek_to(0.0);
    }

    fn stop_request(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}
