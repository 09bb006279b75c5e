use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::MediaSettings;

use super::MediaElement;
use super::source::resolve_location;
use super::thread::spawn_audio_thread;
use super::types::{ClockHandle, LoadId, MediaClock, MediaCmd, MediaEvent, PlayTicket};

/// `MediaElement` backed by a `rodio` sink on a dedicated audio thread.
///
/// Commands go over a channel; outcomes and progress come back as
/// `MediaEvent`s on the receiver handed out by [`RodioMedia::new`].
pub struct RodioMedia {
    tx: Sender<MediaCmd>,
    clock: ClockHandle,
    asset_base: Option<String>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioMedia {
    pub fn new(settings: &MediaSettings) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        let clock: ClockHandle = Arc::new(Mutex::new(MediaClock::default()));

        let handle = spawn_audio_thread(
            rx,
            events_tx,
            clock.clone(),
            Duration::from_millis(settings.tick_ms.max(1)),
            Duration::from_secs(settings.fetch_timeout_secs.max(1)),
        );

        let media = Self {
            tx,
            clock,
            asset_base: settings.asset_base.clone(),
            join: Mutex::new(Some(handle)),
        };
        (media, events_rx)
    }

    fn send(&self, cmd: MediaCmd) {
        // The thread only exits on Quit, after which nobody sends.
        let _ = self.tx.send(cmd);
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        self.send(MediaCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl MediaElement for RodioMedia {
    fn load(&mut self, uri: &str, load: LoadId) {
        if let Ok(mut c) = self.clock.lock() {
            *c = MediaClock::default();
        }
        self.send(MediaCmd::Load {
            location: resolve_location(self.asset_base.as_deref(), uri),
            load,
        });
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.send(MediaCmd::Play(ticket));
    }

    fn pause(&mut self) {
        self.send(MediaCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().map(|c| c.current_time).unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        if let Ok(mut c) = self.clock.lock() {
            c.current_time = secs;
        }
        self.send(MediaCmd::Seek(secs));
    }

    fn duration(&self) -> Option<f64> {
        self.clock.lock().ok().and_then(|c| c.duration)
    }

    fn set_volume(&mut self, level: f32) {
        self.send(MediaCmd::SetVolume(level));
    }
}
