use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use super::source::{open_source, read_duration};
use super::types::{ClockHandle, LoadId, MediaCmd, MediaEvent};

/// Per-thread playback state.
struct Deck {
    sink: Option<Sink>,
    location: Option<String>,
    load: LoadId,
    load_error: Option<String>,
    playing: bool,
    volume: f32,
}

impl Deck {
    fn new() -> Self {
        Self {
            sink: None,
            location: None,
            load: 0,
            load_error: None,
            playing: false,
            volume: 1.0,
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    clock: ClockHandle,
    tick: Duration,
    fetch_timeout: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => Some(s),
            Err(e) => {
                error!("no audio output device: {e}");
                None
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        if let Some(s) = stream.as_mut() {
            s.log_on_drop(false);
        }

        let client = match reqwest::blocking::Client::builder()
            .timeout(fetch_timeout)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                warn!("audio download client without timeout: {e}");
                reqwest::blocking::Client::new()
            }
        };

        let mut deck = Deck::new();

        loop {
            match rx.recv_timeout(tick) {
                Ok(MediaCmd::Quit) => {
                    if let Some(s) = deck.sink.take() {
                        s.stop();
                    }
                    break;
                }
                Ok(MediaCmd::Load { location, load: id }) => {
                    deck.load = id;
                    load(&mut deck, stream.as_ref(), &client, &clock, &events, location);
                }
                Ok(MediaCmd::Play(ticket)) => {
                    let outcome = match (&deck.sink, &deck.load_error) {
                        (Some(sink), _) => {
                            sink.play();
                            deck.playing = true;
                            Ok(())
                        }
                        (None, Some(err)) => Err(err.clone()),
                        (None, None) => Err("nothing loaded".to_string()),
                    };
                    let _ = events.send(MediaEvent::PlayResolved { ticket, outcome });
                }
                Ok(MediaCmd::Pause) => {
                    if let Some(s) = deck.sink.as_ref() {
                        s.pause();
                    }
                    deck.playing = false;
                }
                Ok(MediaCmd::Seek(secs)) => {
                    if let Some(s) = deck.sink.as_ref() {
                        if let Err(e) = s.try_seek(Duration::from_secs_f64(secs.max(0.0))) {
                            warn!("seek to {secs:.1}s failed: {e}");
                        }
                        publish_position(s, &clock);
                    }
                }
                Ok(MediaCmd::SetVolume(level)) => {
                    deck.volume = level;
                    if let Some(s) = deck.sink.as_ref() {
                        s.set_volume(level);
                    }
                }
                Err(RecvTimeoutError::Timeout) => tick_progress(&mut deck, &clock, &events),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn load(
    deck: &mut Deck,
    stream: Option<&OutputStream>,
    client: &reqwest::blocking::Client,
    clock: &ClockHandle,
    events: &Sender<MediaEvent>,
    location: String,
) {
    if let Some(old) = deck.sink.take() {
        old.stop();
    }
    deck.playing = false;
    deck.load_error = None;
    if let Ok(mut c) = clock.lock() {
        c.current_time = 0.0;
        c.duration = None;
    }

    let Some(stream) = stream else {
        deck.load_error = Some("no audio output device".to_string());
        return;
    };

    match open_source(&location, client) {
        Ok(source) => {
            let duration = source
                .total_duration()
                .or_else(|| read_duration(&location));

            let sink = Sink::connect_new(stream.mixer());
            sink.set_volume(deck.volume);
            sink.append(source);
            sink.pause();
            deck.sink = Some(sink);

            if let Some(d) = duration {
                let secs = d.as_secs_f64();
                if let Ok(mut c) = clock.lock() {
                    c.duration = Some(secs);
                }
                let _ = events.send(MediaEvent::MetadataReady {
                    load: deck.load,
                    duration: secs,
                });
            }
            debug!("loaded {location}");
        }
        Err(e) => {
            warn!("cannot load {location}: {e}");
            deck.load_error = Some(e.to_string());
        }
    }
    deck.location = Some(location);
}

fn publish_position(sink: &Sink, clock: &ClockHandle) -> f64 {
    let pos = sink.get_pos().as_secs_f64();
    if let Ok(mut c) = clock.lock() {
        c.current_time = pos;
    }
    pos
}

fn tick_progress(deck: &mut Deck, clock: &ClockHandle, events: &Sender<MediaEvent>) {
    if !deck.playing {
        return;
    }
    let Some(sink) = deck.sink.as_ref() else {
        return;
    };

    if sink.empty() {
        deck.playing = false;
        debug!(
            "finished {}",
            deck.location.as_deref().unwrap_or("<unknown>")
        );
        let _ = events.send(MediaEvent::Ended { load: deck.load });
        return;
    }

    let pos = publish_position(sink, clock);
    let _ = events.send(MediaEvent::TimeUpdate {
        load: deck.load,
        secs: pos,
    });
}
