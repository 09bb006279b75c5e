//! Shared test fixtures: a scripted media element and a one-shot HTTP server.

use std::cell::Cell;
use std::io::Read;
use std::thread::{self, JoinHandle};

use crate::media::{LoadId, MediaElement, MediaEvent, PlayTicket};
use crate::playlist::TrackDescriptor;

/// Media element that records what the player asked of it.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub loaded: Vec<String>,
    pub load_ids: Vec<LoadId>,
    pub play_requests: Vec<PlayTicket>,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub volume: Option<f32>,
    pub time: Cell<f64>,
    pub duration: Option<f64>,
}

impl FakeMedia {
    fn current_load(&self) -> LoadId {
        self.load_ids.last().copied().unwrap_or_default()
    }

    /// Progress for the current load; also moves the clock to `secs`.
    pub fn time_update(&self, secs: f64) -> MediaEvent {
        self.time.set(secs);
        MediaEvent::TimeUpdate {
            load: self.current_load(),
            secs,
        }
    }

    pub fn ended(&self) -> MediaEvent {
        MediaEvent::Ended {
            load: self.current_load(),
        }
    }

    pub fn metadata_ready(&self, duration: f64) -> MediaEvent {
        MediaEvent::MetadataReady {
            load: self.current_load(),
            duration,
        }
    }
}

impl MediaElement for FakeMedia {
    fn load(&mut self, uri: &str, load: LoadId) {
        self.loaded.push(uri.to_string());
        self.load_ids.push(load);
        self.time.set(0.0);
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.play_requests.push(ticket);
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn current_time(&self) -> f64 {
        self.time.get()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.seeks.push(secs);
        self.time.set(secs);
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = Some(level);
    }
}

pub fn track(number: u32, is_bonus: bool) -> TrackDescriptor {
    TrackDescriptor {
        number,
        title: format!("Track {number}"),
        audio_location: format!("audio/track{number}.mp3"),
        duration_seconds: Some(180.0),
        is_bonus,
    }
}

/// Serve exactly one request on loopback with a canned response.
///
/// Returns the base URL and a handle yielding the request body.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<Option<String>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind loopback");
    let port = server
        .server_addr()
        .to_ip()
        .expect("ip listener")
        .port();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let mut request = server.recv().ok()?;
        let mut received = String::new();
        request.as_reader().read_to_string(&mut received).ok()?;
        let response = tiny_http::Response::from_string(body).with_status_code(status);
        request.respond(response).ok()?;
        Some(received)
    });

    (format!("http://127.0.0.1:{port}"), handle)
}
