//! Opening audio for `rodio`.
//!
//! Locations are local paths or HTTP(S) URLs. Remote audio is downloaded in
//! full before decoding, which keeps the decoder seekable.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::Decoder;

use crate::error::{EncoreError, Result};

pub(super) type AudioSource = Decoder<Cursor<Vec<u8>>>;

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Join a relative location onto `base`; absolute URLs and paths pass through.
pub fn resolve_location(base: Option<&str>, location: &str) -> String {
    let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) else {
        return location.to_string();
    };
    if is_remote(location) || Path::new(location).is_absolute() {
        return location.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        location.trim_start_matches("./").trim_start_matches('/')
    )
}

fn read_bytes(location: &str, client: &reqwest::blocking::Client) -> Result<Vec<u8>> {
    if is_remote(location) {
        let response = client.get(location).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(EncoreError::Status {
                status: status.as_u16(),
                url: location.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    } else {
        Ok(std::fs::read(location)?)
    }
}

/// Fetch and decode the audio at `location`.
pub(super) fn open_source(
    location: &str,
    client: &reqwest::blocking::Client,
) -> Result<AudioSource> {
    let bytes = read_bytes(location, client)?;
    Decoder::new(Cursor::new(bytes))
        .map_err(|e| EncoreError::Media(format!("cannot decode {location}: {e}")))
}

/// Read the duration from a local file's tags when the decoder cannot tell.
pub(super) fn read_duration(location: &str) -> Option<Duration> {
    if is_remote(location) {
        return None;
    }
    let tagged = lofty::read_from_path(location).ok()?;
    let d = tagged.properties().duration();
    (!d.is_zero()).then_some(d)
}
