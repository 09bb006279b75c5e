//! JSON shape served by the playlist endpoint.
//!
//! The public endpoint and the admin seed data disagree on a few names, so
//! records accept `trackNumber` or `id`, and a duration given either in
//! seconds or as an `m:ss` clock string.

use serde::Deserialize;

use super::model::TrackDescriptor;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    #[serde(alias = "id")]
    pub track_number: u32,
    pub title: String,
    pub audio_file: String,
    #[serde(default)]
    pub duration: Option<WireDuration>,
    #[serde(default)]
    pub is_bonus: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireDuration {
    Seconds(f64),
    Clock(String),
}

impl WireDuration {
    /// Duration in seconds, or `None` when the value is not usable.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            WireDuration::Seconds(s) if s.is_finite() && *s > 0.0 => Some(*s),
            WireDuration::Seconds(_) => None,
            WireDuration::Clock(c) => parse_clock(c),
        }
    }
}

/// Parse `m:ss` (or `h:mm:ss`) into seconds.
pub fn parse_clock(text: &str) -> Option<f64> {
    let mut total: u64 = 0;
    let mut parts = 0;
    for part in text.trim().split(':') {
        let value: u64 = part.trim().parse().ok()?;
        if parts > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
        parts += 1;
    }
    if !(2..=3).contains(&parts) || total == 0 {
        return None;
    }
    Some(total as f64)
}

impl From<TrackRecord> for TrackDescriptor {
    fn from(r: TrackRecord) -> Self {
        let duration_seconds = r.duration.as_ref().and_then(WireDuration::seconds);
        TrackDescriptor {
            number: r.track_number,
            title: r.title,
            audio_location: r.audio_file,
            duration_seconds,
            is_bonus: r.is_bonus,
        }
    }
}
