use log::warn;

use crate::error::{EncoreError, Result};

/// One album track as the player sees it. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDescriptor {
    pub number: u32,
    pub title: String,
    pub audio_location: String,
    pub duration_seconds: Option<f64>,
    pub is_bonus: bool,
}

/// Ordered, non-empty list of tracks with unique numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Vec<TrackDescriptor>,
}

impl Playlist {
    /// Build a playlist, sorting by `number`.
    ///
    /// Tracks numbered 0 or with a blank title are dropped; for duplicate
    /// numbers the first occurrence wins. Fails when nothing remains.
    pub fn new(tracks: Vec<TrackDescriptor>) -> Result<Self> {
        let mut kept: Vec<TrackDescriptor> = Vec::with_capacity(tracks.len());

        for track in tracks {
            if track.number == 0 || track.title.trim().is_empty() {
                warn!(
                    "dropping track {} {:?}: needs a positive number and a title",
                    track.number, track.title
                );
                continue;
            }
            if kept.iter().any(|t| t.number == track.number) {
                warn!("dropping duplicate track number {}", track.number);
                continue;
            }
            kept.push(track);
        }

        if kept.is_empty() {
            return Err(EncoreError::Playlist("no playable tracks".to_string()));
        }

        kept.sort_by_key(|t| t.number);
        Ok(Self { tracks: kept })
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed playlist.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    /// Position of the track numbered `number`.
    pub fn index_of(&self, number: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.number == number)
    }

    /// Previous and next tracks around `number`, without wrapping.
    ///
    /// Used by the track-detail view for its page navigation.
    pub fn neighbors(&self, number: u32) -> (Option<&TrackDescriptor>, Option<&TrackDescriptor>) {
        let Some(i) = self.index_of(number) else {
            return (None, None);
        };
        let prev = i.checked_sub(1).and_then(|p| self.tracks.get(p));
        (prev, self.tracks.get(i + 1))
    }
}
