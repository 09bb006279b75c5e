use std::time::Duration;

use log::{info, warn};

use crate::error::{EncoreError, Result};

use super::fallback::built_in_tracks;
use super::model::{Playlist, TrackDescriptor};
use super::wire::TrackRecord;

/// Something that can produce the remote track list.
pub trait PlaylistFetcher {
    fn fetch(&self) -> Result<Vec<TrackRecord>>;
}

/// Fetches the track list with a blocking HTTP `GET`.
pub struct HttpPlaylistFetcher {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpPlaylistFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl PlaylistFetcher for HttpPlaylistFetcher {
    fn fetch(&self) -> Result<Vec<TrackRecord>> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(EncoreError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(response.json::<Vec<TrackRecord>>()?)
    }
}

/// Loads the playlist once at startup: remote first, built-in list otherwise.
pub struct PlaylistSource<F: PlaylistFetcher> {
    fetcher: F,
}

impl<F: PlaylistFetcher> PlaylistSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Always returns a non-empty playlist sorted by track number.
    pub fn load(&self) -> Playlist {
        match self.try_remote() {
            Ok(playlist) => {
                info!("loaded {} tracks from the playlist endpoint", playlist.len());
                playlist
            }
            Err(e) => {
                warn!("using built-in playlist: {e}");
                built_in_playlist()
            }
        }
    }

    fn try_remote(&self) -> Result<Playlist> {
        let records = self.fetcher.fetch()?;
        let tracks: Vec<TrackDescriptor> = records.into_iter().map(Into::into).collect();
        Playlist::new(tracks)
    }
}

/// The shipped album list as a playlist.
pub fn built_in_playlist() -> Playlist {
    Playlist::new(built_in_tracks()).expect("built-in playlist is non-empty with unique numbers")
}
