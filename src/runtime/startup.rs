use std::time::Duration;

use log::{info, warn};

use crate::config::{self, Settings};
use crate::gate::AccessGate;
use crate::media::MediaElement;
use crate::player::{Player, save_snapshot, take_snapshot};
use crate::playlist::{HttpPlaylistFetcher, Playlist, PlaylistSource, built_in_playlist};
use crate::storage::{FileStore, StoreHandle, shared};
use crate::subscribe::SubscriptionClient;

const GATE_FILE: &str = "state.json";
const SESSION_FILE: &str = "session.json";

/// Long-lived collaborators shared by both screens.
pub struct Services {
    pub gate: AccessGate,
    pub session: StoreHandle,
    pub playlist: Playlist,
    pub subscriber: SubscriptionClient,
}

pub fn open_services(settings: &Settings) -> Result<Services, Box<dyn std::error::Error>> {
    let gate_store = FileStore::open(config::data_dir(settings).join(GATE_FILE));
    let session_store = FileStore::open(config::session_dir(settings).join(SESSION_FILE));
    info!(
        "gate store at {}, session store at {}",
        gate_store.path().display(),
        session_store.path().display()
    );

    let timeout = Duration::from_secs(settings.api.timeout_secs);
    let playlist = match HttpPlaylistFetcher::new(settings.api.tracks_url.as_str(), timeout) {
        Ok(fetcher) => PlaylistSource::new(fetcher).load(),
        Err(e) => {
            warn!("cannot build playlist client, using built-in playlist: {e}");
            built_in_playlist()
        }
    };

    Ok(Services {
        gate: AccessGate::new(shared(gate_store)),
        session: shared(session_store),
        playlist,
        subscriber: SubscriptionClient::new(settings.api.subscribe_url.as_str(), timeout)?,
    })
}

/// Reinstate the snapshot left by the previous run, at most once.
pub fn restore_session<M: MediaElement>(player: &mut Player<M>, session: &StoreHandle) {
    if let Some(snapshot) = take_snapshot(session) {
        info!("restoring player snapshot {snapshot:?}");
        player.restore(&snapshot);
    }
}

pub fn persist_session<M: MediaElement>(player: &Player<M>, session: &StoreHandle) {
    if let Err(e) = save_snapshot(session, &player.snapshot()) {
        warn!("could not save player snapshot: {e}");
    }
}
