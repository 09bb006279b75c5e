//! Player snapshot carried across a single navigation.
//!
//! Saved to the session store on shutdown and taken (read and removed) once
//! on the next startup.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{EncoreError, Result};
use crate::storage::StoreHandle;

const SNAPSHOT_KEY: &str = "playerState";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub current_index: Option<usize>,
    #[serde(rename = "currentTime", default)]
    pub elapsed_seconds: f64,
    pub volume: f32,
    #[serde(default)]
    pub is_playing: bool,
}

pub fn save_snapshot(store: &StoreHandle, snapshot: &PlayerSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    let mut store = store
        .lock()
        .map_err(|_| EncoreError::Storage("session store lock poisoned".to_string()))?;
    store.set(SNAPSHOT_KEY, &json)
}

/// Read the saved snapshot and remove it, so it is restored at most once.
pub fn take_snapshot(store: &StoreHandle) -> Option<PlayerSnapshot> {
    let mut store = store.lock().ok()?;
    let raw = store.get(SNAPSHOT_KEY)?;
    if let Err(e) = store.remove(SNAPSHOT_KEY) {
        warn!("could not clear player snapshot: {e}");
    }
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("discarding unreadable player snapshot: {e}");
            None
        }
    }
}
