//! Access gate: the persisted "album unlocked" flag.
//!
//! Once set it is never cleared by this crate. The player and the preview
//! view hold clones of the same gate and therefore read the same store.

use log::{info, warn};

use crate::storage::StoreHandle;

const UNLOCKED_KEY: &str = "albumUnlocked";
const EMAIL_KEY: &str = "userEmail";

#[derive(Clone)]
pub struct AccessGate {
    store: StoreHandle,
}

impl AccessGate {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// True only when the store holds exactly `"true"`.
    pub fn is_unlocked(&self) -> bool {
        match self.store.lock() {
            Ok(store) => store.get(UNLOCKED_KEY).as_deref() == Some("true"),
            Err(_) => false,
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.is_unlocked()
    }

    /// Set the flag. Calling it again changes nothing.
    pub fn unlock(&self) {
        if self.is_unlocked() {
            return;
        }
        if let Ok(mut store) = self.store.lock() {
            match store.set(UNLOCKED_KEY, "true") {
                Ok(()) => info!("album unlocked"),
                Err(e) => warn!("album unlocked for this session only: {e}"),
            }
        }
    }

    /// Unlock and remember which address subscribed.
    pub fn unlock_with_email(&self, email: &str) {
        self.unlock();
        if let Ok(mut store) = self.store.lock() {
            if let Err(e) = store.set(EMAIL_KEY, email) {
                warn!("could not store subscriber email: {e}");
            }
        }
    }

    pub fn email(&self) -> Option<String> {
        self.store.lock().ok().and_then(|s| s.get(EMAIL_KEY))
    }
}
