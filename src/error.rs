//! Error type shared by the fallible parts of the crate.
//!
//! Player transitions never fail with an error; they report an
//! [`Outcome`](crate::player::Outcome) instead. Errors are reserved for IO,
//! network and decoding boundaries.

/// Errors raised at the crate's IO and network boundaries.
#[derive(thiserror::Error, Debug)]
pub enum EncoreError {
    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status we do not accept
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Playlist data that cannot form a valid playlist
    #[error("playlist error: {0}")]
    Playlist(String),

    /// Address rejected before any request was made
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Subscribe endpoint refused the address
    #[error("subscription rejected ({status}): {message}")]
    SubscriptionRejected { status: u16, message: String },

    /// Audio could not be opened or decoded
    #[error("media error: {0}")]
    Media(String),

    /// Key-value store failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, EncoreError>;
