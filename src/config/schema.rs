use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub player: PlayerSettings,
    pub preview: PreviewSettings,
    pub media: MediaSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Endpoint returning the public track list.
    pub tracks_url: String,
    /// Endpoint accepting `{ "email": ... }` subscriptions.
    pub subscribe_url: String,
    /// Request timeout for both endpoints (seconds).
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            tracks_url: "http://localhost:5000/api/public/tracks".to_string(),
            subscribe_url: "http://localhost:5000/api/subscribe".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Past this many elapsed seconds, "previous" restarts the current track.
    pub restart_threshold_secs: f64,
    /// Volume change applied by the volume up/down keys.
    pub volume_step: f32,
    /// Volume used when no snapshot is restored.
    pub initial_volume: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            restart_threshold_secs: 3.0,
            volume_step: 0.1,
            initial_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Playback cap while the gate is locked (seconds).
    pub threshold_secs: f64,
    /// Number of seconds to scrub on the track-detail view.
    pub scrub_seconds: u64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            threshold_secs: 30.0,
            scrub_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Base URL or directory that relative audio locations are resolved against.
    pub asset_base: Option<String>,
    /// Interval between progress notifications from the audio thread (milliseconds).
    pub tick_ms: u64,
    /// Limit for downloading one remote audio file (seconds).
    pub fetch_timeout_secs: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            asset_base: None,
            tick_ms: 250,
            fetch_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the unlock flag and the log file live.
    /// Defaults to `$XDG_DATA_HOME/encore` or `~/.local/share/encore`.
    pub data_dir: Option<PathBuf>,
    /// Where the single-navigation player snapshot lives.
    /// Defaults to `$XDG_RUNTIME_DIR/encore` or the system temp dir.
    pub session_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which time fields to show for the status line, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ 24 ~ ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}
