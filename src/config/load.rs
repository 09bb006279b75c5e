use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `ENCORE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.player.restart_threshold_secs >= 0.0) {
            return Err("player.restart_threshold_secs must be >= 0".to_string());
        }
        if !(self.player.volume_step > 0.0 && self.player.volume_step <= 1.0) {
            return Err("player.volume_step must be in (0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.player.initial_volume) {
            return Err("player.initial_volume must be in [0, 1]".to_string());
        }
        if !(self.preview.threshold_secs > 0.0) {
            return Err("preview.threshold_secs must be > 0".to_string());
        }
        if self.media.tick_ms == 0 {
            return Err("media.tick_ms must be >= 1".to_string());
        }
        if self.media.fetch_timeout_secs == 0 {
            return Err("media.fetch_timeout_secs must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("encore").join("config.toml"))
}

/// Directory for the unlock flag and log file: `storage.data_dir` when set,
/// else `$XDG_DATA_HOME/encore` or `~/.local/share/encore`.
pub fn data_dir(settings: &Settings) -> PathBuf {
    if let Some(dir) = &settings.storage.data_dir {
        return dir.clone();
    }
    xdg_dir("XDG_DATA_HOME", ".local/share")
        .map(|d| d.join("encore"))
        .unwrap_or_else(|| env::temp_dir().join("encore"))
}

/// Directory for the session snapshot: `storage.session_dir` when set,
/// else `$XDG_RUNTIME_DIR/encore` or `<tmp>/encore-session`.
pub fn session_dir(settings: &Settings) -> PathBuf {
    if let Some(dir) = &settings.storage.session_dir {
        return dir.clone();
    }
    match env::var_os("XDG_RUNTIME_DIR") {
        Some(run) => PathBuf::from(run).join("encore"),
        None => env::temp_dir().join("encore-session"),
    }
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
