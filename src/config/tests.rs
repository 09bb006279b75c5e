use super::load::{data_dir, default_config_path, resolve_config_path, session_dir};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn storage_dirs_honor_overrides_then_xdg() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
    let _g2 = EnvGuard::set("XDG_RUNTIME_DIR", "/tmp/xdg-run");

    let mut s = Settings::default();
    assert_eq!(data_dir(&s), std::path::PathBuf::from("/tmp/xdg-data/encore"));
    assert_eq!(session_dir(&s), std::path::PathBuf::from("/tmp/xdg-run/encore"));

    s.storage.data_dir = Some("/srv/encore".into());
    s.storage.session_dir = Some("/srv/encore/session".into());
    assert_eq!(data_dir(&s), std::path::PathBuf::from("/srv/encore"));
    assert_eq!(session_dir(&s), std::path::PathBuf::from("/srv/encore/session"));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[api]
tracks_url = "http://example.test/api/public/tracks"
subscribe_url = "http://example.test/api/subscribe"
timeout_secs = 3

[player]
restart_threshold_secs = 5.0
volume_step = 0.25
initial_volume = 0.5

[preview]
threshold_secs = 15.0
scrub_seconds = 9

[media]
asset_base = "https://cdn.example.test/album"
tick_ms = 100
fetch_timeout_secs = 4

[storage]
data_dir = "/tmp/encore-data"

[ui]
header_text = "hello"
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PREVIEW__THRESHOLD_SECS");

    let s = Settings::load().unwrap();
    assert_eq!(s.api.tracks_url, "http://example.test/api/public/tracks");
    assert_eq!(s.api.subscribe_url, "http://example.test/api/subscribe");
    assert_eq!(s.api.timeout_secs, 3);
    assert_eq!(s.player.restart_threshold_secs, 5.0);
    assert_eq!(s.player.volume_step, 0.25);
    assert_eq!(s.player.initial_volume, 0.5);
    assert_eq!(s.preview.threshold_secs, 15.0);
    assert_eq!(s.preview.scrub_seconds, 9);
    assert_eq!(
        s.media.asset_base.as_deref(),
        Some("https://cdn.example.test/album")
    );
    assert_eq!(s.media.tick_ms, 100);
    assert_eq!(s.media.fetch_timeout_secs, 4);
    assert_eq!(
        s.storage.data_dir,
        Some(std::path::PathBuf::from("/tmp/encore-data"))
    );
    assert_eq!(s.storage.session_dir, None);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.ui.now_playing_time_fields,
        vec![TimeField::Elapsed, TimeField::Remaining]
    );
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[preview]
threshold_secs = 30.0
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__PREVIEW__THRESHOLD_SECS", "12.5");

    let s = Settings::load().unwrap();
    assert_eq!(s.preview.threshold_secs, 12.5);
}

#[test]
fn defaults_match_album_site_behavior() {
    let s = Settings::default();
    assert_eq!(s.player.restart_threshold_secs, 3.0);
    assert_eq!(s.preview.threshold_secs, 30.0);
    assert_eq!(s.preview.scrub_seconds, 5);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.preview.threshold_secs = f64::NAN;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.media.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.media.fetch_timeout_secs = 0;
    assert!(s.validate().is_err());
}
