use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Env, Target};

const LOG_FILE: &str = "encore.log";

/// Send log output to `encore.log` under `dir`; the terminal belongs to the UI.
///
/// The filter comes from `ENCORE_LOG` and defaults to `info`.
pub fn init(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(Env::default().filter_or("ENCORE_LOG", "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(path)
}
