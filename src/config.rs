//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration and locate data directories.

mod load;
mod schema;

pub use load::{data_dir, default_config_path, resolve_config_path, session_dir};
pub use schema::*;

#[cfg(test)]
mod tests;
