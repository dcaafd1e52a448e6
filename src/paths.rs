//! Path utilities for hempboard.
//!
//! All data lives under `~/.hempboard/`:
//! - `~/.hempboard/config.toml` - main configuration
//! - `~/.hempboard/hempboard.db` - warehouse database

use std::path::PathBuf;

/// Returns the hempboard home directory (`~/.hempboard/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hempboard")
}

/// Returns the default config file path (`~/.hempboard/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.hempboard/hempboard.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("hempboard.db")
}

/// Returns the default seed catalog path (`data/seed.toml` in the working
/// directory, where a checkout keeps the versioned dataset).
pub fn default_seed() -> PathBuf {
    PathBuf::from("data/seed.toml")
}

/// Ensures the hempboard home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}
