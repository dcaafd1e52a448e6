//! CLI module graph.

pub mod check;
pub mod command;
pub mod load;
pub mod output;
pub mod show;

use std::path::{Path, PathBuf};

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::config::Config;
use crate::error::Result;

/// Pick the warehouse path: CLI override first, then config.
pub(crate) fn resolve_database(config: &Config, db_override: Option<&Path>) -> PathBuf {
    db_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.database.path.clone())
}

/// Open the warehouse pool, creating the parent directory and applying
/// pending migrations.
pub(crate) fn open_warehouse_pool(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let pool = create_pool(&path.display().to_string())?;
    run_migrations(&pool)?;
    Ok(pool)
}
