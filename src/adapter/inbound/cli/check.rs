//! The `check` command: warehouse connectivity diagnostic.
//!
//! Opens the pool, applies pending migrations, and counts regulatory rows:
//! the cheapest query that proves both reachability and a loaded dataset.

use diesel::prelude::*;
use serde_json::json;

use super::command::CheckArgs;
use super::output;
use crate::adapter::outbound::sqlite::database::schema::regulatory_status;
use crate::config::Config;
use crate::error::{Error, Result};

pub async fn run(args: &CheckArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));

    let db_path = super::resolve_database(&config, args.db.as_deref());
    output::field("database", db_path.display());

    let pb = output::spinner("Checking warehouse connectivity");
    let pool = match super::open_warehouse_pool(&db_path) {
        Ok(pool) => pool,
        Err(e) => {
            output::spinner_fail(&pb, "warehouse unreachable");
            return Err(e);
        }
    };

    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let regulatory_records: i64 = regulatory_status::table
        .count()
        .get_result(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;
    output::spinner_success(&pb, "warehouse reachable");

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "database": db_path.display().to_string(),
            "regulatory_records": regulatory_records,
        }));
        return Ok(());
    }

    output::field("regulatory records", regulatory_records);
    if regulatory_records == 0 {
        output::note("warehouse is empty; run `hempboard load` to seed it");
    } else {
        output::success(&format!("found {regulatory_records} regulatory records"));
    }
    Ok(())
}
