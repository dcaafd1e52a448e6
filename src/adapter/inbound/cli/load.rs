//! The `load` command: materialize the seed catalog into the warehouse.

use serde_json::json;

use super::command::LoadArgs;
use super::output;
use crate::adapter::outbound::sqlite::database::connection::configure_sqlite_connection;
use crate::adapter::outbound::sqlite::SqliteWarehouse;
use crate::application::loader::{LoadReport, Loader};
use crate::application::seed::SeedCatalog;
use crate::config::Config;
use crate::error::{Error, Result};

/// How many row failures to print per table before eliding (override with -v).
const FAILURE_PREVIEW: usize = 5;

pub async fn run(args: &LoadArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));

    let catalog = SeedCatalog::load(&args.seed)?;
    output::field("seed", args.seed.display());
    output::field("schema version", catalog.schema_version);
    output::field("records", catalog.total());

    let db_path = super::resolve_database(&config, args.db.as_deref());
    output::field("database", db_path.display());

    let pb = output::spinner("Connecting to warehouse");
    let pool = match super::open_warehouse_pool(&db_path) {
        Ok(pool) => pool,
        Err(e) => {
            output::spinner_fail(&pb, "warehouse unreachable");
            return Err(e);
        }
    };
    {
        let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
    }
    output::spinner_success(&pb, "warehouse ready");

    let pb = output::spinner("Loading record sets");
    let loader = Loader::new(SqliteWarehouse::new(pool), args.mode.into());
    let report = match loader.run(&catalog).await {
        Ok(report) => report,
        Err(e) => {
            output::spinner_fail(&pb, "load aborted");
            return Err(e);
        }
    };
    output::spinner_success(
        &pb,
        &format!("loaded {} rows into 7 tables", report.total_inserted()),
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "load",
            "report": serde_json::to_value(&report)?,
        }));
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &LoadReport) {
    output::section("Tables");
    for table in &report.tables {
        let mut line = format!("{} inserted", table.inserted);
        if let Some(truncated) = table.truncated {
            line.push_str(&format!(", {truncated} replaced"));
        }
        if !table.failures.is_empty() {
            line.push_str(&format!(", {} failed", table.failures.len()));
        }
        output::field(table.table.name(), line);

        let shown = if output::verbosity() > 0 {
            table.failures.len()
        } else {
            FAILURE_PREVIEW.min(table.failures.len())
        };
        for failure in &table.failures[..shown] {
            output::warning(&format!("row {}: {}", failure.index, failure.reason));
        }
        if shown < table.failures.len() {
            output::note(&format!(
                "… {} more failures (re-run with -v to list all)",
                table.failures.len() - shown
            ));
        }
    }

    if report.is_clean() {
        output::success("all rows loaded");
    } else {
        output::warning(&format!(
            "{} rows failed; successful rows stay written",
            report.total_failures()
        ));
    }
}
