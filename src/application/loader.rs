//! Batch loader: materializes the seed catalog into the warehouse.
//!
//! One batch insert per table, in catalog order. A connectivity failure
//! aborts the remaining tables; per-row failures are collected into the
//! report and never block sibling rows or other tables. Nothing is rolled
//! back: partial writes are surfaced, not hidden.

use serde::Serialize;
use tracing::{info, warn};

use crate::application::seed::SeedCatalog;
use crate::domain::Table;
use crate::error::Result;
use crate::port::outbound::store::{BatchOutcome, RowFailure, Warehouse};

/// Refresh semantics for one loader run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// Truncate each table before inserting (exactly one seed's worth of
    /// rows afterwards).
    #[default]
    Replace,
    /// Insert on top of existing rows. Repeated runs accumulate duplicates;
    /// kept for audit-log style refreshes.
    Append,
}

/// Result of loading one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableLoad {
    pub table: Table,
    /// Rows deleted by Replace mode; `None` in Append mode.
    pub truncated: Option<usize>,
    pub attempted: usize,
    pub inserted: usize,
    pub failures: Vec<RowFailure>,
}

/// Result of one loader run across all tables.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub mode: RefreshMode,
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    /// Total rows written across all tables.
    #[must_use]
    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    /// Total row failures across all tables.
    #[must_use]
    pub fn total_failures(&self) -> usize {
        self.tables.iter().map(|t| t.failures.len()).sum()
    }

    /// True when every submitted row was written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total_failures() == 0
    }
}

/// Orchestrates one data refresh.
pub struct Loader<W> {
    warehouse: W,
    mode: RefreshMode,
}

impl<W: Warehouse> Loader<W> {
    /// Create a loader with the given refresh mode.
    #[must_use]
    pub fn new(warehouse: W, mode: RefreshMode) -> Self {
        Self { warehouse, mode }
    }

    /// Load every record set of the catalog into its table.
    ///
    /// # Errors
    /// Returns an error as soon as the storage becomes unreachable; tables
    /// already loaded at that point stay written.
    pub async fn run(&self, catalog: &SeedCatalog) -> Result<LoadReport> {
        info!(
            mode = ?self.mode,
            records = catalog.total(),
            "loading seed catalog into warehouse"
        );
        let mut tables = Vec::with_capacity(Table::ALL.len());

        let truncated = self.prepare(Table::Production).await?;
        let outcome = self.warehouse.insert_production(&catalog.production).await?;
        tables.push(table_load(Table::Production, truncated, outcome));

        let truncated = self.prepare(Table::Market).await?;
        let outcome = self.warehouse.insert_market(&catalog.market).await?;
        tables.push(table_load(Table::Market, truncated, outcome));

        let truncated = self.prepare(Table::Employment).await?;
        let outcome = self.warehouse.insert_employment(&catalog.employment).await?;
        tables.push(table_load(Table::Employment, truncated, outcome));

        let truncated = self.prepare(Table::Regulatory).await?;
        let outcome = self.warehouse.insert_regulatory(&catalog.regulatory).await?;
        tables.push(table_load(Table::Regulatory, truncated, outcome));

        let truncated = self.prepare(Table::Tax).await?;
        let outcome = self.warehouse.insert_tax(&catalog.tax).await?;
        tables.push(table_load(Table::Tax, truncated, outcome));

        let truncated = self.prepare(Table::Trends).await?;
        let outcome = self.warehouse.insert_trends(&catalog.trends).await?;
        tables.push(table_load(Table::Trends, truncated, outcome));

        let truncated = self.prepare(Table::Timeline).await?;
        let outcome = self.warehouse.insert_timeline(&catalog.timeline).await?;
        tables.push(table_load(Table::Timeline, truncated, outcome));

        let report = LoadReport {
            mode: self.mode,
            tables,
        };
        info!(
            inserted = report.total_inserted(),
            failures = report.total_failures(),
            "seed load finished"
        );
        Ok(report)
    }

    async fn prepare(&self, table: Table) -> Result<Option<usize>> {
        match self.mode {
            RefreshMode::Replace => Ok(Some(self.warehouse.truncate(table).await?)),
            RefreshMode::Append => Ok(None),
        }
    }
}

fn table_load(table: Table, truncated: Option<usize>, outcome: BatchOutcome) -> TableLoad {
    if outcome.failures.is_empty() {
        info!(table = %table, inserted = outcome.inserted, "loaded table");
    } else {
        warn!(
            table = %table,
            inserted = outcome.inserted,
            failed = outcome.failures.len(),
            "loaded table with row failures"
        );
    }
    TableLoad {
        table,
        truncated,
        attempted: outcome.attempted,
        inserted: outcome.inserted,
        failures: outcome.failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, DbPool, run_migrations};
    use crate::adapter::outbound::sqlite::SqliteWarehouse;

    fn test_pool() -> DbPool {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn warehouse() -> SqliteWarehouse {
        SqliteWarehouse::new(test_pool())
    }

    fn small_catalog() -> SeedCatalog {
        toml::from_str(
            r#"
            schema_version = 1

            [[production]]
            state = "US"
            year = 2023
            planted_acres = 27619
            harvested_acres = 21093
            production_value_usd = 285000000
            hemp_type = "all"
            source = "USDA NASS"

            [[regulatory]]
            state = "AK"
            thc_beverage_status = "legal"
            max_thc_mg_per_serving = 10
            age_restriction = 21
            source = "MultiState"

            [[regulatory]]
            state = "AL"
            thc_beverage_status = "banned"
            source = "MultiState"

            [[timeline]]
            event_date = "2018-12-20"
            event_type = "legislation"
            title = "2018 Farm Bill Signed"
            description = "Hemp legalized federally"
            impact = "positive"
            source = "Congress.gov"
            "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn run_reports_counts_per_table() {
        let loader = Loader::new(warehouse(), RefreshMode::Replace);
        let report = loader.run(&small_catalog()).await.unwrap();

        assert_eq!(report.tables.len(), 7);
        assert!(report.is_clean());
        assert_eq!(report.total_inserted(), 4);

        let regulatory = report
            .tables
            .iter()
            .find(|t| t.table == Table::Regulatory)
            .unwrap();
        assert_eq!(regulatory.attempted, 2);
        assert_eq!(regulatory.inserted, 2);
    }

    #[tokio::test]
    async fn replace_mode_is_idempotent_across_runs() {
        let pool = test_pool();
        let store = SqliteWarehouse::new(pool.clone());
        let catalog = small_catalog();

        Loader::new(SqliteWarehouse::new(pool.clone()), RefreshMode::Replace)
            .run(&catalog)
            .await
            .unwrap();
        let second = Loader::new(SqliteWarehouse::new(pool), RefreshMode::Replace)
            .run(&catalog)
            .await
            .unwrap();

        let production = second
            .tables
            .iter()
            .find(|t| t.table == Table::Production)
            .unwrap();
        assert_eq!(production.truncated, Some(1));

        use crate::port::outbound::store::Warehouse as _;
        assert_eq!(store.fetch_production().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn append_mode_accumulates_rows() {
        let pool = test_pool();
        let store = SqliteWarehouse::new(pool.clone());
        let catalog = small_catalog();

        Loader::new(SqliteWarehouse::new(pool.clone()), RefreshMode::Append)
            .run(&catalog)
            .await
            .unwrap();
        let second = Loader::new(SqliteWarehouse::new(pool), RefreshMode::Append)
            .run(&catalog)
            .await
            .unwrap();

        let production = second
            .tables
            .iter()
            .find(|t| t.table == Table::Production)
            .unwrap();
        assert_eq!(production.truncated, None);

        use crate::port::outbound::store::Warehouse as _;
        // Duplicate accumulation is the documented Append behavior.
        assert_eq!(store.fetch_production().await.unwrap().len(), 2);
        // The regulatory natural key rejects the duplicates instead.
        assert_eq!(second.total_failures(), 2);
    }

    #[tokio::test]
    async fn row_failures_do_not_block_other_tables() {
        let mut catalog = small_catalog();
        // Duplicate state inside one batch: one row must fail, the rest load.
        catalog.regulatory.push(catalog.regulatory[0].clone());

        let report = Loader::new(warehouse(), RefreshMode::Replace)
            .run(&catalog)
            .await
            .unwrap();

        let regulatory = report
            .tables
            .iter()
            .find(|t| t.table == Table::Regulatory)
            .unwrap();
        assert_eq!(regulatory.attempted, 3);
        assert_eq!(regulatory.inserted, 2);
        assert_eq!(regulatory.failures.len(), 1);
        assert_eq!(regulatory.failures[0].index, 2);

        // Tables after the failing one still loaded.
        let timeline = report
            .tables
            .iter()
            .find(|t| t.table == Table::Timeline)
            .unwrap();
        assert_eq!(timeline.inserted, 1);
    }
}
