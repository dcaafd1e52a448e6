//! SQLite implementation of the [`Warehouse`] port.
//!
//! Inserts go out as one batch statement per table. When the batch statement
//! fails with a row-level error the whole batch is retried row-by-row so the
//! offending rows can be reported individually; rows that succeed stay
//! written. Pool checkout failures are connectivity errors and fatal.

use diesel::prelude::*;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    EmploymentRow, MarketRow, NewEmploymentRow, NewMarketRow, NewProductionRow, NewTaxRow,
    NewTimelineRow, NewTrendRow, ProductionRow, RegulatoryRow, TaxRow, TimelineRow, TrendRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    consumer_trends, employment_stats, industry_timeline, market_metrics, production_by_state,
    regulatory_status, tax_revenue,
};
use crate::domain::{
    ConsumerTrend, EmploymentStat, MarketMetric, ProductionRecord, RegulatoryStatus, Table,
    TaxRevenue, TimelineEvent,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{BatchOutcome, Warehouse};

/// SQLite-backed warehouse.
pub struct SqliteWarehouse {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteWarehouse {
    /// Create a new warehouse over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

/// Batch insert with row-by-row isolation on failure.
macro_rules! insert_batch {
    ($self:expr, $records:expr, $row_ty:ty, $table:expr) => {{
        let mut conn = $self.conn()?;
        let mut outcome = BatchOutcome::new($records.len());
        let mut indices = Vec::with_capacity($records.len());
        let mut rows = Vec::with_capacity($records.len());
        for (index, record) in $records.iter().enumerate() {
            match <$row_ty>::from_domain(record) {
                Ok(row) => {
                    indices.push(index);
                    rows.push(row);
                }
                Err(e) => outcome.push_failure(index, e.to_string()),
            }
        }
        if !rows.is_empty() {
            match diesel::insert_into($table).values(&rows).execute(&mut conn) {
                Ok(written) => outcome.inserted = written,
                Err(batch_err) => {
                    debug!(error = %batch_err, "batch insert failed; isolating rows");
                    for (index, row) in indices.iter().zip(rows.iter()) {
                        match diesel::insert_into($table).values(row).execute(&mut conn) {
                            Ok(_) => outcome.inserted += 1,
                            Err(e) => outcome.push_failure(*index, e.to_string()),
                        }
                    }
                }
            }
        }
        Ok(outcome)
    }};
}

impl Warehouse for SqliteWarehouse {
    async fn insert_production(&self, rows: &[ProductionRecord]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewProductionRow, production_by_state::table)
    }

    async fn insert_market(&self, rows: &[MarketMetric]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewMarketRow, market_metrics::table)
    }

    async fn insert_employment(&self, rows: &[EmploymentStat]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewEmploymentRow, employment_stats::table)
    }

    async fn insert_regulatory(&self, rows: &[RegulatoryStatus]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, RegulatoryRow, regulatory_status::table)
    }

    async fn insert_tax(&self, rows: &[TaxRevenue]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewTaxRow, tax_revenue::table)
    }

    async fn insert_trends(&self, rows: &[ConsumerTrend]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewTrendRow, consumer_trends::table)
    }

    async fn insert_timeline(&self, rows: &[TimelineEvent]) -> Result<BatchOutcome> {
        insert_batch!(self, rows, NewTimelineRow, industry_timeline::table)
    }

    async fn truncate(&self, table: Table) -> Result<usize> {
        let mut conn = self.conn()?;
        let deleted = match table {
            Table::Production => {
                diesel::delete(production_by_state::table).execute(&mut conn)
            }
            Table::Market => diesel::delete(market_metrics::table).execute(&mut conn),
            Table::Employment => diesel::delete(employment_stats::table).execute(&mut conn),
            Table::Regulatory => diesel::delete(regulatory_status::table).execute(&mut conn),
            Table::Tax => diesel::delete(tax_revenue::table).execute(&mut conn),
            Table::Trends => diesel::delete(consumer_trends::table).execute(&mut conn),
            Table::Timeline => diesel::delete(industry_timeline::table).execute(&mut conn),
        }
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(deleted)
    }

    async fn fetch_production(&self) -> Result<Vec<ProductionRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<ProductionRow> = production_by_state::table
            .order((
                production_by_state::year.asc(),
                production_by_state::hemp_type.asc(),
            ))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(ProductionRow::into_domain).collect()
    }

    async fn fetch_market(&self) -> Result<Vec<MarketMetric>> {
        let mut conn = self.conn()?;
        let rows: Vec<MarketRow> = market_metrics::table
            .order(market_metrics::year.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(MarketRow::into_domain).collect()
    }

    async fn fetch_employment(&self) -> Result<Vec<EmploymentStat>> {
        let mut conn = self.conn()?;
        let rows: Vec<EmploymentRow> = employment_stats::table
            .order(employment_stats::year.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(EmploymentRow::into_domain).collect()
    }

    async fn fetch_regulatory(&self) -> Result<Vec<RegulatoryStatus>> {
        let mut conn = self.conn()?;
        let rows: Vec<RegulatoryRow> = regulatory_status::table
            .order(regulatory_status::state.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(RegulatoryRow::into_domain).collect()
    }

    async fn fetch_tax(&self) -> Result<Vec<TaxRevenue>> {
        let mut conn = self.conn()?;
        let rows: Vec<TaxRow> = tax_revenue::table
            .order((tax_revenue::year.asc(), tax_revenue::state.asc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(TaxRow::into_domain).collect()
    }

    async fn fetch_trends(&self) -> Result<Vec<ConsumerTrend>> {
        let mut conn = self.conn()?;
        let rows: Vec<TrendRow> = consumer_trends::table
            .order(consumer_trends::year.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(TrendRow::into_domain).collect()
    }

    async fn fetch_timeline(&self) -> Result<Vec<TimelineEvent>> {
        let mut conn = self.conn()?;
        let rows: Vec<TimelineRow> = industry_timeline::table
            .order(industry_timeline::event_date.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.into_iter().map(TimelineRow::into_domain).collect()
    }
}
