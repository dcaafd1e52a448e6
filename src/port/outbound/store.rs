//! Persistence port for the seven warehouse tables.

use std::future::Future;

use serde::Serialize;

use crate::domain::{
    ConsumerTrend, EmploymentStat, MarketMetric, ProductionRecord, RegulatoryStatus, Table,
    TaxRevenue, TimelineEvent,
};
use crate::error::Result;

/// Descriptor for a single row that failed to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Index of the row within the submitted batch.
    pub index: usize,
    /// Backend error description.
    pub reason: String,
}

/// Outcome of one batch insert.
///
/// Rows that succeed stay written even when siblings fail; the failures are
/// surfaced here instead of rolling the batch back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Rows submitted.
    pub attempted: usize,
    /// Rows written.
    pub inserted: usize,
    /// Per-row failure descriptors.
    pub failures: Vec<RowFailure>,
}

impl BatchOutcome {
    /// Create an outcome for a batch of the given size.
    #[must_use]
    pub fn new(attempted: usize) -> Self {
        Self {
            attempted,
            inserted: 0,
            failures: Vec::new(),
        }
    }

    /// Record a row failure.
    pub fn push_failure(&mut self, index: usize, reason: impl Into<String>) {
        self.failures.push(RowFailure {
            index,
            reason: reason.into(),
        });
    }

    /// True when every submitted row was written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.inserted == self.attempted
    }
}

/// Storage operations for the analytical warehouse.
///
/// Inserts are batch-oriented and report per-row failures through
/// [`BatchOutcome`]; a returned `Err` means the storage itself was
/// unreachable and the operation is fatal. Fetches return full tables in
/// their fixed display order.
pub trait Warehouse: Send + Sync {
    /// Insert production rows.
    fn insert_production(
        &self,
        rows: &[ProductionRecord],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert market metric rows.
    fn insert_market(
        &self,
        rows: &[MarketMetric],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert employment rows.
    fn insert_employment(
        &self,
        rows: &[EmploymentStat],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert regulatory status rows.
    fn insert_regulatory(
        &self,
        rows: &[RegulatoryStatus],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert tax revenue rows.
    fn insert_tax(&self, rows: &[TaxRevenue]) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert consumer trend rows.
    fn insert_trends(
        &self,
        rows: &[ConsumerTrend],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Insert timeline rows.
    fn insert_timeline(
        &self,
        rows: &[TimelineEvent],
    ) -> impl Future<Output = Result<BatchOutcome>> + Send;

    /// Delete all rows of a table. Returns the count deleted.
    fn truncate(&self, table: Table) -> impl Future<Output = Result<usize>> + Send;

    /// Fetch production rows ordered by (year, hemp_type).
    fn fetch_production(&self) -> impl Future<Output = Result<Vec<ProductionRecord>>> + Send;

    /// Fetch market metric rows ordered by (year).
    fn fetch_market(&self) -> impl Future<Output = Result<Vec<MarketMetric>>> + Send;

    /// Fetch employment rows ordered by (year).
    fn fetch_employment(&self) -> impl Future<Output = Result<Vec<EmploymentStat>>> + Send;

    /// Fetch regulatory rows ordered by (state).
    fn fetch_regulatory(&self) -> impl Future<Output = Result<Vec<RegulatoryStatus>>> + Send;

    /// Fetch tax rows ordered by (year, state).
    fn fetch_tax(&self) -> impl Future<Output = Result<Vec<TaxRevenue>>> + Send;

    /// Fetch consumer trend rows ordered by (year).
    fn fetch_trends(&self) -> impl Future<Output = Result<Vec<ConsumerTrend>>> + Send;

    /// Fetch timeline rows ordered by (event_date).
    fn fetch_timeline(&self) -> impl Future<Output = Result<Vec<TimelineEvent>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_outcome_tracks_failures() {
        let mut outcome = BatchOutcome::new(10);
        outcome.inserted = 9;
        outcome.push_failure(3, "UNIQUE constraint failed");

        assert!(!outcome.is_clean());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 3);
    }

    #[test]
    fn clean_outcome_requires_all_rows_written() {
        let mut outcome = BatchOutcome::new(2);
        outcome.inserted = 2;
        assert!(outcome.is_clean());

        outcome.inserted = 1;
        assert!(!outcome.is_clean());
    }
}
