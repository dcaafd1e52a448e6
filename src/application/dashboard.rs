//! Dashboard service: cached retrieval plus view derivation.
//!
//! Each render retrieves the seven tables (through the TTL cache), derives
//! the chart-ready views, and hands back a serializable snapshot. A failed
//! retrieval is fatal to the render; the service never serves partial or
//! stale-beyond-TTL data.

use std::sync::Arc;

use serde::Serialize;

use crate::application::cache::DashboardCache;
use crate::config::DashboardConfig;
use crate::domain::derive;
use crate::domain::{
    ConsumerTrend, EmploymentStat, HeroSummary, MarketMetric, ProductionRecord, RegulatoryStatus,
    SeriesPoint, StateOrdinal, StateTaxRevenue, StatusCount, TaxRevenue, TimelineEvent,
    TimelineItem,
};
use crate::error::Result;
use crate::port::outbound::store::Warehouse;

/// Everything one dashboard render needs, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub hero: HeroSummary,
    pub production_series: Vec<SeriesPoint>,
    pub market_series: Vec<SeriesPoint>,
    pub employment_series: Vec<SeriesPoint>,
    pub top_tax_states: Vec<StateTaxRevenue>,
    pub status_tally: Vec<StatusCount>,
    pub state_ordinals: Vec<StateOrdinal>,
    pub trends: Vec<ConsumerTrend>,
    pub timeline: Vec<TimelineItem>,
}

/// Read side of the dashboard: cached table retrieval and derivation.
pub struct DashboardService<W> {
    warehouse: W,
    targets: DashboardConfig,
    cache: DashboardCache,
}

impl<W: Warehouse> DashboardService<W> {
    /// Create a service over a warehouse with explicit targets and cache.
    #[must_use]
    pub fn new(warehouse: W, targets: DashboardConfig, cache: DashboardCache) -> Self {
        Self {
            warehouse,
            targets,
            cache,
        }
    }

    /// Production table, cached, ordered by (year, hemp_type).
    pub async fn production(&self) -> Result<Arc<Vec<ProductionRecord>>> {
        if let Some(rows) = self.cache.production.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_production().await?;
        Ok(self.cache.production.store(rows))
    }

    /// Market metric table, cached, ordered by (year).
    pub async fn market(&self) -> Result<Arc<Vec<MarketMetric>>> {
        if let Some(rows) = self.cache.market.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_market().await?;
        Ok(self.cache.market.store(rows))
    }

    /// Employment table, cached, ordered by (year).
    pub async fn employment(&self) -> Result<Arc<Vec<EmploymentStat>>> {
        if let Some(rows) = self.cache.employment.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_employment().await?;
        Ok(self.cache.employment.store(rows))
    }

    /// Regulatory table, cached, ordered by (state).
    pub async fn regulatory(&self) -> Result<Arc<Vec<RegulatoryStatus>>> {
        if let Some(rows) = self.cache.regulatory.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_regulatory().await?;
        Ok(self.cache.regulatory.store(rows))
    }

    /// Tax table, cached, ordered by (year, state).
    pub async fn tax(&self) -> Result<Arc<Vec<TaxRevenue>>> {
        if let Some(rows) = self.cache.tax.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_tax().await?;
        Ok(self.cache.tax.store(rows))
    }

    /// Consumer trend table, cached, ordered by (year).
    pub async fn trends(&self) -> Result<Arc<Vec<ConsumerTrend>>> {
        if let Some(rows) = self.cache.trends.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_trends().await?;
        Ok(self.cache.trends.store(rows))
    }

    /// Timeline table, cached, ordered by (event_date).
    pub async fn timeline(&self) -> Result<Arc<Vec<TimelineEvent>>> {
        if let Some(rows) = self.cache.timeline.get() {
            return Ok(rows);
        }
        let rows = self.warehouse.fetch_timeline().await?;
        Ok(self.cache.timeline.store(rows))
    }

    /// The timeline items view, chronological.
    pub async fn timeline_view(&self) -> Result<Vec<TimelineItem>> {
        Ok(derive::timeline_items(&self.timeline().await?))
    }

    /// Retrieve all tables and derive the full snapshot.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let production = self.production().await?;
        let market = self.market().await?;
        let employment = self.employment().await?;
        let regulatory = self.regulatory().await?;
        let tax = self.tax().await?;
        let trends = self.trends().await?;
        let timeline = self.timeline().await?;

        Ok(DashboardSnapshot {
            hero: derive::hero_summary(&production, &employment, &tax, &regulatory),
            production_series: derive::production_value_series(&production),
            market_series: derive::metric_series(&market, &self.targets.market_metric),
            employment_series: derive::national_employment_series(&employment),
            top_tax_states: derive::top_tax_states(
                &tax,
                self.targets.tax_year,
                self.targets.tax_quarter,
                self.targets.top_states,
            ),
            status_tally: derive::status_tally(&regulatory),
            state_ordinals: derive::state_ordinals(&regulatory),
            trends: trends.as_ref().clone(),
            timeline: derive::timeline_items(&timeline),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BeverageStatus, HempType, Table};
    use crate::error::Error;
    use crate::port::outbound::store::BatchOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory warehouse double counting fetches, for cache behavior.
    #[derive(Default)]
    struct FakeWarehouse {
        fetches: AtomicUsize,
        fail_tax: bool,
        production: Vec<ProductionRecord>,
        tax: Vec<TaxRevenue>,
        regulatory: Vec<RegulatoryStatus>,
    }

    impl FakeWarehouse {
        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn tick(&self) {
            self.fetches.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Warehouse for &FakeWarehouse {
        async fn insert_production(&self, _: &[ProductionRecord]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_market(&self, _: &[MarketMetric]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_employment(&self, _: &[EmploymentStat]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_regulatory(&self, _: &[RegulatoryStatus]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_tax(&self, _: &[TaxRevenue]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_trends(&self, _: &[ConsumerTrend]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn insert_timeline(&self, _: &[TimelineEvent]) -> Result<BatchOutcome> {
            unimplemented!("read-only double")
        }
        async fn truncate(&self, _: Table) -> Result<usize> {
            unimplemented!("read-only double")
        }

        async fn fetch_production(&self) -> Result<Vec<ProductionRecord>> {
            self.tick();
            Ok(self.production.clone())
        }
        async fn fetch_market(&self) -> Result<Vec<MarketMetric>> {
            self.tick();
            Ok(Vec::new())
        }
        async fn fetch_employment(&self) -> Result<Vec<EmploymentStat>> {
            self.tick();
            Ok(Vec::new())
        }
        async fn fetch_regulatory(&self) -> Result<Vec<RegulatoryStatus>> {
            self.tick();
            Ok(self.regulatory.clone())
        }
        async fn fetch_tax(&self) -> Result<Vec<TaxRevenue>> {
            self.tick();
            if self.fail_tax {
                return Err(Error::Connection("warehouse offline".into()));
            }
            Ok(self.tax.clone())
        }
        async fn fetch_trends(&self) -> Result<Vec<ConsumerTrend>> {
            self.tick();
            Ok(Vec::new())
        }
        async fn fetch_timeline(&self) -> Result<Vec<TimelineEvent>> {
            self.tick();
            Ok(Vec::new())
        }
    }

    fn fake_data() -> FakeWarehouse {
        FakeWarehouse {
            production: vec![
                ProductionRecord {
                    state: "US".into(),
                    year: 2023,
                    planted_acres: 27_619,
                    harvested_acres: 21_093,
                    production_value_usd: 285_000_000,
                    hemp_type: HempType::All,
                    source: "USDA NASS".into(),
                },
                ProductionRecord {
                    state: "US".into(),
                    year: 2024,
                    planted_acres: 45_294,
                    harvested_acres: 32_694,
                    production_value_usd: 445_000_000,
                    hemp_type: HempType::All,
                    source: "USDA NASS".into(),
                },
            ],
            tax: vec![TaxRevenue {
                state: "CA".into(),
                year: 2023,
                quarter: Some(4),
                tax_revenue_usd: 161_000_000,
                pct_of_state_revenue: None,
                source: "Census Bureau".into(),
            }],
            regulatory: vec![RegulatoryStatus {
                state: "AK".into(),
                thc_beverage_status: BeverageStatus::Legal,
                max_thc_mg_per_serving: None,
                max_thc_mg_per_package: None,
                age_restriction: Some(21),
                notes: None,
                source: "MultiState".into(),
            }],
            ..Default::default()
        }
    }

    fn service(
        warehouse: &FakeWarehouse,
        ttl: Duration,
    ) -> DashboardService<&FakeWarehouse> {
        DashboardService::new(
            warehouse,
            DashboardConfig::default(),
            DashboardCache::with_ttl(ttl),
        )
    }

    #[tokio::test]
    async fn snapshot_derives_all_views() {
        let warehouse = fake_data();
        let service = service(&warehouse, Duration::from_secs(3600));

        let snapshot = service.snapshot().await.unwrap();

        assert_eq!(snapshot.production_series.len(), 2);
        assert_eq!(snapshot.top_tax_states.len(), 1);
        assert_eq!(snapshot.status_tally.len(), 1);
        assert_eq!(snapshot.hero.states_legal, 1);
        assert!(snapshot.market_series.is_empty());
    }

    #[tokio::test]
    async fn cached_tables_are_fetched_once_within_ttl() {
        let warehouse = fake_data();
        let service = service(&warehouse, Duration::from_secs(3600));

        service.snapshot().await.unwrap();
        assert_eq!(warehouse.fetch_count(), 7);

        service.snapshot().await.unwrap();
        assert_eq!(warehouse.fetch_count(), 7, "second render must hit cache");
    }

    #[tokio::test]
    async fn zero_ttl_disables_the_cache() {
        let warehouse = fake_data();
        let service = service(&warehouse, Duration::ZERO);

        service.snapshot().await.unwrap();
        service.snapshot().await.unwrap();

        assert_eq!(warehouse.fetch_count(), 14);
    }

    #[tokio::test]
    async fn retrieval_failure_is_fatal_to_the_render() {
        let mut warehouse = fake_data();
        warehouse.fail_tax = true;
        let service = service(&warehouse, Duration::from_secs(3600));

        let result = service.snapshot().await;

        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn repeated_snapshots_are_identical() {
        let warehouse = fake_data();
        let service = service(&warehouse, Duration::ZERO);

        let first = serde_json::to_string(&service.snapshot().await.unwrap()).unwrap();
        let second = serde_json::to_string(&service.snapshot().await.unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
