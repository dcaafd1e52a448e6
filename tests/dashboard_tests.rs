//! End-to-end dashboard tests: seed → warehouse → snapshot.

use std::time::Duration;

use rust_decimal_macros::dec;

use hempboard::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use hempboard::adapter::outbound::sqlite::SqliteWarehouse;
use hempboard::application::cache::DashboardCache;
use hempboard::application::dashboard::DashboardService;
use hempboard::application::loader::{Loader, RefreshMode};
use hempboard::application::seed::SeedCatalog;
use hempboard::config::DashboardConfig;
use hempboard::domain::{BeverageStatus, Table};
use hempboard::port::outbound::store::Warehouse;

async fn loaded_pool() -> DbPool {
    let pool = create_pool(":memory:").unwrap();
    run_migrations(&pool).unwrap();
    let catalog =
        SeedCatalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.toml")).unwrap();
    Loader::new(SqliteWarehouse::new(pool.clone()), RefreshMode::Replace)
        .run(&catalog)
        .await
        .unwrap();
    pool
}

fn service(pool: DbPool, ttl: Duration) -> DashboardService<SqliteWarehouse> {
    DashboardService::new(
        SqliteWarehouse::new(pool),
        DashboardConfig::default(),
        DashboardCache::with_ttl(ttl),
    )
}

#[tokio::test]
async fn production_series_matches_the_national_figures() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    assert_eq!(snapshot.production_series.len(), 2);
    assert_eq!(snapshot.production_series[0].year, 2023);
    assert_eq!(snapshot.production_series[0].value, dec!(285));
    assert_eq!(snapshot.production_series[1].year, 2024);
    assert_eq!(snapshot.production_series[1].value, dec!(445));
}

#[tokio::test]
async fn market_series_tracks_the_configured_metric_in_billions() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    let years: Vec<i32> = snapshot.market_series.iter().map(|p| p.year).collect();
    assert_eq!(years, [2023, 2024, 2030]);
    assert_eq!(snapshot.market_series[0].value, dec!(1.63));
    assert_eq!(snapshot.market_series[1].value, dec!(1.96));
    assert_eq!(snapshot.market_series[2].value, dec!(7.8));
}

#[tokio::test]
async fn employment_series_is_national_only_in_thousands() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    assert_eq!(snapshot.employment_series.len(), 2);
    assert_eq!(snapshot.employment_series[0].value, dec!(417.493));
    assert_eq!(snapshot.employment_series[1].value, dec!(440.445));
}

#[tokio::test]
async fn top_tax_states_rank_matches_the_census_quarter() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    let states: Vec<&str> = snapshot
        .top_tax_states
        .iter()
        .map(|r| r.state.as_str())
        .collect();
    assert_eq!(states, ["CA", "WA", "MI", "IL", "AZ", "MA", "CO", "NV"]);
    assert_eq!(snapshot.top_tax_states[0].tax_revenue_usd, 161_000_000);
    // Every included state out-earns the excluded ones (OR at 35M, AK at 7M).
    assert!(snapshot
        .top_tax_states
        .iter()
        .all(|r| r.tax_revenue_usd >= 45_000_000));
}

#[tokio::test]
async fn status_tally_orders_the_legend_by_count() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    let legend: Vec<(String, usize)> = snapshot
        .status_tally
        .iter()
        .map(|entry| (entry.status.to_string(), entry.count))
        .collect();
    assert_eq!(
        legend,
        [
            ("legal".to_string(), 35),
            ("legal_restricted".to_string(), 8),
            ("banned".to_string(), 5),
            ("pending".to_string(), 2),
            ("dispensary_only".to_string(), 1),
        ]
    );

    let total: usize = snapshot.status_tally.iter().map(|e| e.count).sum();
    assert_eq!(total, 51);
}

#[tokio::test]
async fn state_ordinals_cover_every_state_with_known_values() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    assert_eq!(snapshot.state_ordinals.len(), 51);
    assert!(snapshot.state_ordinals.iter().all(|s| s.ordinal.is_some()));

    let alabama = snapshot
        .state_ordinals
        .iter()
        .find(|s| s.state == "AL")
        .unwrap();
    assert_eq!(alabama.ordinal, Some(0));
    let alaska = snapshot
        .state_ordinals
        .iter()
        .find(|s| s.state == "AK")
        .unwrap();
    assert_eq!(alaska.ordinal, Some(4));
}

#[tokio::test]
async fn timeline_is_chronological_with_render_classes() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    assert_eq!(snapshot.timeline.len(), 10);
    assert!(snapshot
        .timeline
        .windows(2)
        .all(|w| w[0].event_date <= w[1].event_date));
    assert_eq!(snapshot.timeline[0].title, "2018 Farm Bill Signed");
}

#[tokio::test]
async fn hero_cards_summarize_the_latest_year() {
    let service = service(loaded_pool().await, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    let production = snapshot.hero.production_value.unwrap();
    assert_eq!(production.year, 2024);
    assert_eq!(production.value, dec!(445_000_000));
    assert_eq!(production.yoy_growth_pct, Some(dec!(56.1)));

    let acres = snapshot.hero.planted_acres.unwrap();
    assert_eq!(acres.value, dec!(45_294));
    assert_eq!(acres.yoy_growth_pct, Some(dec!(64.0)));

    let jobs = snapshot.hero.total_jobs.unwrap();
    assert_eq!(jobs.value, dec!(440_445));
    // The reported growth figure wins over the computed one.
    assert_eq!(jobs.yoy_growth_pct, Some(dec!(5.4)));

    let tax = snapshot.hero.national_tax_revenue.unwrap();
    assert_eq!(tax.year, 2024);
    assert_eq!(tax.value, dec!(4_400_000_000));
    assert_eq!(tax.yoy_growth_pct, Some(dec!(7.3)));

    assert_eq!(snapshot.hero.states_legal, 35);
    assert_eq!(snapshot.hero.states_restricted, 11);
    assert_eq!(snapshot.hero.states_banned, 5);
}

#[tokio::test]
async fn cached_render_survives_a_table_truncation() {
    let pool = loaded_pool().await;
    let service = service(pool.clone(), Duration::from_secs(3600));

    let first = service.snapshot().await.unwrap();
    assert_eq!(first.production_series.len(), 2);

    // Wipe the table behind the cache's back.
    SqliteWarehouse::new(pool.clone())
        .truncate(Table::Production)
        .await
        .unwrap();

    // Within the TTL the render reuses the cached retrieval.
    let second = service.snapshot().await.unwrap();
    assert_eq!(second.production_series.len(), 2);

    // A cache-less service sees the truncation immediately.
    let uncached = service_no_cache(pool);
    let third = uncached.snapshot().await.unwrap();
    assert!(third.production_series.is_empty());
}

fn service_no_cache(pool: DbPool) -> DashboardService<SqliteWarehouse> {
    DashboardService::new(
        SqliteWarehouse::new(pool),
        DashboardConfig::default(),
        DashboardCache::disabled(),
    )
}

#[tokio::test]
async fn empty_warehouse_renders_empty_views_not_errors() {
    let pool = create_pool(":memory:").unwrap();
    run_migrations(&pool).unwrap();
    let service = service(pool, Duration::ZERO);

    let snapshot = service.snapshot().await.unwrap();

    assert!(snapshot.production_series.is_empty());
    assert!(snapshot.status_tally.is_empty());
    assert!(snapshot.timeline.is_empty());
    assert!(snapshot.hero.production_value.is_none());
}

#[tokio::test]
async fn unknown_status_label_degrades_to_a_sentinel() {
    let pool = loaded_pool().await;

    // Simulate a data-quality drift: a label outside the known enum set.
    {
        use diesel::prelude::*;
        let mut conn = pool.get().unwrap();
        diesel::sql_query(
            "UPDATE regulatory_status SET thc_beverage_status = 'decriminalized' WHERE state = 'WY'",
        )
        .execute(&mut conn)
        .unwrap();
    }

    let service = service_no_cache(pool);
    let snapshot = service.snapshot().await.unwrap();

    let wyoming = snapshot
        .state_ordinals
        .iter()
        .find(|s| s.state == "WY")
        .unwrap();
    assert_eq!(wyoming.ordinal, None, "unknown status must not read as banned");

    assert!(snapshot
        .status_tally
        .iter()
        .any(|e| e.status == BeverageStatus::Other("decriminalized".into()) && e.count == 1));
}
