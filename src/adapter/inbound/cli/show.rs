//! The `show` command: render the dashboard or a single section.
//!
//! The rendering layer is a thin consumer of the dashboard snapshot; all
//! filtering/grouping/scaling already happened in the derivations.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tabled::{Table as TextTable, Tabled};

use super::command::{Section, ShowArgs};
use super::output;
use crate::adapter::outbound::sqlite::SqliteWarehouse;
use crate::application::cache::DashboardCache;
use crate::application::dashboard::{DashboardService, DashboardSnapshot};
use crate::config::Config;
use crate::domain::{HeroMetric, ImpactClass};
use crate::error::Result;

pub async fn run(args: &ShowArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    config.init_logging();

    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let db_path = super::resolve_database(&config, args.db.as_deref());
    let pool = super::open_warehouse_pool(&db_path)?;

    let ttl = if args.no_cache {
        Duration::ZERO
    } else {
        Duration::from_secs(config.cache.ttl_secs)
    };
    let metric_name = config.dashboard.market_metric.clone();
    let service = DashboardService::new(
        SqliteWarehouse::new(pool),
        config.dashboard.clone(),
        DashboardCache::with_ttl(ttl),
    );

    // A failed retrieval aborts the whole render; no partial dashboards.
    let snapshot = service.snapshot().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "show",
            "section": format!("{:?}", args.section).to_lowercase(),
            "data": section_json(&snapshot, args.section)?,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    match args.section {
        Section::All => {
            overview(&snapshot);
            production(&snapshot);
            market(&snapshot, &metric_name);
            employment(&snapshot);
            regulatory(&snapshot);
            tax(&snapshot);
            trends(&snapshot);
            timeline(&snapshot);
        }
        Section::Overview => overview(&snapshot),
        Section::Production => production(&snapshot),
        Section::Market => market(&snapshot, &metric_name),
        Section::Employment => employment(&snapshot),
        Section::Regulatory => regulatory(&snapshot),
        Section::Tax => tax(&snapshot),
        Section::Trends => trends(&snapshot),
        Section::Timeline => timeline(&snapshot),
    }
    Ok(())
}

fn section_json(snapshot: &DashboardSnapshot, section: Section) -> Result<serde_json::Value> {
    let value = match section {
        Section::All => serde_json::to_value(snapshot)?,
        Section::Overview => serde_json::to_value(&snapshot.hero)?,
        Section::Production => serde_json::to_value(&snapshot.production_series)?,
        Section::Market => serde_json::to_value(&snapshot.market_series)?,
        Section::Employment => serde_json::to_value(&snapshot.employment_series)?,
        Section::Regulatory => json!({
            "tally": serde_json::to_value(&snapshot.status_tally)?,
            "state_ordinals": serde_json::to_value(&snapshot.state_ordinals)?,
        }),
        Section::Tax => serde_json::to_value(&snapshot.top_tax_states)?,
        Section::Trends => serde_json::to_value(&snapshot.trends)?,
        Section::Timeline => serde_json::to_value(&snapshot.timeline)?,
    };
    Ok(value)
}

const EMPTY_HINT: &str = "no data; run `hempboard load` first";

fn overview(snapshot: &DashboardSnapshot) {
    output::section("Overview");
    output::field(
        "production value",
        hero_line(&snapshot.hero.production_value, fmt_usd),
    );
    output::field(
        "planted acres",
        hero_line(&snapshot.hero.planted_acres, fmt_count),
    );
    output::field("jobs", hero_line(&snapshot.hero.total_jobs, fmt_count));
    output::field(
        "state tax revenue",
        hero_line(&snapshot.hero.national_tax_revenue, fmt_usd),
    );
    output::field(
        "beverage status",
        format!(
            "{} legal · {} restricted · {} banned",
            snapshot.hero.states_legal,
            snapshot.hero.states_restricted,
            snapshot.hero.states_banned
        ),
    );
}

#[derive(Tabled)]
struct ProductionRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value ($M)")]
    value: String,
}

fn production(snapshot: &DashboardSnapshot) {
    output::section("Production value (hemp, all types)");
    if snapshot.production_series.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<ProductionRow> = snapshot
        .production_series
        .iter()
        .map(|point| ProductionRow {
            year: point.year,
            value: point.value.round_dp(1).to_string(),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value ($B)")]
    value: String,
}

fn market(snapshot: &DashboardSnapshot, metric_name: &str) {
    output::section(&format!("Market size: {metric_name}"));
    if snapshot.market_series.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<MarketRow> = snapshot
        .market_series
        .iter()
        .map(|point| MarketRow {
            year: point.year,
            value: point.value.round_dp(2).to_string(),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

#[derive(Tabled)]
struct EmploymentRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Jobs (thousands)")]
    jobs: String,
}

fn employment(snapshot: &DashboardSnapshot) {
    output::section("National cannabis employment");
    if snapshot.employment_series.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<EmploymentRow> = snapshot
        .employment_series
        .iter()
        .map(|point| EmploymentRow {
            year: point.year,
            jobs: point.value.round_dp(1).to_string(),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

#[derive(Tabled)]
struct TallyRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "States")]
    states: usize,
}

#[derive(Tabled)]
struct OrdinalRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Ordinal")]
    ordinal: String,
}

fn regulatory(snapshot: &DashboardSnapshot) {
    output::section("THC beverage status");
    if snapshot.status_tally.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<TallyRow> = snapshot
        .status_tally
        .iter()
        .map(|entry| TallyRow {
            status: entry.status.to_string(),
            states: entry.count,
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());

    output::section("Choropleth ordinals (banned=0 … legal=4)");
    let rows: Vec<OrdinalRow> = snapshot
        .state_ordinals
        .iter()
        .map(|entry| OrdinalRow {
            state: entry.state.clone(),
            ordinal: entry
                .ordinal
                .map_or_else(|| "–".to_string(), |o| o.to_string()),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

#[derive(Tabled)]
struct TaxRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Revenue ($M)")]
    revenue: String,
    #[tabled(rename = "% of state revenue")]
    share: String,
}

fn tax(snapshot: &DashboardSnapshot) {
    output::section("State cannabis tax revenue (top states)");
    if snapshot.top_tax_states.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<TaxRow> = snapshot
        .top_tax_states
        .iter()
        .enumerate()
        .map(|(i, entry)| TaxRow {
            rank: i + 1,
            state: entry.state.clone(),
            revenue: (Decimal::from(entry.tax_revenue_usd) / dec!(1_000_000))
                .round_dp(1)
                .to_string(),
            share: entry
                .pct_of_state_revenue
                .map_or_else(|| "–".to_string(), |pct| format!("{pct}%")),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Demographic")]
    demographic: String,
}

fn trends(snapshot: &DashboardSnapshot) {
    output::section("Consumer trends");
    if snapshot.trends.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    let rows: Vec<TrendRow> = snapshot
        .trends
        .iter()
        .map(|trend| TrendRow {
            metric: trend.metric_name.clone(),
            year: trend.year,
            value: format!("{} {}", trend.value, trend.unit),
            demographic: trend.demographic.clone(),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
}

fn timeline(snapshot: &DashboardSnapshot) {
    output::section("Industry timeline");
    if snapshot.timeline.is_empty() {
        output::note(EMPTY_HINT);
        return;
    }
    for item in &snapshot.timeline {
        let title = match item.class {
            ImpactClass::Positive => output::positive(&item.title),
            ImpactClass::Negative => output::negative(&item.title),
            ImpactClass::Neutral => output::muted(&item.title),
        };
        output::lines(&format!(
            "{}  {:<12} {}  {}",
            item.event_date, item.event_type, title, item.description
        ));
    }
}

fn hero_line(metric: &Option<HeroMetric>, fmt: fn(Decimal) -> String) -> String {
    match metric {
        None => "not reported".to_string(),
        Some(metric) => {
            let mut line = format!("{} ({})", fmt(metric.value), metric.year);
            if let Some(growth) = metric.yoy_growth_pct {
                let label = if growth.is_sign_negative() {
                    output::negative(format!("{growth}% YoY"))
                } else {
                    output::positive(format!("+{growth}% YoY"))
                };
                line.push_str(&format!("  {label}"));
            }
            line
        }
    }
}

fn fmt_usd(value: Decimal) -> String {
    if value.abs() >= dec!(1_000_000_000) {
        format!("${}B", (value / dec!(1_000_000_000)).round_dp(1))
    } else if value.abs() >= dec!(1_000_000) {
        format!("${}M", (value / dec!(1_000_000)).round_dp(1))
    } else {
        format!("${value}")
    }
}

fn fmt_count(value: Decimal) -> String {
    value.round_dp(1).to_string()
}
