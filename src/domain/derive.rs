//! Pure derivations from retrieved tables to chart-ready views.
//!
//! Every function here is deterministic and side-effect-free: identical
//! input slices produce identical output, which is what the test suite
//! leans on. Rows with unreported (`None`) figures are excluded from
//! aggregation, never treated as zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::record::{
    BeverageStatus, EmploymentStat, HempType, MarketMetric, ProductionRecord, RegulatoryStatus,
    TaxRevenue, TimelineEvent,
};
use super::view::{
    HeroMetric, HeroSummary, SeriesPoint, StateOrdinal, StateTaxRevenue, StatusCount, TimelineItem,
};

/// Primary production-value series: `hemp_type == all` rows, scaled to
/// millions of USD, ascending by year.
#[must_use]
pub fn production_value_series(rows: &[ProductionRecord]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .filter(|row| row.hemp_type == HempType::All)
        .map(|row| SeriesPoint {
            year: row.year,
            value: Decimal::from(row.production_value_usd) / dec!(1_000_000),
        })
        .collect();
    points.sort_by_key(|point| point.year);
    points
}

/// Named-metric trend series: exact `metric_name` match, scaled to billions,
/// ascending by year. An absent name yields an empty series, not an error.
#[must_use]
pub fn metric_series(rows: &[MarketMetric], metric_name: &str) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .filter(|row| row.metric_name == metric_name)
        .map(|row| SeriesPoint {
            year: row.year,
            value: row.value / dec!(1_000_000_000),
        })
        .collect();
    points.sort_by_key(|point| point.year);
    points
}

/// National employment series: `geography == "US"` rows with a reported job
/// count, scaled to thousands, ascending by year.
#[must_use]
pub fn national_employment_series(rows: &[EmploymentStat]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .filter(|row| row.geography == "US")
        .filter_map(|row| {
            row.total_jobs.map(|jobs| SeriesPoint {
                year: row.year,
                value: Decimal::from(jobs) / dec!(1_000),
            })
        })
        .collect();
    points.sort_by_key(|point| point.year);
    points
}

/// Top-N state tax ranking for a target (year, quarter).
///
/// National aggregate rows (`state == "US"`) are excluded. The sort is
/// stable and descending by revenue; ties keep their retrieval order since
/// no secondary key is defined.
#[must_use]
pub fn top_tax_states(
    rows: &[TaxRevenue],
    year: i32,
    quarter: i32,
    limit: usize,
) -> Vec<StateTaxRevenue> {
    let mut ranked: Vec<StateTaxRevenue> = rows
        .iter()
        .filter(|row| row.state != "US" && row.year == year && row.quarter == Some(quarter))
        .map(|row| StateTaxRevenue {
            state: row.state.clone(),
            tax_revenue_usd: row.tax_revenue_usd,
            pct_of_state_revenue: row.pct_of_state_revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.tax_revenue_usd.cmp(&a.tax_revenue_usd));
    ranked.truncate(limit);
    ranked
}

/// Status tally: group counts ordered by descending count, ties by first
/// appearance. The legend order is an observable contract.
#[must_use]
pub fn status_tally(rows: &[RegulatoryStatus]) -> Vec<StatusCount> {
    let mut tally: Vec<StatusCount> = Vec::new();
    for row in rows {
        match tally
            .iter_mut()
            .find(|entry| entry.status == row.thc_beverage_status)
        {
            Some(entry) => entry.count += 1,
            None => tally.push(StatusCount {
                status: row.thc_beverage_status.clone(),
                count: 1,
            }),
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}

/// Per-state choropleth ordinals, in retrieval order. Unmapped statuses
/// surface as `None` instead of defaulting to the "banned" end of the scale.
#[must_use]
pub fn state_ordinals(rows: &[RegulatoryStatus]) -> Vec<StateOrdinal> {
    rows.iter()
        .map(|row| StateOrdinal {
            state: row.state.clone(),
            ordinal: row.thc_beverage_status.ordinal(),
        })
        .collect()
}

/// Chronological timeline: ascending by event date, each entry tagged with
/// its render class (unrecognized impact falls back to neutral).
#[must_use]
pub fn timeline_items(rows: &[TimelineEvent]) -> Vec<TimelineItem> {
    let mut ordered: Vec<&TimelineEvent> = rows.iter().collect();
    ordered.sort_by_key(|event| event.event_date);
    ordered
        .into_iter()
        .map(|event| TimelineItem {
            event_date: event.event_date,
            event_type: event.event_type.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            class: event.impact.class(),
        })
        .collect()
}

/// Headline cards derived from the tables.
///
/// Growth figures prefer the reported value where the table carries one
/// (employment); otherwise they are computed year-over-year. A zero or
/// missing prior year yields no growth figure.
#[must_use]
pub fn hero_summary(
    production: &[ProductionRecord],
    employment: &[EmploymentStat],
    tax: &[TaxRevenue],
    regulatory: &[RegulatoryStatus],
) -> HeroSummary {
    let all_production: Vec<&ProductionRecord> = production
        .iter()
        .filter(|row| row.hemp_type == HempType::All)
        .collect();
    let latest_production = all_production.iter().max_by_key(|row| row.year);

    let production_value = latest_production.map(|latest| {
        let previous = all_production
            .iter()
            .find(|row| row.year == latest.year - 1)
            .map(|row| Decimal::from(row.production_value_usd));
        let value = Decimal::from(latest.production_value_usd);
        HeroMetric {
            year: latest.year,
            value,
            yoy_growth_pct: previous.and_then(|prev| yoy_pct(value, prev)),
        }
    });

    let planted_acres = latest_production.map(|latest| {
        let previous = all_production
            .iter()
            .find(|row| row.year == latest.year - 1)
            .map(|row| Decimal::from(row.planted_acres));
        let value = Decimal::from(latest.planted_acres);
        HeroMetric {
            year: latest.year,
            value,
            yoy_growth_pct: previous.and_then(|prev| yoy_pct(value, prev)),
        }
    });

    let national_jobs: Vec<&EmploymentStat> = employment
        .iter()
        .filter(|row| row.geography == "US" && row.total_jobs.is_some())
        .collect();
    let total_jobs = national_jobs.iter().max_by_key(|row| row.year).map(|latest| {
        let jobs = Decimal::from(latest.total_jobs.unwrap_or_default());
        let computed = national_jobs
            .iter()
            .find(|row| row.year == latest.year - 1)
            .and_then(|row| row.total_jobs)
            .and_then(|prev| yoy_pct(jobs, Decimal::from(prev)));
        HeroMetric {
            year: latest.year,
            value: jobs,
            yoy_growth_pct: latest.job_growth_pct.or(computed),
        }
    });

    let national_tax: Vec<&TaxRevenue> = tax.iter().filter(|row| row.state == "US").collect();
    let national_tax_revenue = national_tax.iter().max_by_key(|row| row.year).map(|latest| {
        let value = Decimal::from(latest.tax_revenue_usd);
        let previous = national_tax
            .iter()
            .find(|row| row.year == latest.year - 1)
            .map(|row| Decimal::from(row.tax_revenue_usd));
        HeroMetric {
            year: latest.year,
            value,
            yoy_growth_pct: previous.and_then(|prev| yoy_pct(value, prev)),
        }
    });

    let mut states_legal = 0;
    let mut states_restricted = 0;
    let mut states_banned = 0;
    for row in regulatory {
        match row.thc_beverage_status {
            BeverageStatus::Legal => states_legal += 1,
            BeverageStatus::LegalRestricted
            | BeverageStatus::DispensaryOnly
            | BeverageStatus::Pending => states_restricted += 1,
            BeverageStatus::Banned => states_banned += 1,
            BeverageStatus::Other(_) => {}
        }
    }

    HeroSummary {
        production_value,
        planted_acres,
        total_jobs,
        national_tax_revenue,
        states_legal,
        states_restricted,
        states_banned,
    }
}

fn yoy_pct(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some(((current - previous) / previous * dec!(100)).round_dp(1))
}
