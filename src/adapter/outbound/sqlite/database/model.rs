//! Database row types for Diesel ORM, plus domain conversions.
//!
//! Numeric magnitudes with display scaling are stored as floats and carried
//! as `Decimal` in the domain; label enums are stored as their text labels;
//! dates are stored as ISO-8601 text so `ORDER BY` is chronological.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::schema::{
    consumer_trends, employment_stats, industry_timeline, market_metrics, production_by_state,
    regulatory_status, tax_revenue,
};
use crate::domain::{
    BeverageStatus, ConsumerTrend, EmploymentStat, EventImpact, HempType, MarketMetric,
    MetricCategory, ProductionRecord, RegulatoryStatus, TaxRevenue, TimelineEvent,
};
use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn decimal_to_column(value: Decimal, column: &'static str) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::Parse(format!("cannot store {column} value {value} as a float")))
}

fn opt_decimal_to_column(value: Option<Decimal>, column: &'static str) -> Result<Option<f64>> {
    value.map(|v| decimal_to_column(v, column)).transpose()
}

fn decimal_from_column(value: f64, column: &'static str) -> Result<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| Error::Parse(format!("non-finite {column} value {value}")))
}

fn opt_decimal_from_column(value: Option<f64>, column: &'static str) -> Result<Option<Decimal>> {
    value.map(|v| decimal_from_column(v, column)).transpose()
}

/// Database row for a production record (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = production_by_state)]
pub struct NewProductionRow {
    pub state: String,
    pub year: i32,
    pub planted_acres: i64,
    pub harvested_acres: i64,
    pub production_value_usd: i64,
    pub hemp_type: String,
    pub source: String,
}

impl NewProductionRow {
    pub fn from_domain(record: &ProductionRecord) -> Result<Self> {
        Ok(Self {
            state: record.state.clone(),
            year: record.year,
            planted_acres: record.planted_acres,
            harvested_acres: record.harvested_acres,
            production_value_usd: record.production_value_usd,
            hemp_type: record.hemp_type.as_str().to_owned(),
            source: record.source.clone(),
        })
    }
}

/// Database row for a production record (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = production_by_state)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductionRow {
    pub id: Option<i32>,
    pub state: String,
    pub year: i32,
    pub planted_acres: i64,
    pub harvested_acres: i64,
    pub production_value_usd: i64,
    pub hemp_type: String,
    pub source: String,
}

impl ProductionRow {
    pub fn into_domain(self) -> Result<ProductionRecord> {
        Ok(ProductionRecord {
            state: self.state,
            year: self.year,
            planted_acres: self.planted_acres,
            harvested_acres: self.harvested_acres,
            production_value_usd: self.production_value_usd,
            hemp_type: HempType::from(self.hemp_type),
            source: self.source,
        })
    }
}

/// Database row for a market metric (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = market_metrics)]
pub struct NewMarketRow {
    pub metric_name: String,
    pub year: i32,
    pub value: f64,
    pub unit: String,
    pub category: String,
    pub source: String,
    pub notes: Option<String>,
}

impl NewMarketRow {
    pub fn from_domain(record: &MarketMetric) -> Result<Self> {
        Ok(Self {
            metric_name: record.metric_name.clone(),
            year: record.year,
            value: decimal_to_column(record.value, "value")?,
            unit: record.unit.clone(),
            category: record.category.as_str().to_owned(),
            source: record.source.clone(),
            notes: record.notes.clone(),
        })
    }
}

/// Database row for a market metric (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = market_metrics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketRow {
    pub id: Option<i32>,
    pub metric_name: String,
    pub year: i32,
    pub value: f64,
    pub unit: String,
    pub category: String,
    pub source: String,
    pub notes: Option<String>,
}

impl MarketRow {
    pub fn into_domain(self) -> Result<MarketMetric> {
        Ok(MarketMetric {
            metric_name: self.metric_name,
            year: self.year,
            value: decimal_from_column(self.value, "value")?,
            unit: self.unit,
            category: MetricCategory::from(self.category),
            source: self.source,
            notes: self.notes,
        })
    }
}

/// Database row for an employment stat (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = employment_stats)]
pub struct NewEmploymentRow {
    pub geography: String,
    pub year: i32,
    pub total_jobs: Option<i64>,
    pub job_growth_pct: Option<f64>,
    pub total_wages_usd: Option<i64>,
    pub sector: String,
    pub source: String,
}

impl NewEmploymentRow {
    pub fn from_domain(record: &EmploymentStat) -> Result<Self> {
        Ok(Self {
            geography: record.geography.clone(),
            year: record.year,
            total_jobs: record.total_jobs,
            job_growth_pct: opt_decimal_to_column(record.job_growth_pct, "job_growth_pct")?,
            total_wages_usd: record.total_wages_usd,
            sector: record.sector.clone(),
            source: record.source.clone(),
        })
    }
}

/// Database row for an employment stat (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = employment_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmploymentRow {
    pub id: Option<i32>,
    pub geography: String,
    pub year: i32,
    pub total_jobs: Option<i64>,
    pub job_growth_pct: Option<f64>,
    pub total_wages_usd: Option<i64>,
    pub sector: String,
    pub source: String,
}

impl EmploymentRow {
    pub fn into_domain(self) -> Result<EmploymentStat> {
        Ok(EmploymentStat {
            geography: self.geography,
            year: self.year,
            total_jobs: self.total_jobs,
            job_growth_pct: opt_decimal_from_column(self.job_growth_pct, "job_growth_pct")?,
            total_wages_usd: self.total_wages_usd,
            sector: self.sector,
            source: self.source,
        })
    }
}

/// Database row for a regulatory status; `state` is the primary key, which
/// is what enforces the one-row-per-state invariant.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = regulatory_status)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RegulatoryRow {
    pub state: String,
    pub thc_beverage_status: String,
    pub max_thc_mg_per_serving: Option<f64>,
    pub max_thc_mg_per_package: Option<f64>,
    pub age_restriction: Option<i32>,
    pub notes: Option<String>,
    pub source: String,
}

impl RegulatoryRow {
    pub fn from_domain(record: &RegulatoryStatus) -> Result<Self> {
        Ok(Self {
            state: record.state.clone(),
            thc_beverage_status: record.thc_beverage_status.as_str().to_owned(),
            max_thc_mg_per_serving: opt_decimal_to_column(
                record.max_thc_mg_per_serving,
                "max_thc_mg_per_serving",
            )?,
            max_thc_mg_per_package: opt_decimal_to_column(
                record.max_thc_mg_per_package,
                "max_thc_mg_per_package",
            )?,
            age_restriction: record.age_restriction,
            notes: record.notes.clone(),
            source: record.source.clone(),
        })
    }

    pub fn into_domain(self) -> Result<RegulatoryStatus> {
        Ok(RegulatoryStatus {
            state: self.state,
            thc_beverage_status: BeverageStatus::from(self.thc_beverage_status),
            max_thc_mg_per_serving: opt_decimal_from_column(
                self.max_thc_mg_per_serving,
                "max_thc_mg_per_serving",
            )?,
            max_thc_mg_per_package: opt_decimal_from_column(
                self.max_thc_mg_per_package,
                "max_thc_mg_per_package",
            )?,
            age_restriction: self.age_restriction,
            notes: self.notes,
            source: self.source,
        })
    }
}

/// Database row for a tax revenue record (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tax_revenue)]
pub struct NewTaxRow {
    pub state: String,
    pub year: i32,
    pub quarter: Option<i32>,
    pub tax_revenue_usd: i64,
    pub pct_of_state_revenue: Option<f64>,
    pub source: String,
}

impl NewTaxRow {
    pub fn from_domain(record: &TaxRevenue) -> Result<Self> {
        Ok(Self {
            state: record.state.clone(),
            year: record.year,
            quarter: record.quarter,
            tax_revenue_usd: record.tax_revenue_usd,
            pct_of_state_revenue: opt_decimal_to_column(
                record.pct_of_state_revenue,
                "pct_of_state_revenue",
            )?,
            source: record.source.clone(),
        })
    }
}

/// Database row for a tax revenue record (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = tax_revenue)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaxRow {
    pub id: Option<i32>,
    pub state: String,
    pub year: i32,
    pub quarter: Option<i32>,
    pub tax_revenue_usd: i64,
    pub pct_of_state_revenue: Option<f64>,
    pub source: String,
}

impl TaxRow {
    pub fn into_domain(self) -> Result<TaxRevenue> {
        Ok(TaxRevenue {
            state: self.state,
            year: self.year,
            quarter: self.quarter,
            tax_revenue_usd: self.tax_revenue_usd,
            pct_of_state_revenue: opt_decimal_from_column(
                self.pct_of_state_revenue,
                "pct_of_state_revenue",
            )?,
            source: self.source,
        })
    }
}

/// Database row for a consumer trend (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = consumer_trends)]
pub struct NewTrendRow {
    pub metric_name: String,
    pub year: i32,
    pub value: f64,
    pub unit: String,
    pub demographic: String,
    pub source: String,
}

impl NewTrendRow {
    pub fn from_domain(record: &ConsumerTrend) -> Result<Self> {
        Ok(Self {
            metric_name: record.metric_name.clone(),
            year: record.year,
            value: decimal_to_column(record.value, "value")?,
            unit: record.unit.clone(),
            demographic: record.demographic.clone(),
            source: record.source.clone(),
        })
    }
}

/// Database row for a consumer trend (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = consumer_trends)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrendRow {
    pub id: Option<i32>,
    pub metric_name: String,
    pub year: i32,
    pub value: f64,
    pub unit: String,
    pub demographic: String,
    pub source: String,
}

impl TrendRow {
    pub fn into_domain(self) -> Result<ConsumerTrend> {
        Ok(ConsumerTrend {
            metric_name: self.metric_name,
            year: self.year,
            value: decimal_from_column(self.value, "value")?,
            unit: self.unit,
            demographic: self.demographic,
            source: self.source,
        })
    }
}

/// Database row for a timeline event (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = industry_timeline)]
pub struct NewTimelineRow {
    pub event_date: String,
    pub event_type: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub source: String,
}

impl NewTimelineRow {
    pub fn from_domain(record: &TimelineEvent) -> Result<Self> {
        Ok(Self {
            event_date: record.event_date.format(DATE_FORMAT).to_string(),
            event_type: record.event_type.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            impact: record.impact.as_str().to_owned(),
            source: record.source.clone(),
        })
    }
}

/// Database row for a timeline event (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = industry_timeline)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimelineRow {
    pub id: Option<i32>,
    pub event_date: String,
    pub event_type: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub source: String,
}

impl TimelineRow {
    pub fn into_domain(self) -> Result<TimelineEvent> {
        let event_date = NaiveDate::parse_from_str(&self.event_date, DATE_FORMAT)
            .map_err(|e| Error::Parse(format!("bad event_date '{}': {e}", self.event_date)))?;
        Ok(TimelineEvent {
            event_date,
            event_type: self.event_type,
            title: self.title,
            description: self.description,
            impact: EventImpact::from(self.impact),
            source: self.source,
        })
    }
}
