//! Record types for the seven warehouse tables.
//!
//! Each record mirrors one storage row with named, typed fields. Label
//! columns are closed enums with an `Other` escape variant so a row holding
//! an unrecognized label still round-trips through retrieval instead of
//! failing it; constructing an `Other` value logs a data-quality warning.
//! Optional numeric fields mean "not reported", never zero.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identifier for one of the seven warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Production,
    Market,
    Employment,
    Regulatory,
    Tax,
    Trends,
    Timeline,
}

impl Table {
    /// All tables in catalog order.
    pub const ALL: [Table; 7] = [
        Table::Production,
        Table::Market,
        Table::Employment,
        Table::Regulatory,
        Table::Tax,
        Table::Trends,
        Table::Timeline,
    ];

    /// The storage-side table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Table::Production => "production_by_state",
            Table::Market => "market_metrics",
            Table::Employment => "employment_stats",
            Table::Regulatory => "regulatory_status",
            Table::Tax => "tax_revenue",
            Table::Trends => "consumer_trends",
            Table::Timeline => "industry_timeline",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hemp production category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HempType {
    All,
    Floral,
    Grain,
    Other(String),
}

impl HempType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            HempType::All => "all",
            HempType::Floral => "floral",
            HempType::Grain => "grain",
            HempType::Other(label) => label,
        }
    }
}

impl From<String> for HempType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "all" => HempType::All,
            "floral" => HempType::Floral,
            "grain" => HempType::Grain,
            _ => {
                warn!(label = %value, "unrecognized hemp_type label");
                HempType::Other(value)
            }
        }
    }
}

impl From<HempType> for String {
    fn from(value: HempType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for HempType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market metric category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricCategory {
    MarketSize,
    Projection,
    GrowthRate,
    Other(String),
}

impl MetricCategory {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MetricCategory::MarketSize => "market_size",
            MetricCategory::Projection => "projection",
            MetricCategory::GrowthRate => "growth_rate",
            MetricCategory::Other(label) => label,
        }
    }
}

impl From<String> for MetricCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "market_size" => MetricCategory::MarketSize,
            "projection" => MetricCategory::Projection,
            "growth_rate" => MetricCategory::GrowthRate,
            _ => {
                warn!(label = %value, "unrecognized metric category label");
                MetricCategory::Other(value)
            }
        }
    }
}

impl From<MetricCategory> for String {
    fn from(value: MetricCategory) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-state THC beverage regulatory status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BeverageStatus {
    Legal,
    LegalRestricted,
    Pending,
    DispensaryOnly,
    Banned,
    Other(String),
}

impl BeverageStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            BeverageStatus::Legal => "legal",
            BeverageStatus::LegalRestricted => "legal_restricted",
            BeverageStatus::Pending => "pending",
            BeverageStatus::DispensaryOnly => "dispensary_only",
            BeverageStatus::Banned => "banned",
            BeverageStatus::Other(label) => label,
        }
    }

    /// Fixed severity ordinal driving the choropleth color gradient.
    ///
    /// banned=0, dispensary_only=1, pending=2, legal_restricted=3, legal=4.
    /// Unrecognized labels map to `None` rather than 0 so an unmapped state
    /// is never painted as "banned".
    #[must_use]
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            BeverageStatus::Banned => Some(0),
            BeverageStatus::DispensaryOnly => Some(1),
            BeverageStatus::Pending => Some(2),
            BeverageStatus::LegalRestricted => Some(3),
            BeverageStatus::Legal => Some(4),
            BeverageStatus::Other(_) => None,
        }
    }
}

impl From<String> for BeverageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "legal" => BeverageStatus::Legal,
            "legal_restricted" => BeverageStatus::LegalRestricted,
            "pending" => BeverageStatus::Pending,
            "dispensary_only" => BeverageStatus::DispensaryOnly,
            "banned" => BeverageStatus::Banned,
            _ => {
                warn!(label = %value, "unrecognized thc_beverage_status label");
                BeverageStatus::Other(value)
            }
        }
    }
}

impl From<BeverageStatus> for String {
    fn from(value: BeverageStatus) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for BeverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeline event impact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventImpact {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl EventImpact {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EventImpact::Positive => "positive",
            EventImpact::Negative => "negative",
            EventImpact::Neutral => "neutral",
            EventImpact::Other(label) => label,
        }
    }
}

impl From<String> for EventImpact {
    fn from(value: String) -> Self {
        match value.as_str() {
            "positive" => EventImpact::Positive,
            "negative" => EventImpact::Negative,
            "neutral" => EventImpact::Neutral,
            _ => {
                warn!(label = %value, "unrecognized impact label");
                EventImpact::Other(value)
            }
        }
    }
}

impl From<EventImpact> for String {
    fn from(value: EventImpact) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for EventImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// National/state hemp production figures, one row per (year, hemp_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub state: String,
    pub year: i32,
    pub planted_acres: i64,
    pub harvested_acres: i64,
    pub production_value_usd: i64,
    pub hemp_type: HempType,
    pub source: String,
}

/// Heterogeneous market metric keyed by free-text name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetric {
    pub metric_name: String,
    pub year: i32,
    pub value: Decimal,
    pub unit: String,
    pub category: MetricCategory,
    pub source: String,
    pub notes: Option<String>,
}

/// Employment statistics; absent figures mean "not reported", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentStat {
    pub geography: String,
    pub year: i32,
    pub total_jobs: Option<i64>,
    pub job_growth_pct: Option<Decimal>,
    pub total_wages_usd: Option<i64>,
    pub sector: String,
    pub source: String,
}

/// One regulatory status row per state; `state` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryStatus {
    pub state: String,
    pub thc_beverage_status: BeverageStatus,
    pub max_thc_mg_per_serving: Option<Decimal>,
    pub max_thc_mg_per_package: Option<Decimal>,
    pub age_restriction: Option<i32>,
    pub notes: Option<String>,
    pub source: String,
}

/// Cannabis tax revenue; `state == "US"` rows are national aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRevenue {
    pub state: String,
    pub year: i32,
    pub quarter: Option<i32>,
    pub tax_revenue_usd: i64,
    pub pct_of_state_revenue: Option<Decimal>,
    pub source: String,
}

/// Consumer trend metric, same free-text catalog pattern as [`MarketMetric`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerTrend {
    pub metric_name: String,
    pub year: i32,
    pub value: Decimal,
    pub unit: String,
    pub demographic: String,
    pub source: String,
}

/// Industry timeline event; chronological ordering is a display contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub event_date: NaiveDate,
    pub event_type: String,
    pub title: String,
    pub description: String,
    pub impact: EventImpact,
    pub source: String,
}
