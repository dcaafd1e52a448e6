//! Derived-view types consumed by the presentation layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::record::{BeverageStatus, EventImpact};

/// One point of a year-keyed series, value already scaled for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Decimal,
}

/// One entry of the state tax ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTaxRevenue {
    pub state: String,
    pub tax_revenue_usd: i64,
    pub pct_of_state_revenue: Option<Decimal>,
}

/// One group of the regulatory status tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: BeverageStatus,
    pub count: usize,
}

/// Per-state choropleth ordinal; `None` marks an unmapped status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateOrdinal {
    pub state: String,
    pub ordinal: Option<u8>,
}

/// Render class for a timeline event, keyed by impact.
///
/// Part of the external color contract: positive/negative get their own
/// treatment, everything else (including unrecognized impact labels) falls
/// back to neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactClass {
    Positive,
    Negative,
    Neutral,
}

impl EventImpact {
    /// Map an impact label to its render class, defaulting to neutral.
    #[must_use]
    pub fn class(&self) -> ImpactClass {
        match self {
            EventImpact::Positive => ImpactClass::Positive,
            EventImpact::Negative => ImpactClass::Negative,
            EventImpact::Neutral | EventImpact::Other(_) => ImpactClass::Neutral,
        }
    }
}

/// One timeline entry, chronological, tagged with its render class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineItem {
    pub event_date: NaiveDate,
    pub event_type: String,
    pub title: String,
    pub description: String,
    pub class: ImpactClass,
}

/// A headline card figure with optional year-over-year growth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroMetric {
    pub year: i32,
    pub value: Decimal,
    pub yoy_growth_pct: Option<Decimal>,
}

/// Headline cards for the overview section. Every figure is optional;
/// missing data renders as "not reported".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeroSummary {
    pub production_value: Option<HeroMetric>,
    pub planted_acres: Option<HeroMetric>,
    pub total_jobs: Option<HeroMetric>,
    pub national_tax_revenue: Option<HeroMetric>,
    pub states_legal: usize,
    pub states_restricted: usize,
    pub states_banned: usize,
}
