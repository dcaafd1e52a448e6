//! Warehouse-agnostic domain logic: record types, derived views, and the
//! pure derivation functions behind each dashboard section.

mod record;
mod view;

pub mod derive;

// Record types and label enums
pub use record::{
    BeverageStatus, ConsumerTrend, EmploymentStat, EventImpact, HempType, MarketMetric,
    MetricCategory, ProductionRecord, RegulatoryStatus, Table, TaxRevenue, TimelineEvent,
};

// Derived-view types
pub use view::{
    HeroMetric, HeroSummary, ImpactClass, SeriesPoint, StateOrdinal, StateTaxRevenue, StatusCount,
    TimelineItem,
};
