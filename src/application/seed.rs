//! Seed catalog: the versioned data file behind the loader.
//!
//! The catalog is a TOML file of named-field records (see `data/seed.toml`),
//! one array of tables per record set, deserialized straight into the domain
//! types. Parsing applies the only transformation the loader performs: type
//! coercion into typed fields.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    ConsumerTrend, EmploymentStat, MarketMetric, ProductionRecord, RegulatoryStatus, Table,
    TaxRevenue, TimelineEvent,
};
use crate::error::{Result, SeedError};

/// The seven record sets of one data refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    /// Catalog format version, bumped on breaking data-shape changes.
    pub schema_version: u32,
    #[serde(default)]
    pub production: Vec<ProductionRecord>,
    #[serde(default)]
    pub market: Vec<MarketMetric>,
    #[serde(default)]
    pub employment: Vec<EmploymentStat>,
    #[serde(default)]
    pub regulatory: Vec<RegulatoryStatus>,
    #[serde(default)]
    pub tax: Vec<TaxRevenue>,
    #[serde(default)]
    pub trends: Vec<ConsumerTrend>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl SeedCatalog {
    /// Load and parse a seed catalog from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = toml::from_str(&content).map_err(|source| SeedError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(catalog)
    }

    /// Record count for one table.
    #[must_use]
    pub fn len(&self, table: Table) -> usize {
        match table {
            Table::Production => self.production.len(),
            Table::Market => self.market.len(),
            Table::Employment => self.employment.len(),
            Table::Regulatory => self.regulatory.len(),
            Table::Tax => self.tax.len(),
            Table::Trends => self.trends.len(),
            Table::Timeline => self.timeline.len(),
        }
    }

    /// Total record count across all tables.
    #[must_use]
    pub fn total(&self) -> usize {
        Table::ALL.iter().map(|table| self.len(*table)).sum()
    }
}
