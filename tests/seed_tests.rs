//! Contract tests for the versioned seed catalog shipped in `data/`.

use std::collections::HashSet;

use hempboard::application::seed::SeedCatalog;
use hempboard::domain::{BeverageStatus, HempType, Table};

fn shipped_catalog() -> SeedCatalog {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.toml");
    SeedCatalog::load(path).expect("shipped seed catalog must parse")
}

#[test]
fn catalog_parses_with_expected_counts() {
    let catalog = shipped_catalog();

    assert_eq!(catalog.schema_version, 1);
    assert_eq!(catalog.len(Table::Production), 6);
    assert_eq!(catalog.len(Table::Market), 13);
    assert_eq!(catalog.len(Table::Employment), 8);
    assert_eq!(catalog.len(Table::Regulatory), 51);
    assert_eq!(catalog.len(Table::Tax), 13);
    assert_eq!(catalog.len(Table::Trends), 6);
    assert_eq!(catalog.len(Table::Timeline), 10);
    assert_eq!(catalog.total(), 107);
}

#[test]
fn regulatory_states_are_unique_and_cover_dc() {
    let catalog = shipped_catalog();

    let states: HashSet<&str> = catalog
        .regulatory
        .iter()
        .map(|row| row.state.as_str())
        .collect();

    assert_eq!(states.len(), 51, "one row per state, DC included");
    assert!(states.contains("DC"));
    assert!(states.contains("TX"));
}

#[test]
fn regulatory_statuses_all_map_to_ordinals() {
    let catalog = shipped_catalog();

    for row in &catalog.regulatory {
        assert!(
            !matches!(row.thc_beverage_status, BeverageStatus::Other(_)),
            "unexpected status label for {}",
            row.state
        );
        assert!(row.thc_beverage_status.ordinal().is_some());
    }
}

#[test]
fn production_rows_are_national_and_typed() {
    let catalog = shipped_catalog();

    for row in &catalog.production {
        assert_eq!(row.state, "US");
        assert!(!matches!(row.hemp_type, HempType::Other(_)));
    }
    assert!(catalog
        .production
        .iter()
        .any(|row| row.hemp_type == HempType::All));
}

#[test]
fn configured_market_metric_exists_in_catalog() {
    let catalog = shipped_catalog();

    assert!(catalog
        .market
        .iter()
        .any(|m| m.metric_name == "US Industrial Hemp Market"));
}

#[test]
fn tax_table_mixes_national_and_quarterly_state_rows() {
    let catalog = shipped_catalog();

    assert!(catalog
        .tax
        .iter()
        .any(|row| row.state == "US" && row.quarter.is_none()));
    assert!(catalog
        .tax
        .iter()
        .any(|row| row.state != "US" && row.quarter == Some(4)));
}

#[test]
fn unreported_employment_figures_stay_absent() {
    let catalog = shipped_catalog();

    let mi = catalog
        .employment
        .iter()
        .find(|row| row.geography == "MI")
        .expect("MI row present");
    assert_eq!(mi.total_jobs, None);
    assert_eq!(mi.total_wages_usd, None);
}

#[test]
fn timeline_events_span_the_farm_bill_to_the_federal_cap() {
    let catalog = shipped_catalog();

    let dates: Vec<String> = catalog
        .timeline
        .iter()
        .map(|e| e.event_date.to_string())
        .collect();
    assert!(dates.contains(&"2018-12-20".to_string()));
    assert!(dates.contains(&"2025-11-01".to_string()));
}
