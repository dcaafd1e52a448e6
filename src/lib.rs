//! Hempboard - hemp-industry economic indicators warehouse and dashboard.
//!
//! This crate provides the data pipeline behind a read-only analytics
//! dashboard: a batch loader that materializes a versioned seed catalog
//! into an analytical store, and a dashboard service that retrieves the
//! tables (behind a time-bound cache) and derives the chart-ready views.
//!
//! # Architecture
//!
//! Data flows one direction: seed catalog → storage tables → retrieval →
//! derived views → rendered output.
//!
//! - **`domain`** - Record types and the pure derivation functions
//!   (series filtering, top-N ranking, status tallies, choropleth
//!   ordinals, chronological timeline)
//! - **`port`** - The [`port::outbound::store::Warehouse`] persistence port
//! - **`adapter`** - SQLite/Diesel warehouse adapter and the CLI
//! - **`application`** - Seed catalog, loader, TTL cache, dashboard service
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with env overrides
//! - [`domain`] - Warehouse-agnostic records and derivations
//! - [`error`] - Error types for the crate
//! - [`paths`] - `~/.hempboard/` layout
//! - [`port`] - Trait boundaries
//! - [`adapter`] - SQLite warehouse + CLI adapters
//! - [`application`] - Loader and dashboard services
//!
//! # Example
//!
//! ```ignore
//! use hempboard::application::dashboard::DashboardService;
//! use hempboard::application::cache::DashboardCache;
//! use hempboard::config::Config;
//!
//! let config = Config::load("config.toml")?;
//! let service = DashboardService::new(warehouse, config.dashboard, DashboardCache::disabled());
//! let snapshot = service.snapshot().await?;
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod paths;
pub mod port;
