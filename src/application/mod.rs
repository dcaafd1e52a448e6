//! Application services: seed catalog, loader, cache, and dashboard.

pub mod cache;
pub mod dashboard;
pub mod loader;
pub mod seed;
