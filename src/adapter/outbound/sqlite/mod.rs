//! SQLite-backed warehouse adapter.

pub mod database;
mod warehouse;

pub use warehouse::SqliteWarehouse;
