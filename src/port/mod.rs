//! Ports: trait boundaries between the application core and its adapters.

pub mod outbound;
