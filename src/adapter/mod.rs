//! Adapters wiring the application core to the outside world.

pub mod inbound;
pub mod outbound;
