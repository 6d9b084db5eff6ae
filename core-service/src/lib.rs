//! EpochGuard Core - Resilient analysis engine for PoS node telemetry
//!
//! Sends uploaded CSVs to the remote classifier and, when it cannot be
//! reached, produces a complete local result of the same shape.

pub mod api;
pub mod constants;
pub mod logic;
