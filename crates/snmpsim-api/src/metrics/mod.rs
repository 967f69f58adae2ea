// Metrics API client modules
//
// Read-only telemetry about running simulator processes and the SNMP
// traffic they handle.

pub mod activity;
pub mod client;
pub mod models;
pub mod processes;

pub use client::{METRICS_PREFIX, MetricsClient};
