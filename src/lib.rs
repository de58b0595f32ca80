//! Solar-investment dashboard backend: a derived-metrics engine over two
//! financial-model documents (PPA and upfront purchase), plus the REST API,
//! weather-forecast combination, and external-provider plumbing around it.

pub mod api;
pub mod config;
pub mod error;
/// KPI, chart-series, monthly-record, and forecast derivations.
pub mod metrics;
pub mod model;
pub mod providers;
pub mod store;
