//! Derived-metrics engine.
//!
//! Pure, deterministic, side-effect-free transformations from the two typed
//! model documents into dashboard outputs:
//! - [`kpi`] — KPI summary bundle
//! - [`charts`] — chart-ready series bundle
//! - [`monthly`] — flattened monthly-record list
//! - [`forecast`] — weather-adjusted 7-day generation forecast
//!
//! Nothing in this module performs I/O or logging; all failures propagate as
//! [`crate::error::EngineError`].

pub mod charts;
pub mod forecast;
pub mod kpi;
pub mod monthly;
