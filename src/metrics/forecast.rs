//! Weather-adjusted generation forecast.
//!
//! Combines a daily cloud-cover series with the project's average monthly
//! production to predict generation for the coming week.

use chrono::NaiveDate;
use serde::Serialize;

/// Number of days covered by the forecast.
pub const FORECAST_DAYS: usize = 7;

/// Fixed month-length approximation for deriving daily production.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Daily mean cloud-cover series from the weather provider.
///
/// `dates` and `cloud_cover_percent` are parallel; extra entries on either
/// side are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudCoverSeries {
    /// Forecast dates, earliest first.
    pub dates: Vec<NaiveDate>,
    /// Mean cloud cover per day, nominally 0–100.
    pub cloud_cover_percent: Vec<f64>,
}

/// One forecast bar. The literal key is part of the API contract.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    /// `"Today"` for the first day, abbreviated weekday name after that.
    pub name: String,
    #[serde(rename = "Forecasted Generation (kWh)")]
    pub generation_kwh: f64,
}

/// Scales average daily production by per-day cloud cover.
///
/// Takes at most [`FORECAST_DAYS`] entries and truncates gracefully when the
/// provider returns fewer. The cloud factor `1 - cover/100` is deliberately
/// not clamped: out-of-range provider values pass through unchanged rather
/// than being silently corrected.
pub fn combine_forecast(
    series: &CloudCoverSeries,
    avg_monthly_production: f64,
) -> Vec<ForecastPoint> {
    let avg_daily_production = avg_monthly_production / DAYS_PER_MONTH;

    series
        .dates
        .iter()
        .zip(series.cloud_cover_percent.iter())
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, (date, cover))| {
            let cloud_factor = 1.0 - cover / 100.0;
            ForecastPoint {
                name: if i == 0 {
                    "Today".to_string()
                } else {
                    date.format("%a").to_string()
                },
                generation_kwh: avg_daily_production * cloud_factor,
            }
        })
        .collect()
}
