//! Open-Meteo daily cloud-cover client.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::error::EngineError;
use crate::metrics::forecast::CloudCoverSeries;

/// Open-Meteo forecast API client.
///
/// Requests `daily=cloudcover_mean` for the configured timezone. Open-Meteo
/// requires no API key.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: reqwest::Client,
    base_url: String,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    daily: Option<DailyPayload>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    time: Vec<NaiveDate>,
    cloudcover_mean: Vec<f64>,
}

impl OpenMeteo {
    /// Creates a client against the configured endpoint.
    pub fn new(http: reqwest::Client, config: &WeatherConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            timezone: config.timezone.clone(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteo {
    async fn daily_cloud_cover(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CloudCoverSeries, EngineError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .query(&[
                ("daily", "cloudcover_mean"),
                ("timezone", self.timezone.as_str()),
            ])
            .send()
            .await
            .map_err(|e| EngineError::upstream(format!("open-meteo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::upstream(format!(
                "open-meteo returned {status}"
            )));
        }

        let payload: ForecastPayload = response
            .json()
            .await
            .map_err(|e| EngineError::upstream(format!("open-meteo payload malformed: {e}")))?;
        let daily = payload
            .daily
            .ok_or_else(|| EngineError::upstream("open-meteo payload missing `daily`"))?;

        Ok(CloudCoverSeries {
            dates: daily.time,
            cloud_cover_percent: daily.cloudcover_mean,
        })
    }
}
