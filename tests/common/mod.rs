//! Shared test fixtures for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};

use solar_dash::api::AppState;
use solar_dash::config::LocationConfig;
use solar_dash::error::EngineError;
use solar_dash::metrics::forecast::CloudCoverSeries;
use solar_dash::model::ModelType;
use solar_dash::providers::{ChatProvider, MailProvider, WeatherProvider};
use solar_dash::store::ModelStore;

/// Realistic PPA document: a 3-year projection and 14 months of data
/// spanning a year boundary (Nov 2022 – Dec 2023).
pub fn sample_ppa_value() -> Value {
    json!({
        "monthly_energy_production": 1200.0,
        "ESG": {
            "annual_tonnes_of_CO2_reduced": 6.5,
            "trees_planted_per_year": 150.0
        },
        "projection": {
            "Year": {"0": 1, "1": 2, "2": 3},
            "Annual Savings (RM)": {"0": "1800.25", "1": 1850, "2": 1900}
        },
        "monthly_data": {
            "year": {
                "0": 2022, "1": 2022,
                "2": 2023, "3": 2023, "4": 2023, "5": 2023, "6": 2023, "7": 2023,
                "8": 2023, "9": 2023, "10": 2023, "11": 2023, "12": 2023, "13": 2023
            },
            "month": {
                "0": 11, "1": 12,
                "2": 1, "3": 2, "4": 3, "5": 4, "6": 5, "7": 6,
                "8": 7, "9": 8, "10": 9, "11": 10, "12": 11, "13": 12
            },
            "E_consumed": {
                "0": 910, "1": 905,
                "2": 900, "3": 880, "4": 920, "5": 940, "6": 960, "7": 955,
                "8": 970, "9": 965, "10": 930, "11": 925, "12": 915, "13": 910
            },
            "E_produced": {
                "0": 1150, "1": 1100,
                "2": 1210, "3": 1190, "4": 1250, "5": 1230, "6": 1270, "7": 1240,
                "8": 1260, "9": 1255, "10": 1220, "11": 1200, "12": 1160, "13": 1120
            },
            "bill_without_solar": {
                "0": 455, "1": 452,
                "2": 450, "3": 440, "4": 460, "5": 470, "6": 480, "7": 478,
                "8": 485, "9": 482, "10": 465, "11": 462, "12": 457, "13": 455
            },
            "peak_sun_hours": {
                "0": 4.0, "1": 3.8,
                "2": 4.4, "3": 4.6, "4": 4.7, "5": 4.5, "6": 4.3, "7": 4.2,
                "8": 4.1, "9": 4.2, "10": 4.3, "11": 4.4, "12": 4.2, "13": 3.9
            }
        },
        "total_monthly_bill_with_solar": 215.0
    })
}

/// Realistic UPFRONT document: ROI turns positive in year 7.
pub fn sample_upfront_value() -> Value {
    json!({
        "projection": {
            "Year": {"0": 1, "1": 2, "2": 3, "3": 4, "4": 5, "5": 6, "6": 7, "7": 8},
            "Upfront Purchase ROI": {
                "0": -24000, "1": -20000, "2": -16000, "3": -12000,
                "4": -8000, "5": -4000, "6": 500, "7": 5000
            }
        }
    })
}

/// Store seeded with both sample documents.
pub fn seeded_store() -> ModelStore {
    let mut store = ModelStore::new();
    store.upsert_model(ModelType::Ppa, sample_ppa_value());
    store.upsert_model(ModelType::Upfront, sample_upfront_value());
    store
}

/// Weather fake returning a fixed cloud-cover series starting Mon 2025-06-02.
pub struct FakeWeather {
    pub covers: Vec<f64>,
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn daily_cloud_cover(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<CloudCoverSeries, EngineError> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date");
        Ok(CloudCoverSeries {
            dates: (0..self.covers.len() as u64)
                .map(|d| start + chrono::Days::new(d))
                .collect(),
            cloud_cover_percent: self.covers.clone(),
        })
    }
}

/// Weather fake that always fails as the upstream would.
pub struct FailingWeather;

#[async_trait]
impl WeatherProvider for FailingWeather {
    async fn daily_cloud_cover(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<CloudCoverSeries, EngineError> {
        Err(EngineError::upstream("open-meteo returned 503"))
    }
}

/// Chat fake echoing the prompt.
pub struct FakeChat;

#[async_trait]
impl ChatProvider for FakeChat {
    async fn chat(&self, prompt: &str) -> Result<String, EngineError> {
        Ok(format!("echo: {prompt}"))
    }
}

/// Mail fake that always accepts.
pub struct FakeMail;

#[async_trait]
impl MailProvider for FakeMail {
    async fn send_contact(
        &self,
        _user_name: &str,
        _user_email: &str,
        _message: &str,
    ) -> Result<(), EngineError> {
        Ok(())
    }
}

/// API state over the given store with fake providers and default location.
pub fn test_state(store: ModelStore, weather: Arc<dyn WeatherProvider>) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        location: LocationConfig::default(),
        weather,
        chat: Arc::new(FakeChat),
        mail: Arc::new(FakeMail),
    })
}
