//! API request and response types.
//!
//! The two GET response shapes are a bit-exact contract with the frontend;
//! field names (including literal chart keys) must not change.

use serde::{Deserialize, Serialize};

use crate::metrics::charts::ChartBundle;
use crate::metrics::forecast::ForecastPoint;
use crate::metrics::kpi::KpiBundle;
use crate::metrics::monthly::MonthlyRecord;

/// `GET /dashboard` response: KPIs, chart series, and monthly records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpis: KpiBundle,
    pub charts: ChartBundle,
    pub monthly_data: Vec<MonthlyRecord>,
}

/// `GET /weather-forecast` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastPoint>,
    pub location_name: String,
}

/// Optional location override for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `POST /contact` body. Fields are optional so that absence is rejected by
/// our own validation (400) rather than a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /ai-chat` body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// `POST /ai-chat` response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response body for all failure statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
