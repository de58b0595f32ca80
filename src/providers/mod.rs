//! External service providers behind dependency-injected trait handles.
//!
//! The API layer holds `Arc<dyn …>` handles so tests can substitute fakes.
//! Every provider failure surfaces as
//! [`EngineError::UpstreamUnavailable`](crate::error::EngineError); nothing
//! here retries or returns partial results.

pub mod chat;
pub mod mail;
pub mod weather;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::metrics::forecast::CloudCoverSeries;

/// Daily cloud-cover forecasts for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the daily mean cloud-cover series for the coming days.
    async fn daily_cloud_cover(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CloudCoverSeries, EngineError>;
}

/// Chat-assistant completions.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Answers a user prompt with the dashboard-assistant persona.
    async fn chat(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Contact-form mail delivery.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Forwards a contact-form submission to the configured inbox.
    async fn send_contact(
        &self,
        user_name: &str,
        user_email: &str,
        message: &str,
    ) -> Result<(), EngineError>;
}
