//! REST API for the solar-investment dashboard.
//!
//! Endpoints:
//! - `GET /dashboard` — KPIs, chart series, and flattened monthly records
//! - `GET /weather-forecast` — 7-day generation forecast (optional `latitude`/`longitude` overrides)
//! - `POST /contact` — contact-form relay
//! - `POST /ai-chat` — dashboard assistant

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::LocationConfig;
use crate::providers::{ChatProvider, MailProvider, WeatherProvider};
use crate::store::ModelStore;

/// Immutable application state shared across all request handlers.
///
/// The store is read-only after seeding and the providers are stateless
/// clients, so the whole thing is wrapped in `Arc` with no locks.
pub struct AppState {
    /// Seeded document store.
    pub store: ModelStore,
    /// Default forecast location (query parameters may override).
    pub location: LocationConfig,
    /// Cloud-cover forecast source.
    pub weather: Arc<dyn WeatherProvider>,
    /// Chat-assistant backend.
    pub chat: Arc<dyn ChatProvider>,
    /// Contact-form mail delivery.
    pub mail: Arc<dyn MailProvider>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/weather-forecast", get(handlers::get_weather_forecast))
        .route("/contact", post(handlers::post_contact))
        .route("/ai-chat", post(handlers::post_ai_chat))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
