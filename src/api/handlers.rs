//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{
    ChatRequest, ChatResponse, ContactForm, DashboardResponse, ErrorResponse, ForecastQuery,
    ForecastResponse, MessageResponse,
};
use crate::error::EngineError;
use crate::metrics::charts::build_charts;
use crate::metrics::forecast::combine_forecast;
use crate::metrics::kpi::compute_kpis;
use crate::metrics::monthly::flatten_monthly;
use crate::model::{ModelType, PpaModel, UpfrontModel};
use crate::store::ModelStore;

type ApiFailure = (StatusCode, Json<ErrorResponse>);

/// Maps the engine error taxonomy to an HTTP status and JSON error body.
///
/// Validation → 400, upstream failures → 502, data integrity → 500.
fn error_response(err: EngineError) -> ApiFailure {
    let status = match &err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
        EngineError::DataIntegrity { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn clean(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

/// Parses both stored documents and derives the full dashboard payload.
fn build_dashboard(store: &ModelStore) -> Result<DashboardResponse, EngineError> {
    let ppa_doc = store
        .get(ModelType::Ppa)
        .ok_or_else(|| EngineError::integrity("PPA"))?;
    let upfront_doc = store
        .get(ModelType::Upfront)
        .ok_or_else(|| EngineError::integrity("UPFRONT"))?;
    let ppa = PpaModel::from_value(ppa_doc)?;
    let upfront = UpfrontModel::from_value(upfront_doc)?;

    Ok(DashboardResponse {
        kpis: compute_kpis(&ppa, &upfront)?,
        charts: build_charts(&ppa, &upfront)?,
        monthly_data: flatten_monthly(&ppa),
    })
}

/// Returns KPIs, chart series, and monthly records for both financial models.
///
/// `GET /dashboard` → 200 + `DashboardResponse` JSON
/// 404 when the store has not been seeded with both documents.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if !state.store.is_seeded() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Dashboard data not found. Please seed the database.".to_string(),
            }),
        ));
    }

    build_dashboard(&state.store)
        .map(Json)
        .map_err(error_response)
}

/// Returns the 7-day weather-adjusted generation forecast.
///
/// `GET /weather-forecast` → 200 + `ForecastResponse` JSON
/// `GET /weather-forecast?latitude=L&longitude=G` → forecast for an override location
pub async fn get_weather_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ApiFailure> {
    let latitude = query.latitude.unwrap_or(state.location.latitude);
    let longitude = query.longitude.unwrap_or(state.location.longitude);

    // The weather fetch and the document read are independent; run them
    // concurrently and fail the whole operation if either fails.
    let weather = state.weather.daily_cloud_cover(latitude, longitude);
    let document = async {
        let doc = state
            .store
            .get(ModelType::Ppa)
            .ok_or_else(|| EngineError::upstream("reference project document is not available"))?;
        PpaModel::from_value(doc)
    };
    let (series, ppa) = tokio::join!(weather, document);
    let (series, ppa) = (
        series.map_err(error_response)?,
        ppa.map_err(error_response)?,
    );

    Ok(Json(ForecastResponse {
        forecast: combine_forecast(&series, ppa.monthly_energy_production),
        location_name: state.location.name.clone(),
    }))
}

/// Relays a contact-form submission to the configured inbox.
///
/// `POST /contact` → 200 + acknowledgement
/// 400 when any field is missing or blank.
pub async fn post_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    let (Some(user_name), Some(user_email), Some(message)) = (
        clean(form.user_name),
        clean(form.user_email),
        clean(form.message),
    ) else {
        return Err(error_response(EngineError::Validation(
            "All fields are required.".to_string(),
        )));
    };

    state
        .mail
        .send_contact(&user_name, &user_email, &message)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Email sent successfully!".to_string(),
    }))
}

/// Answers a user prompt via the chat assistant.
///
/// `POST /ai-chat` → 200 + `ChatResponse` JSON
/// 400 when the prompt is missing or blank.
pub async fn post_ai_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiFailure> {
    let Some(prompt) = clean(request.prompt) else {
        return Err(error_response(EngineError::Validation(
            "Prompt is required.".to_string(),
        )));
    };

    let response = state.chat.chat(&prompt).await.map_err(error_response)?;
    Ok(Json(ChatResponse { response }))
}
