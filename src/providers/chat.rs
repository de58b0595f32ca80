//! Gemini-backed chat assistant.
//!
//! Thin wrapper over the `generateContent` endpoint with a fixed persona
//! prompt describing the dashboard's features.

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::ChatProvider;
use crate::error::EngineError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Canned reply when the API answers without a usable candidate
/// (safety blocks and similar).
const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response for that. \
     Could you try rephrasing your question?";

/// Gemini chat client. The API key comes from the environment; a missing key
/// is reported at call time as an upstream failure, not at construction.
#[derive(Debug, Clone)]
pub struct GeminiChat {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiChat {
    /// Creates a client for the given model name.
    pub fn new(http: reqwest::Client, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Persona prompt teaching the assistant the dashboard's feature set.
    fn system_prompt() -> String {
        let today = Local::now().format("%A, %B %-d, %Y");
        format!(
            "You are 'Sunny', an expert assistant for the Solar Potential Explorer \
             dashboard. Be concise, format responses as plain Markdown headings and \
             bullet points, and never emit raw '*' or '#' noise. Today is {today}.\n\n\
             Features you can explain:\n\
             - KPIs: annual production (kWh), lifetime savings over the 20-year system \
             life, estimated ROI period ('Immediate' for PPA, a payback year for \
             Upfront Purchase), and equivalent trees planted per year.\n\
             - Financial models: PPA (no upfront cost, pay per unit of solar energy \
             used) versus Upfront Purchase (buy the system, recoup via avoided bills).\n\
             - Charts: long-term savings/ROI projections, monthly energy mix, monthly \
             bill comparison, 7-day weather-based generation forecast, and average \
             peak sun hours per month.\n\n\
             Identify the relevant feature and explain it clearly."
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiChat {
    async fn chat(&self, prompt: &str) -> Result<String, EngineError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(EngineError::upstream("GEMINI_API_KEY is not configured"));
        };

        let url = format!(
            "{}/{}:generateContent?key={api_key}",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: format!("{}\n\nUser question: {prompt}", Self::system_prompt()),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::upstream(format!("gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::upstream(format!("gemini returned {status}")));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::upstream(format!("gemini payload malformed: {e}")))?;

        let reply = payload
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text);

        Ok(reply.unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
