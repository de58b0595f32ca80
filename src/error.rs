//! Error taxonomy shared by the metrics engine and the API layer.
//!
//! The engine never logs and never swallows errors; every failure is
//! propagated to the caller, which decides on user-facing messaging.

use thiserror::Error;

/// Failure modes surfaced by the engine and its collaborators.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required document or field is absent or malformed.
    ///
    /// `path` is the dotted location of the offending data, e.g.
    /// `PPA.projection["Annual Savings (RM)"]`.
    #[error("data integrity error: missing or malformed `{path}`")]
    DataIntegrity { path: String },

    /// An external dependency (weather, chat, mail) failed.
    #[error("upstream unavailable: {context}")]
    UpstreamUnavailable { context: String },

    /// Caller-supplied input rejected before reaching the engine.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl EngineError {
    /// Data-integrity error for the given dotted path.
    pub fn integrity(path: impl Into<String>) -> Self {
        Self::DataIntegrity { path: path.into() }
    }

    /// Upstream-unavailable error with a short context string.
    pub fn upstream(context: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            context: context.into(),
        }
    }
}
