//! Error taxonomy for the roast endpoint.
//!
//! Every failure maps to one of a fixed set of response bodies; upstream
//! detail is logged server-side and never leaks into the HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::provider::ProviderError;

/// All ways a roast request can fail.
#[derive(Debug, Error)]
pub enum RoastError {
    /// No completion credential available to the process.
    #[error("OpenAI API key is not configured")]
    ApiKeyNotConfigured,

    /// Request body carried no template field.
    #[error("Template is required")]
    TemplateRequired,

    /// Template key is not one of the known frames.
    #[error("Invalid template")]
    InvalidTemplate,

    /// The provider rejected the configured credential.
    #[error("Invalid OpenAI API key")]
    InvalidApiKey,

    /// Any other upstream failure, including an empty completion after
    /// cleanup. The detail is kept for logging only.
    #[error("Failed to generate roast")]
    Upstream { detail: String },
}

impl RoastError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TemplateRequired | Self::InvalidTemplate => StatusCode::BAD_REQUEST,
            Self::ApiKeyNotConfigured | Self::InvalidApiKey | Self::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ProviderError> for RoastError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::InvalidApiKey => Self::InvalidApiKey,
            ProviderError::Upstream(detail) => Self::Upstream { detail },
        }
    }
}

impl IntoResponse for RoastError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream { detail } => {
                tracing::error!(detail = %detail, "roast generation failed");
            }
            Self::InvalidApiKey => {
                tracing::error!("OpenAI rejected the configured API key");
            }
            _ => {}
        }

        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
