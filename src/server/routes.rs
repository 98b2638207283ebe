//! Axum route handlers for the roast-generation service.
//!
//! # Routes
//!
//! - `GET  /health`             — Returns `{"status": "ok", ...}`
//! - `POST /api/generate-roast` — Accepts `{template, style?, intensity?}`,
//!   returns `{"completion": "..."}`
//!
//! The generate handler runs the whole pipeline: validate, build the
//! prompt, call the completion provider, clean the text, check it for
//! thematic novelty against the recency cache (retrying a bounded number of
//! times with raised temperature), record it, and wrap it in the template's
//! sentence frame.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::RecencyCache;
use crate::cleaner;
use crate::error::RoastError;
use crate::profiles::{sampling_for, Template};
use crate::prompt;
use crate::provider::{CompletionProvider, OpenAiCompletion};
use crate::themes::detect_themes;

/// Bounded retry budget for the novelty loop.
const MAX_NOVELTY_RETRIES: u32 = 3;

/// Temperature increase per novelty retry.
const RETRY_TEMPERATURE_STEP: f64 = 0.2;

/// Hard temperature ceiling for retries.
const MAX_TEMPERATURE: f64 = 2.0;

/// Substrings that disqualify a retry candidate outright. These subjects
/// come up so often that retrying into them defeats the point.
const BANNED_RETRY_SUBSTRINGS: &[&str] = &["gym", "shoe"];

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Completion capability; `None` when no API key is configured, in
    /// which case every generate request fails with the configuration
    /// error.
    pub provider: Option<Arc<dyn CompletionProvider>>,
    /// Recent responses, for repeat-avoidance.
    pub cache: RecencyCache,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self {
            provider,
            cache: RecencyCache::new(),
        }
    }

    /// Build state from the process environment. The key's absence is
    /// detected here but only reported per-request.
    pub fn from_env() -> Self {
        let provider = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|key| Arc::new(OpenAiCompletion::new(key)) as Arc<dyn CompletionProvider>);
        if provider.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; generate requests will fail");
        }
        Self::new(provider)
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate-roast", post(generate_roast_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Request body for `POST /api/generate-roast`.
#[derive(Debug, Deserialize)]
pub struct GenerateRoastRequest {
    /// Sentence frame key. Required; unknown keys are rejected.
    pub template: Option<String>,
    /// Humor style key. Defaults to "dry".
    #[serde(default)]
    pub style: Option<String>,
    /// Severity level, accepted as a JSON number or string. Defaults to 0.
    #[serde(default)]
    pub intensity: Option<Value>,
}

/// Success body for `POST /api/generate-roast`.
#[derive(Debug, Serialize)]
pub struct GenerateRoastResponse {
    pub completion: String,
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "roastgen",
    }))
}

/// Accept an intensity given as a number or a numeric string; anything else
/// falls back to the default level.
fn parse_intensity(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// POST /api/generate-roast — generate one formatted roast.
async fn generate_roast_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRoastRequest>,
) -> Result<Json<GenerateRoastResponse>, RoastError> {
    let provider = state
        .provider
        .clone()
        .ok_or(RoastError::ApiKeyNotConfigured)?;

    let template_key = request
        .template
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(RoastError::TemplateRequired)?;
    let template = Template::from_key(template_key).ok_or(RoastError::InvalidTemplate)?;

    let style = request.style.unwrap_or_else(|| "dry".to_string());
    let intensity = parse_intensity(request.intensity.as_ref());

    let system = prompt::system_prompt(&style, intensity);
    let user = template.instruction();
    let sampling = sampling_for(&style);

    tracing::debug!(template = template.as_str(), style = %style, intensity, "generating roast");

    let raw = provider.complete(&system, user, &sampling).await?;
    let mut response = cleaner::clean(&raw, &style);

    let now = Utc::now();
    let mut themes = detect_themes(&response);

    if state.cache.contains(&response) || state.cache.theme_on_cooldown(&themes, now) {
        tracing::debug!(response = %response, "repeat detected, retrying");
        for attempt in 1..=MAX_NOVELTY_RETRIES {
            let mut retry_sampling = sampling.clone();
            retry_sampling.temperature = (sampling.temperature
                + RETRY_TEMPERATURE_STEP * f64::from(attempt))
            .min(MAX_TEMPERATURE);

            let retry_raw = provider.complete(&system, user, &retry_sampling).await?;
            let candidate = cleaner::clean(&retry_raw, &style);

            let banned = BANNED_RETRY_SUBSTRINGS
                .iter()
                .any(|substring| candidate.contains(substring));
            let accepted = !state.cache.contains(&candidate) && !banned;

            // Novelty is best-effort: if every retry collides, the last
            // candidate is served anyway.
            response = candidate;
            if accepted {
                break;
            }
        }
        themes = detect_themes(&response);
    }

    if response.is_empty() {
        return Err(RoastError::Upstream {
            detail: "empty completion after cleanup".to_string(),
        });
    }

    state.cache.insert(response.clone(), themes, now);

    let completion = template.apply_frame(&response);
    tracing::debug!(completion = %completion, "roast generated");
    Ok(Json(GenerateRoastResponse { completion }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
