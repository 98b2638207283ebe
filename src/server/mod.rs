//! HTTP server for the roast-generation service.
//!
//! # Endpoints
//!
//! - `GET  /health`             — Liveness probe
//! - `POST /api/generate-roast` — Generate one formatted roast

pub mod routes;

pub use routes::{app_router, AppState};
