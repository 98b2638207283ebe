//! roastgen HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `OPENAI_API_KEY` — OpenAI credential; requests fail with a
//!   configuration error when unset
//! - `RUST_LOG` — Tracing filter (default: "info,roastgen=debug")
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --bin server
//! ```

use roastgen::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roastgen=debug".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let state = AppState::from_env();
    let app = roastgen::app_router(state);

    tracing::info!("roastgen server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             — liveness probe");
    tracing::info!("  POST /api/generate-roast — generate a roast");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
