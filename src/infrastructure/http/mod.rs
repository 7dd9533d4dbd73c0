pub mod request_id;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, tts::TtsController};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes and layers
pub fn create_router(tts_controller: Arc<TtsController>) -> Router {
    // Synthesis accepts POST only; every other verb gets a plain-text 405
    let tts_routes = Router::new()
        .route(
            "/api/tts/synthesize",
            axum::routing::post(TtsController::synthesize).fallback(TtsController::method_not_allowed),
        )
        .route("/api/tts/voices", get(TtsController::voices))
        .with_state(tts_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(tts_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
