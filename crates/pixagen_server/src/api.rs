//! Router assembly and the listener loop.

use crate::{AppState, ServerConfig, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use pixagen_error::{HttpError, PixagenResult};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Creates the API router.
///
/// Historical paths stay mounted next to the current ones so older clients
/// keep working.
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/models", get(handlers::models))
        .route("/api/gemini/generate", post(handlers::generate_image))
        .route("/api/image/generate", post(handlers::generate_image))
        .route("/api/veo/generate-video", post(handlers::generate_video))
        .route("/api/video/generate", post(handlers::generate_video))
        .route("/api/vision/analyze-product", post(handlers::analyze_product))
        .route("/api/fusion/generate", post(handlers::generate_composite))
        .route("/api/promo/generate-video", post(handlers::promo_script))
        .route("/api/promo/script", post(handlers::promo_script))
        .route(
            "/api/activity",
            get(handlers::list_activity).delete(handlers::clear_activity),
        )
        .route(
            "/api/settings/api-key",
            put(handlers::set_api_key).delete(handlers::clear_api_key),
        )
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> PixagenResult<()> {
    let addr = config.socket_addr()?;
    let app = create_router(state, *config.body_limit_bytes());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::bind(addr, e))?;
    info!(address = %addr, "PixaGen gateway listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}
