//! HTTP server implementation

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::webhook::setup_webhook;
use crate::Result;

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting citerag API server...");

    // Initialize services
    let state = AppState::from_config(config)?;
    if let Some(problem) = &state.config_error {
        error!("Configuration error: {}", problem);
        warn!("Continuing startup; /api/query and /api/upload will be rejected");
    }

    if let Some(base_url) = &config.webhook.base_url {
        let endpoint = format!("{}/webhook", base_url.trim_end_matches('/'));
        let setup = setup_webhook(&endpoint);
        info!("Webhook setup result: {}", setup.status);
    }

    let app = build_app(state, config, enable_cors);

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /api/health     - Health check");
    info!("  POST /api/query      - Answer a question with citations");
    info!("  POST /api/upload     - Upload a document (multipart)");
    info!("  POST /api/documents  - List a client's documents");
    info!("  POST /api/webhook    - Document status notifications");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Router with all middleware layers applied
///
/// CORS is installed whenever `server.allowed_origins` is non-empty; `enable_cors`
/// forces it on (any origin) when the list is empty.
pub fn build_app(state: AppState, config: &AppConfig, enable_cors: bool) -> Router {
    let api_router = routes::api_routes(state, config.server.max_upload_bytes);

    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    if enable_cors || !config.server.allowed_origins.is_empty() {
        info!("✅ CORS enabled for {:?}", config.server.allowed_origins);
        app = app.layer(cors_layer(&config.server.allowed_origins));
    }

    app
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
