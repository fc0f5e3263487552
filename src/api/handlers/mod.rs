/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiError;
use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::config::AppConfig;
use crate::documents::DocumentService;
use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::rag::RagService;

// Re-export sub-modules
pub mod documents;
pub mod query;
pub mod webhook;

// Re-export handlers
pub use documents::*;
pub use query::*;
pub use webhook::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag_service: Arc<RagService>,
    pub document_service: Arc<DocumentService>,
    /// First configuration problem found at startup, if any
    pub config_error: Option<String>,
    pub retrieval_configured: bool,
}

impl AppState {
    /// Build services from configuration
    ///
    /// An invalid configuration does not prevent startup; it is recorded and
    /// gated endpoints reject requests with it.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let config_error = config.validate().err().map(|e| match e {
            CiteRagError::ConfigError(problem) => problem,
            other => other.to_string(),
        });

        Ok(Self {
            rag_service: Arc::new(RagService::new(config)?),
            document_service: Arc::new(DocumentService::from_config(config)?),
            config_error,
            retrieval_configured: !config.retrieval.api_token.trim().is_empty(),
        })
    }

    /// Reject the request when the configuration is invalid
    pub fn require_valid_config(&self) -> std::result::Result<(), ApiError> {
        match &self.config_error {
            Some(problem) => Err(ApiError::configuration(problem)),
            None => Ok(()),
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let retrieval_service = if state.retrieval_configured {
        "configured"
    } else {
        "not_configured"
    };

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        api: "online".to_string(),
        retrieval_service: retrieval_service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
