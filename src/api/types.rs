//! API request and response types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::CiteRagError;
use crate::models::Document;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error answered with a status code and an error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Rejection for requests that need a valid configuration
    pub fn configuration(problem: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Server configuration error: {problem}"),
        )
    }
}

impl From<CiteRagError> for ApiError {
    fn from(err: CiteRagError) -> Self {
        let status = match &err {
            CiteRagError::InvalidInput(_) | CiteRagError::UnsupportedFileType(_) => {
                StatusCode::BAD_REQUEST
            }
            CiteRagError::UpstreamStatus { .. }
            | CiteRagError::Http(_)
            | CiteRagError::MalformedResponse(_)
            | CiteRagError::RetrievalUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api: String,
    pub retrieval_service: String,
    pub version: String,
}

/// Question answering request
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub client_id: String,
    /// Falls back to the configured default
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Document listing request
#[derive(Debug, Deserialize)]
pub struct DocumentListRequest {
    pub client_id: String,
}

/// Documents of one tenant
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
}

/// Acknowledgement for webhook deliveries
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub status: String,
}
