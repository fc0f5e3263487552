/// Question answering handler
use axum::extract::State;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::QueryRequest;
use crate::models::AnswerResult;

/// Answer a question from the tenant's documents
pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<AnswerResult> {
    info!("POST /api/query for client {}: {}", req.client_id, req.query);
    state.require_valid_config()?;

    let top_k = req.top_k.unwrap_or_else(|| state.rag_service.default_top_k());
    match state
        .rag_service
        .answer_query(&req.query, &req.client_id, top_k)
        .await
    {
        Ok(result) => Ok(Json(ApiResponse::success(result))),
        Err(e) => {
            error!("Error processing query: {}", e);
            Err(ApiError::from(e))
        }
    }
}
