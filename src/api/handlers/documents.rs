/// Document upload and listing handlers
use axum::extract::Multipart;
use axum::extract::State;
use axum::Json;
use tracing::debug;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::DocumentListRequest;
use crate::api::types::DocumentListResponse;
use crate::models::Document;

/// Upload a document (multipart fields `file` and `client_id`)
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<Document> {
    state.require_valid_config()?;

    let mut client_id = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("client_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid client_id field: {e}")))?;
                client_id = Some(value);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid file field: {e}")))?;
                debug!("Read {} bytes from {}", bytes.len(), file_name);
                file = Some((file_name, bytes.to_vec()));
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let client_id = client_id.ok_or_else(|| ApiError::bad_request("Missing client_id field"))?;
    let (file_name, bytes) = file.ok_or_else(|| ApiError::bad_request("Missing file field"))?;
    info!("POST /api/upload: {} for client {}", file_name, client_id);

    match state
        .document_service
        .upload(&client_id, &file_name, bytes)
        .await
    {
        Ok(document) => Ok(Json(ApiResponse::success(document))),
        Err(e) => {
            error!("Error uploading file: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// List the tenant's documents
pub async fn list_documents(
    State(state): State<AppState>,
    Json(req): Json<DocumentListRequest>,
) -> ApiResult<DocumentListResponse> {
    info!("POST /api/documents for client {}", req.client_id);

    let documents = state.document_service.list(&req.client_id).await?;
    Ok(Json(ApiResponse::success(DocumentListResponse { documents })))
}
