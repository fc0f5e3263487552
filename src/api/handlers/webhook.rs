/// Retrieval service notification handler
use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::WebhookAck;
use crate::webhook::handle_event;
use crate::webhook::WebhookEvent;

pub async fn receive_webhook(Json(event): Json<WebhookEvent>) -> Json<ApiResponse<WebhookAck>> {
    handle_event(&event);
    Json(ApiResponse::success(WebhookAck {
        status: "success".to_string(),
    }))
}
