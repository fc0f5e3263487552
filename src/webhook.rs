//! Document status notifications from the retrieval service

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::models::DocumentStatus;

/// Event type sent when a document moves to a new indexing state
pub const DOCUMENT_STATUS_UPDATED: &str = "document_status_updated";

const SETUP_UNSUPPORTED: &str = "Webhook registration is not available through the retrieval API. \
     Register the endpoint in the retrieval service dashboard instead.";

/// Outcome of a webhook registration attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSetup {
    pub status: String,
    pub message: String,
    pub endpoint_url: String,
}

/// Register `endpoint_url` for document status notifications
///
/// Registration is managed outside this service, so this only reports a
/// warning naming the endpoint that should be registered.
pub fn setup_webhook(endpoint_url: &str) -> WebhookSetup {
    info!("Setting up webhook at {}", endpoint_url);
    let setup = WebhookSetup {
        status: "warning".to_string(),
        message: SETUP_UNSUPPORTED.to_string(),
        endpoint_url: endpoint_url.to_string(),
    };
    warn!("{} ({})", setup.message, setup.endpoint_url);
    setup
}

/// Notification posted by the retrieval service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event_type: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl WebhookEvent {
    /// Parsed document status, if the event carries one
    pub fn document_status(&self) -> Option<DocumentStatus> {
        self.status.as_deref().map(DocumentStatus::from)
    }

    pub fn is_status_update(&self) -> bool {
        self.event_type == DOCUMENT_STATUS_UPDATED
    }
}

/// Log an incoming event; returns the new status for status updates
pub fn handle_event(event: &WebhookEvent) -> Option<DocumentStatus> {
    info!("Received webhook event: {}", event.event_type);

    if !event.is_status_update() {
        debug!("Ignoring webhook event {}", event.event_type);
        return None;
    }

    let status = event.document_status().unwrap_or_default();
    info!(
        "Document {} status updated to {}",
        event.document_id.as_deref().unwrap_or("<unknown>"),
        status
    );
    Some(status)
}
