//! Shared HTTP plumbing for the external service clients

use std::time::Duration;

use reqwest::Client;
use reqwest::Response;

use crate::errors::CiteRagError;
use crate::errors::Result;

/// Build a pooled client with a per-request timeout
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .pool_idle_timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CiteRagError::Http(format!("Failed to create HTTP client: {e}")))
}

/// Join a base endpoint and a path without doubling slashes
pub fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a non-2xx response into [`CiteRagError::UpstreamStatus`]
pub async fn ensure_success(response: Response, service: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(CiteRagError::UpstreamStatus {
        service,
        status: status.as_u16(),
        message: truncate_body(&message),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX_BODY_CHARS: usize = 200;
    if body.chars().count() > MAX_BODY_CHARS {
        let truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}
