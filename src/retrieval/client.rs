//! HTTP client for the document retrieval service

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::Client;
use tracing::debug;
use tracing::info;

use super::types::DocumentListResponse;
use super::types::RetrievalRequest;
use super::types::RetrievalResponse;
use super::DocumentRetrieval;
use super::DocumentStore;
use crate::config::AppConfig;
use crate::config::RetrievalConfig;
use crate::errors::Result;
use crate::http_client::build_client;
use crate::http_client::ensure_success;
use crate::http_client::join_url;
use crate::models::Document;
use crate::models::DocumentUpload;
use crate::models::Passage;
use crate::retry::with_retries;
use crate::tenant::TenantScope;

const SERVICE: &str = "retrieval service";

/// Tag written into every uploaded document's metadata
pub const UPLOAD_SOURCE: &str = "rag_agent";

/// Client for the external retrieval service, authenticated with a bearer token
pub struct RetrievalClient {
    client: Client,
    endpoint: String,
    api_token: String,
    rerank: bool,
    recency_bias: bool,
    max_attempts: usize,
}

impl RetrievalClient {
    /// Create a new retrieval client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid TLS configuration)
    pub fn new(config: &RetrievalConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            rerank: config.rerank,
            recency_bias: config.recency_bias,
            max_attempts: config.max_attempts,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.retrieval)
    }

    /// Whether a credential is configured
    pub fn is_configured(&self) -> bool {
        !self.api_token.trim().is_empty()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn search_once(
        &self,
        scope: &TenantScope,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Passage>> {
        let url = join_url(&self.endpoint, "retrievals");
        let request = RetrievalRequest {
            query,
            partition: scope.as_str(),
            top_k,
            rerank: self.rerank,
            recency_bias: self.recency_bias,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response, SERVICE).await?;

        let result: RetrievalResponse = response.json().await?;
        Ok(result.into_passages())
    }

    async fn list_once(&self, scope: &TenantScope) -> Result<Vec<Document>> {
        let url = join_url(&self.endpoint, "documents");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("accept", "application/json")
            .header("partition", scope.as_str())
            .send()
            .await?;
        let response = ensure_success(response, SERVICE).await?;

        let result: DocumentListResponse = response.json().await?;
        Ok(result.into_documents())
    }
}

#[async_trait]
impl DocumentRetrieval for RetrievalClient {
    async fn search(&self, scope: &TenantScope, query: &str, top_k: usize) -> Result<Vec<Passage>> {
        debug!("Retrieving up to {} chunks in {} for: {}", top_k, scope, query);
        with_retries("retrieval", self.max_attempts, || {
            self.search_once(scope, query, top_k)
        })
        .await
    }
}

#[async_trait]
impl DocumentStore for RetrievalClient {
    async fn upload(&self, scope: &TenantScope, upload: DocumentUpload) -> Result<Document> {
        let url = join_url(&self.endpoint, "documents");
        let metadata = serde_json::json!({
            "client_id": scope.client_id(),
            "upload_timestamp": chrono::Utc::now().to_rfc3339(),
            "source": UPLOAD_SOURCE,
        });

        info!(
            "Uploading {} ({} bytes) to {}",
            upload.file_name,
            upload.bytes.len(),
            scope
        );

        let file_part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", file_part)
            .text("partition", scope.as_str().to_string())
            .text("metadata", metadata.to_string());

        // Not retried: a repeated upload would index the document twice
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("accept", "application/json")
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response, SERVICE).await?;

        Ok(response.json().await?)
    }

    async fn list_documents(&self, scope: &TenantScope) -> Result<Vec<Document>> {
        debug!("Listing documents for {}", scope);
        with_retries("document listing", self.max_attempts, || self.list_once(scope)).await
    }
}
