//! Document retrieval service integration
//!
//! The service owns upload, parsing, chunking and indexing. This crate only
//! talks to it through two capabilities:
//! - [`DocumentRetrieval`]: tenant-scoped relevance search
//! - [`DocumentStore`]: tenant-scoped upload and listing
//!
//! [`RetrievalClient`] implements both over HTTP.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::RetrievalClient;

use crate::errors::Result;
use crate::models::Document;
use crate::models::DocumentUpload;
use crate::models::Passage;
use crate::tenant::TenantScope;

/// Relevance search scoped to one tenant
#[async_trait]
pub trait DocumentRetrieval: Send + Sync {
    /// Passages best-first; errors are reported, not swallowed
    async fn search(&self, scope: &TenantScope, query: &str, top_k: usize) -> Result<Vec<Passage>>;
}

/// Upload and listing scoped to one tenant
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(&self, scope: &TenantScope, upload: DocumentUpload) -> Result<Document>;

    async fn list_documents(&self, scope: &TenantScope) -> Result<Vec<Document>>;
}
