//! Tenant-scoped retrieval with fail-open semantics

use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::models::Passage;
use crate::retrieval::DocumentRetrieval;
use crate::tenant::TenantScope;

/// Retriever over the document retrieval service
///
/// A failed search is reported as "nothing found" so that a slow or broken
/// retrieval service degrades answers instead of failing requests.
#[derive(Clone)]
pub struct Retriever {
    backend: Arc<dyn DocumentRetrieval>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(backend: Arc<dyn DocumentRetrieval>) -> Self {
        Self { backend }
    }

    /// Passages for `query` in `scope`, best match first, at most `top_k`
    pub async fn retrieve(&self, query: &str, scope: &TenantScope, top_k: usize) -> Vec<Passage> {
        match self.try_retrieve(query, scope, top_k).await {
            Ok(passages) => passages,
            Err(e) => {
                error!("{} (scope {})", e, scope);
                Vec::new()
            }
        }
    }

    /// Like [`Retriever::retrieve`], but reports backend failures as
    /// [`CiteRagError::RetrievalUnavailable`]
    pub async fn try_retrieve(
        &self,
        query: &str,
        scope: &TenantScope,
        top_k: usize,
    ) -> Result<Vec<Passage>> {
        debug!("Performing scoped search in {}: {}", scope, query);

        let mut passages = self
            .backend
            .search(scope, query, top_k)
            .await
            .map_err(|e| CiteRagError::RetrievalUnavailable(e.to_string()))?;

        if passages.len() > top_k {
            warn!(
                "Retrieval service returned {} passages for top_k {}, truncating",
                passages.len(),
                top_k
            );
            passages.truncate(top_k);
        }
        debug!("Retrieved {} passages", passages.len());
        Ok(passages)
    }
}
