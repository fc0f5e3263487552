//! Tenant document management: upload and listing

use std::path::Path;
use std::sync::Arc;

use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::models::Document;
use crate::models::DocumentUpload;
use crate::retrieval::DocumentStore;
use crate::retrieval::RetrievalClient;
use crate::tenant::TenantScope;

/// File extensions the retrieval service can index
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "csv", "txt"];

/// Check a file name against [`SUPPORTED_EXTENSIONS`], ignoring case
///
/// # Errors
/// - [`CiteRagError::UnsupportedFileType`] naming the rejected extension
pub fn validate_file_name(file_name: &str) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else if extension.is_empty() {
        Err(CiteRagError::UnsupportedFileType(format!(
            "'{file_name}' has no extension"
        )))
    } else {
        Err(CiteRagError::UnsupportedFileType(format!(".{extension}")))
    }
}

/// Upload and listing of a tenant's documents
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a document service backed by the configured retrieval service
    ///
    /// # Errors
    /// - HTTP client build errors
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(RetrievalClient::from_config(config)?)))
    }

    /// Upload a file into the tenant's partition
    ///
    /// # Errors
    /// - [`CiteRagError::InvalidInput`] for a blank client id or an empty file
    /// - [`CiteRagError::UnsupportedFileType`] for extensions outside [`SUPPORTED_EXTENSIONS`]
    /// - [`CiteRagError::UploadFailed`] for transport failures
    /// - [`CiteRagError::UpstreamStatus`] when the service rejects the upload
    pub async fn upload(&self, client_id: &str, file_name: &str, bytes: Vec<u8>) -> Result<Document> {
        if client_id.trim().is_empty() {
            return Err(CiteRagError::InvalidInput("client_id is required".to_string()));
        }
        validate_file_name(file_name)?;
        if bytes.is_empty() {
            return Err(CiteRagError::InvalidInput(format!("'{file_name}' is empty")));
        }

        let scope = TenantScope::for_client(client_id);
        let upload = DocumentUpload {
            file_name: file_name.to_string(),
            bytes,
        };

        match self.store.upload(&scope, upload).await {
            Ok(document) => {
                info!(
                    "Uploaded {} as document {} ({})",
                    file_name, document.id, document.status
                );
                Ok(document)
            }
            Err(e @ CiteRagError::UpstreamStatus { .. }) => {
                error!("Upload of {} to {} rejected: {}", file_name, scope, e);
                Err(e)
            }
            Err(e) => {
                error!("Upload of {} to {} failed: {}", file_name, scope, e);
                Err(CiteRagError::UploadFailed(e.to_string()))
            }
        }
    }

    /// Documents in the tenant's partition
    ///
    /// Read failures are logged and reported as an empty list.
    ///
    /// # Errors
    /// - [`CiteRagError::InvalidInput`] for a blank client id
    pub async fn list(&self, client_id: &str) -> Result<Vec<Document>> {
        if client_id.trim().is_empty() {
            return Err(CiteRagError::InvalidInput("client_id is required".to_string()));
        }

        let scope = TenantScope::for_client(client_id);
        match self.store.list_documents(&scope).await {
            Ok(documents) => Ok(documents),
            Err(e) => {
                warn!("Listing documents for {} failed: {}", scope, e);
                Ok(Vec::new())
            }
        }
    }
}
