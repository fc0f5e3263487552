//! Document upload and listing handlers

use std::path::Path;

use crate::cli::output::print_document_list;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::documents::validate_file_name;
use crate::documents::DocumentService;
use crate::AppConfig;
use crate::CiteRagError;
use crate::Result;

pub async fn handle_upload(config: &AppConfig, path: &Path, client_id: &str) -> Result<()> {
    config.validate()?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CiteRagError::InvalidInput(format!("Invalid file path: {}", path.display())))?;
    validate_file_name(file_name)?;

    let bytes = tokio::fs::read(path).await?;
    print_info(&format!(
        "📤 Uploading {} ({} bytes) for client {}",
        file_name,
        bytes.len(),
        client_id
    ));

    let service = DocumentService::from_config(config)?;
    let document = service.upload(client_id, file_name, bytes).await?;

    print_success(&format!(
        "Uploaded {} as document {} (status: {})",
        file_name, document.id, document.status
    ));
    Ok(())
}

pub async fn handle_list_documents(config: &AppConfig, client_id: &str) -> Result<()> {
    let service = DocumentService::from_config(config)?;
    let documents = service.list(client_id).await?;
    print_document_list(client_id, &documents);
    Ok(())
}
