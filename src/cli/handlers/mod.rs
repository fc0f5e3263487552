//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - query: One-shot question answering
//! - documents: Document upload and listing
//! - serve: API server
//! - info: Configuration display

pub mod documents;
pub mod info;
pub mod query;
pub mod serve;

// Re-export all public handlers
pub use documents::*;
pub use info::*;
pub use query::*;
pub use serve::*;

use crate::cli::commands::Commands;
use crate::AppConfig;
use crate::Result;

/// Dispatch a parsed command to its handler
pub async fn run_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port, cors } => handle_serve_api(config, host, port, cors).await,
        Commands::Query {
            question,
            client_id,
            top_k,
            json,
        } => handle_query(config, &question, &client_id, top_k, json).await,
        Commands::Upload { path, client_id } => handle_upload(config, &path, &client_id).await,
        Commands::Documents { client_id } => handle_list_documents(config, &client_id).await,
        Commands::Config => {
            handle_config_command(config);
            Ok(())
        }
    }
}
