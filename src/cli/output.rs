//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `citerag` CLI

use crate::models::AnswerResult;
use crate::models::Document;
use crate::AppConfig;
use crate::CiteRagError;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the original string, or its first `max_chars` characters followed by "..."
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print an answer followed by its sources
pub fn print_answer(result: &AnswerResult) {
    println!("📝 Answer:");
    println!("{}", result.answer);

    if result.citations.is_empty() {
        return;
    }

    println!();
    println!("📚 Sources ({}):", result.citations.len());
    for citation in &result.citations {
        println!(
            "  [{}] {} (page {}, score {:.3})",
            citation.id, citation.document_id, citation.page_number, citation.score
        );
        println!("      {}", truncate_str(&citation.text, 80));
    }
}

/// Print a tenant's document list
pub fn print_document_list(client_id: &str, documents: &[Document]) {
    if documents.is_empty() {
        print_info(&format!("No documents found for client {client_id}"));
        return;
    }

    println!("Found {} documents for client {}:", documents.len(), client_id);
    for document in documents {
        println!(
            "  - {} | {} | {}",
            document.id,
            truncate_str(&document.name, 40),
            document.status
        );
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 citerag Configuration:");
    println!();

    println!("🔎 Retrieval:");
    println!("  Endpoint: {}", config.retrieval_endpoint());
    println!("  Token: {}", mask_secret(&config.retrieval.api_token));
    println!("  Default top_k: {}", config.default_top_k());
    println!("  Rerank: {}", config.retrieval.rerank);
    println!("  Recency bias: {}", config.retrieval.recency_bias);
    println!("  Timeout: {}s", config.retrieval.timeout_secs);
    println!();

    println!("🤖 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Key: {}", mask_secret(&config.llm.llm_key));
    println!("  Model: {}", config.llm_model());
    println!("  Max context: {} chars", config.llm.max_context_chars);
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!();

    println!("🌐 Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  Environment: {}", config.server.environment);
    println!("  Secret key: {}", mask_secret(&config.server.secret_key));
    println!("  Allowed origins: {:?}", config.server.allowed_origins);
    println!(
        "  Webhook base URL: {}",
        config.webhook.base_url.as_deref().unwrap_or("N/A")
    );
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.log_level());
    println!();

    match config.validate() {
        Ok(()) => print_success("Configuration is valid"),
        Err(e) => print_warning(&e.to_string()),
    }
}

/// Mask a secret for display, keeping the last four characters of long values
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        "(not set)".to_string()
    } else if count <= 8 {
        "***masked***".to_string()
    } else {
        let tail: String = secret.chars().skip(count - 4).collect();
        format!("***{tail}")
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

/// Message shown when a command fails
pub fn format_command_error(err: &CiteRagError) -> String {
    match err {
        CiteRagError::ConfigError(_) => {
            format!("{err}\n   Run `citerag config` to inspect the effective configuration")
        }
        _ => err.to_string(),
    }
}

pub fn print_command_error(err: &CiteRagError) {
    print_error(&format_command_error(err));
}
