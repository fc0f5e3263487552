//! Question answering handler

use crate::cli::output::print_answer;
use crate::cli::output::print_info;
use crate::cli::output::print_warning;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_query(
    config: &AppConfig,
    question: &str,
    client_id: &str,
    top_k: Option<usize>,
    json: bool,
) -> Result<()> {
    config.validate()?;

    if !json {
        print_info(&format!("🤖 Query for client {client_id}: \"{question}\""));
        println!();
    }

    let service = RagService::new(config)?;
    let top_k = top_k.unwrap_or_else(|| service.default_top_k());
    let result = service.answer_query(question, client_id, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_answer(&result);
    if result.is_empty() {
        println!();
        print_warning("No passages were retrieved; upload documents with `citerag upload`");
    }

    Ok(())
}
