//! RAG (Retrieval-Augmented Generation) module
//!
//! This module answers tenant questions from their uploaded documents:
//! - Tenant-scoped retrieval that degrades to "nothing found" on failure
//! - Numbered context assembly within a character budget
//! - Citations aligned 1:1 with the numbered context blocks
//! - Grounded LLM answer generation with `[n]` markers
//!
//! # Examples
//!
//! ```rust,no_run
//! use citerag::config::AppConfig;
//! use citerag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::new(&config)?;
//!
//!     let result = service.answer_query("What is the refund policy?", "acme", 8).await?;
//!     println!("Answer: {}", result.answer);
//!     println!("Sources: {} passages", result.citations.len());
//!
//!     Ok(())
//! }
//! ```

pub mod citations;
pub mod context;
pub mod markers;
pub mod pipeline;
pub mod retriever;
pub mod synthesizer;

pub use citations::build_citations;
pub use context::ContextAssembler;
pub use pipeline::RagQuery;
pub use pipeline::RagService;
pub use pipeline::DEFAULT_TOP_K;
pub use retriever::Retriever;
pub use synthesizer::AnswerSynthesizer;
pub use synthesizer::SynthesizedAnswer;
