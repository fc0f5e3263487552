//! Complete RAG pipeline: Scope -> Retrieve -> Cite -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::llm::LanguageModel;
use crate::llm::LlmService;
use crate::models::AnswerResult;
use crate::rag::build_citations;
use crate::rag::AnswerSynthesizer;
use crate::rag::ContextAssembler;
use crate::rag::Retriever;
use crate::retrieval::DocumentRetrieval;
use crate::retrieval::RetrievalClient;
use crate::tenant::TenantScope;

/// Number of passages retrieved when the caller does not say
pub const DEFAULT_TOP_K: usize = 8;

/// Query configuration
#[derive(Debug, Clone)]
pub struct RagQuery {
    pub question: String,
    pub client_id: String,
    pub top_k: usize,
}

impl RagQuery {
    pub fn new(question: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            client_id: client_id.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(CiteRagError::InvalidInput("query must not be empty".to_string()));
        }
        if self.client_id.trim().is_empty() {
            return Err(CiteRagError::InvalidInput("client_id is required".to_string()));
        }
        if self.top_k == 0 {
            return Err(CiteRagError::InvalidInput(
                "top_k must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete RAG service
///
/// Holds no per-request state; one instance serves concurrent queries.
#[derive(Clone)]
pub struct RagService {
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    default_top_k: usize,
}

impl RagService {
    /// Create a new RAG service wired to the configured external services
    ///
    /// # Errors
    /// - HTTP client build errors for either service
    pub fn new(config: &AppConfig) -> Result<Self> {
        let retrieval: Arc<dyn DocumentRetrieval> = Arc::new(RetrievalClient::from_config(config)?);
        let llm: Arc<dyn LanguageModel> = Arc::new(LlmService::from_config(config)?);
        let context_assembler = ContextAssembler::new(config.llm.max_context_chars);

        Ok(Self {
            retriever: Retriever::new(retrieval),
            synthesizer: AnswerSynthesizer::with_context_assembler(llm, context_assembler),
            default_top_k: config.default_top_k(),
        })
    }

    /// Create from existing services
    #[must_use]
    pub fn from_services(
        retrieval: Arc<dyn DocumentRetrieval>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            retriever: Retriever::new(retrieval),
            synthesizer: AnswerSynthesizer::new(llm),
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Replace the context budget used for prompts and citations
    #[must_use]
    pub fn with_context_assembler(mut self, context_assembler: ContextAssembler) -> Self {
        self.synthesizer = self.synthesizer.replace_context_assembler(context_assembler);
        self
    }

    /// Passages retrieved when a request does not specify `top_k`
    #[must_use]
    pub const fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Answer a question from one tenant's documents
    ///
    /// # Errors
    /// - [`CiteRagError::InvalidInput`] for a blank query or client id, or `top_k == 0`
    /// - [`CiteRagError::SynthesisFailed`] when the language model call fails
    ///
    /// A failing retrieval service is not an error: it yields the canned
    /// "no relevant information" answer.
    pub async fn answer_query(
        &self,
        query: &str,
        client_id: &str,
        top_k: usize,
    ) -> Result<AnswerResult> {
        self.query_with_options(RagQuery {
            question: query.to_string(),
            client_id: client_id.to_string(),
            top_k,
        })
        .await
    }

    /// Perform RAG query with explicit options
    pub async fn query_with_options(&self, query: RagQuery) -> Result<AnswerResult> {
        query.validate()?;
        info!(
            "Processing query for client {}: {}",
            query.client_id, query.question
        );

        // Step 1: Scope to the tenant
        let scope = TenantScope::for_client(&query.client_id);

        // Step 2: Retrieve relevant passages
        debug!("Step 2: Retrieving passages");
        let retrieved = self
            .retriever
            .retrieve(&query.question, &scope, query.top_k)
            .await;

        if retrieved.is_empty() {
            info!("No passages found in {} for: {}", scope, query.question);
            return Ok(AnswerResult::no_results());
        }

        // Step 3: Cite exactly the passages that fit into the prompt
        let passages = self.synthesizer.context_assembler().fit(&retrieved);
        if passages.len() < retrieved.len() {
            debug!(
                "Context budget keeps {} of {} passages",
                passages.len(),
                retrieved.len()
            );
        }
        let citations = build_citations(passages);

        // Step 4: Generate answer using LLM
        debug!("Step 4: Generating answer");
        let answer = self.synthesizer.synthesize(&query.question, passages).await?;

        info!(
            "Query for client {} answered with {} citations",
            query.client_id,
            citations.len()
        );

        Ok(AnswerResult {
            answer: answer.answer_text,
            citations,
        })
    }

    /// Get retriever reference
    #[must_use]
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Get synthesizer reference
    #[must_use]
    pub const fn synthesizer(&self) -> &AnswerSynthesizer {
        &self.synthesizer
    }
}
