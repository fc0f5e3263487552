//! Grounded answer synthesis

use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::llm::prompts::build_grounded_prompt;
use crate::llm::prompts::GROUNDED_SYSTEM_PROMPT;
use crate::llm::LanguageModel;
use crate::models::Passage;
use crate::rag::markers::strip_invalid_markers;
use crate::rag::ContextAssembler;

/// Answer text produced from one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAnswer {
    pub answer_text: String,
}

/// Builds the grounded prompt and calls the language model once per answer
#[derive(Clone)]
pub struct AnswerSynthesizer {
    llm: Arc<dyn LanguageModel>,
    context_assembler: ContextAssembler,
}

impl AnswerSynthesizer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self::with_context_assembler(llm, ContextAssembler::default())
    }

    pub fn with_context_assembler(
        llm: Arc<dyn LanguageModel>,
        context_assembler: ContextAssembler,
    ) -> Self {
        Self {
            llm,
            context_assembler,
        }
    }

    #[must_use]
    pub fn replace_context_assembler(mut self, context_assembler: ContextAssembler) -> Self {
        self.context_assembler = context_assembler;
        self
    }

    #[must_use]
    pub const fn context_assembler(&self) -> &ContextAssembler {
        &self.context_assembler
    }

    /// Answer `query` from `passages`, citing them as `[1]..[n]` in slice order
    ///
    /// Markers outside `1..=n` in the model output are removed.
    ///
    /// # Errors
    /// - [`CiteRagError::SynthesisFailed`] when the completion call fails
    pub async fn synthesize(&self, query: &str, passages: &[Passage]) -> Result<SynthesizedAnswer> {
        let context = self.context_assembler.assemble(passages);
        let prompt = build_grounded_prompt(query, &context);
        debug!(
            "Synthesizing with {} ({} passages, {} context chars)",
            self.llm.model_name(),
            passages.len(),
            context.chars().count()
        );

        let raw = self
            .llm
            .complete(GROUNDED_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                error!("Language model call failed: {}", e);
                CiteRagError::SynthesisFailed(e.to_string())
            })?;

        let (answer_text, removed) = strip_invalid_markers(&raw, passages.len());
        if removed > 0 {
            warn!(
                "Removed {} citation markers outside 1..={} from the answer",
                removed,
                passages.len()
            );
        }

        Ok(SynthesizedAnswer { answer_text })
    }
}
