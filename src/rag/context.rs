//! Context assembly from retrieved passages

use crate::models::Passage;

/// Separator between numbered context blocks
const BLOCK_SEPARATOR: &str = "\n\n";

/// Assembler for the numbered grounding block fed to the language model
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    /// Create a new context assembler with a character budget
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    #[must_use]
    pub const fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    /// Longest prefix of `passages` whose rendered blocks fit the budget
    ///
    /// The first passage is always kept, even when it alone exceeds the budget,
    /// so a successful retrieval never produces an empty context.
    #[must_use]
    pub fn fit<'a>(&self, passages: &'a [Passage]) -> &'a [Passage] {
        let mut total_length = 0;

        for (idx, passage) in passages.iter().enumerate() {
            let mut entry_length = Self::block(idx + 1, passage).chars().count();
            if idx > 0 {
                entry_length += BLOCK_SEPARATOR.len();
            }

            if idx > 0 && total_length + entry_length > self.max_context_length {
                return &passages[..idx];
            }
            total_length += entry_length;
        }

        passages
    }

    /// Render every passage as `[n] text`, numbered from 1 in slice order
    #[must_use]
    pub fn assemble(&self, passages: &[Passage]) -> String {
        passages
            .iter()
            .enumerate()
            .map(|(idx, passage)| Self::block(idx + 1, passage))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    fn block(ordinal: usize, passage: &Passage) -> String {
        format!("[{ordinal}] {}", passage.text)
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(24_000) // Default max context length in characters
    }
}
