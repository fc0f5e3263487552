//! Prompts for grounded answering

/// System instruction for every grounded completion
pub const GROUNDED_SYSTEM_PROMPT: &str = r"You are a helpful assistant that answers questions strictly based on the provided context.
Always include citations to your sources using the format [n] where n is the number of the context block you used.
Cite every claim. Only cite numbers that appear in the context.
If the answer cannot be found in the context, state that clearly. Never make up information.";

/// Build the user turn from a numbered context block and the question
pub fn build_grounded_prompt(question: &str, context: &str) -> String {
    format!(
        r"Context:
{context}

Question: {question}

Answer the question based on the context provided. Use citations in the format [n] to reference your sources."
    )
}
