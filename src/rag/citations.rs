//! Citation building
//!
//! Citations are numbered by position in the passage slice, the same
//! numbering [`crate::rag::ContextAssembler`] uses for the prompt, so a `[n]`
//! in the answer always points at `citations[n - 1]`.

use crate::models::Citation;
use crate::models::Passage;
use crate::models::PAGE_NOT_AVAILABLE;

/// Characters of passage text kept in a citation preview
pub const PREVIEW_CHARS: usize = 100;

/// Appended to a preview only when the passage text was cut
pub const ELLIPSIS: &str = "...";

/// Build one citation per passage, ordinals `1..=n` in input order
pub fn build_citations(passages: &[Passage]) -> Vec<Citation> {
    passages
        .iter()
        .enumerate()
        .map(|(idx, passage)| Citation {
            id: idx + 1,
            document_id: passage.document_id.clone(),
            chunk_id: passage.chunk_id.clone(),
            text: preview(&passage.text),
            page_number: passage
                .page_number
                .map_or_else(|| PAGE_NOT_AVAILABLE.to_string(), |page| page.to_string()),
            score: passage.score,
        })
        .collect()
}

/// First [`PREVIEW_CHARS`] characters, plus [`ELLIPSIS`] if anything was dropped
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
