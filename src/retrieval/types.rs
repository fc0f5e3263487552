//! Wire types for the document retrieval service
//!
//! The service is not consistent about field names across versions, so the
//! response types accept every known spelling and normalize into [`Passage`]
//! and [`Document`].

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::models::Document;
use crate::models::Passage;

/// Body of `POST /retrievals`
#[derive(Debug, Serialize)]
pub struct RetrievalRequest<'a> {
    pub query: &'a str,
    pub partition: &'a str,
    pub top_k: usize,
    pub rerank: bool,
    pub recency_bias: bool,
}

/// Response of `POST /retrievals`
#[derive(Debug, Default, Deserialize)]
pub struct RetrievalResponse {
    #[serde(default)]
    pub chunks: Option<Vec<ScoredChunk>>,
    #[serde(default)]
    pub scored_chunks: Option<Vec<ScoredChunk>>,
}

impl RetrievalResponse {
    /// Passages in service order; `chunks` wins over `scored_chunks` when both are present
    pub fn into_passages(self) -> Vec<Passage> {
        self.chunks
            .or(self.scored_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(ScoredChunk::into_passage)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoredChunk {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub chunk_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub page_number: Value,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: Value,
}

impl ScoredChunk {
    pub fn into_passage(self) -> Passage {
        let page_number =
            page_from_value(&self.page_number).or_else(|| page_from_value(&self.metadata["page_number"]));

        Passage {
            text: self.text,
            document_id: self.document_id.unwrap_or_default(),
            chunk_id: self.chunk_id.or(self.id).unwrap_or_default(),
            page_number,
            score: self.score.unwrap_or(0.0),
        }
    }
}

/// Pages arrive as numbers or numeric strings; anything else counts as missing
fn page_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Response of `GET /documents`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DocumentListResponse {
    List(Vec<Document>),
    Wrapped { documents: Vec<Document> },
    Single(Document),
}

impl DocumentListResponse {
    pub fn into_documents(self) -> Vec<Document> {
        match self {
            Self::List(documents) | Self::Wrapped { documents } => documents,
            Self::Single(document) => vec![document],
        }
    }
}
