use serde::Deserialize;
use serde::Serialize;

/// Answer returned when retrieval finds nothing for the tenant
pub const NO_RESULTS_ANSWER: &str = "No relevant information found for your query.";

/// Page marker used when the retrieval service did not report a page
pub const PAGE_NOT_AVAILABLE: &str = "N/A";

/// A retrieved unit of text with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub document_id: String,
    pub chunk_id: String,
    pub page_number: Option<u32>,
    /// Relevance score, higher is more relevant
    pub score: f64,
}

/// Display-ready reference to a passage, numbered like the `[n]` markers in the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// 1-based ordinal in retrieval order
    pub id: usize,
    pub document_id: String,
    pub chunk_id: String,
    /// Truncated preview of the passage text
    pub text: String,
    /// Page number, or `"N/A"`
    pub page_number: String,
    pub score: f64,
}

/// Answer text plus the citations it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub citations: Vec<Citation>,
}

impl AnswerResult {
    /// Canned result for a query with no retrieved passages
    #[must_use]
    pub fn no_results() -> Self {
        Self {
            answer: NO_RESULTS_ANSWER.to_string(),
            citations: Vec::new(),
        }
    }

    /// Whether this is the canned "nothing found" answer
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.citations.is_empty() && self.answer == NO_RESULTS_ANSWER
    }
}

/// Indexing state of a document, owned by the retrieval service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Partitioning,
    Chunking,
    Indexed,
    Ready,
    Failed,
}

impl DocumentStatus {
    /// Whether the document can be retrieved from
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether the service has stopped working on the document
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partitioning => "partitioning",
            Self::Chunking => "chunking",
            Self::Indexed => "indexed",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl From<&str> for DocumentStatus {
    fn from(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "partitioning" | "partitioned" => Self::Partitioning,
            "refined" | "chunking" | "chunked" => Self::Chunking,
            "indexing" | "indexed" | "summary_indexed" | "keyword_indexed" => Self::Indexed,
            "ready" => Self::Ready,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl From<String> for DocumentStatus {
    fn from(status: String) -> Self {
        Self::from(status.as_str())
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document as reported by the retrieval service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub partition: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// File content to upload for indexing
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
