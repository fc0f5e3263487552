use thiserror::Error;

#[derive(Error, Debug)]
pub enum CiteRagError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Retrieval service unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Answer synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Unsupported file type: {0}. Supported types: pdf, docx, csv, txt")]
    UnsupportedFileType(String),

    #[error("Document upload failed: {0}")]
    UploadFailed(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{service} returned {status}: {message}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for CiteRagError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl CiteRagError {
    /// Whether repeating the same request may succeed.
    ///
    /// Transport failures, rate limiting and 5xx answers are transient;
    /// everything else will fail the same way again.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the error was caused by the caller rather than by us or a dependency.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::UnsupportedFileType(_))
    }
}

pub type Result<T> = std::result::Result<T, CiteRagError>;
