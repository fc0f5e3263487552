use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

/// Secret key shipped in the example configuration; must be replaced in production.
pub const DEFAULT_SECRET_KEY: &str = "dev-key-change-in-production";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_retrieval_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_true")]
    pub rerank: bool,
    #[serde(default = "default_true")]
    pub recency_bias: bool,
    #[serde(default = "default_retrieval_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub llm_endpoint: String,
    #[serde(default)]
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    /// Character budget for the numbered context block
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `development` or `production`
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Public base URL the retrieval service should call back; unset disables registration
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Unset means `debug` in development and `info` otherwise
    #[serde(default)]
    pub level: Option<String>,
}

fn default_retrieval_endpoint() -> String {
    "https://api.ragie.ai".to_string()
}

const fn default_top_k() -> usize {
    8
}

const fn default_true() -> bool {
    true
}

const fn default_retrieval_timeout() -> u64 {
    30
}

const fn default_max_attempts() -> usize {
    3
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o".to_string()
}

const fn default_max_context_chars() -> usize {
    24_000
}

const fn default_llm_timeout() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_retrieval_endpoint(),
            api_token: String::new(),
            default_top_k: default_top_k(),
            rerank: true,
            recency_bias: true,
            timeout_secs: default_retrieval_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_endpoint: default_llm_endpoint(),
            llm_key: String::new(),
            llm_model: default_llm_model(),
            temperature: None,
            max_tokens: None,
            max_context_chars: default_max_context_chars(),
            timeout_secs: default_llm_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            secret_key: default_secret_key(),
            allowed_origins: default_allowed_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default config file path, then apply environment overrides
    ///
    /// Tries `config.toml`, then `config.example.toml`, then built-in defaults.
    pub fn load() -> crate::Result<Self> {
        let mut config = if Path::new("config.toml").exists() {
            Self::from_file("config.toml")?
        } else if Path::new("config.example.toml").exists() {
            warn!("Using config.example.toml. Please create config.toml for production use.");
            Self::from_file("config.example.toml")?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in [`AppConfig::load`])
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("RAGIE_API_TOKEN") {
            self.retrieval.api_token = token;
        }
        if let Some(url) = non_empty("RAGIE_SERVER_URL") {
            self.retrieval.endpoint = url;
        }
        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.llm.llm_key = key;
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            self.llm.llm_model = model;
        }
        if let Some(env) = non_empty("API_ENV") {
            self.server.environment = env;
        }
        if let Some(secret) = non_empty("API_SECRET_KEY") {
            self.server.secret_key = secret;
        }
        if let Some(port) = non_empty("API_PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid API_PORT value: {}", port),
            }
        }
        if let Some(origins) = non_empty("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(base_url) = non_empty("WEBHOOK_BASE_URL") {
            self.webhook.base_url = Some(base_url);
        }
        if let Some(level) = non_empty("LOG_LEVEL") {
            self.logging.level = Some(level);
        }
    }

    /// Check that the settings needed to serve queries and uploads are present
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        if self.retrieval.api_token.trim().is_empty() {
            return Err(crate::CiteRagError::ConfigError(
                "RAGIE_API_TOKEN is not set in environment variables".to_string(),
            ));
        }
        if self.llm.llm_key.trim().is_empty() {
            return Err(crate::CiteRagError::ConfigError(
                "OPENAI_API_KEY is not set in environment variables".to_string(),
            ));
        }
        if self.is_production() && self.server.secret_key == DEFAULT_SECRET_KEY {
            return Err(crate::CiteRagError::ConfigError(
                "API_SECRET_KEY should be changed in production environment".to_string(),
            ));
        }
        for (name, endpoint) in [
            ("retrieval endpoint", &self.retrieval.endpoint),
            ("LLM endpoint", &self.llm.llm_endpoint),
        ] {
            if let Err(e) = url::Url::parse(endpoint) {
                return Err(crate::CiteRagError::ConfigError(format!(
                    "Invalid {name} '{endpoint}': {e}"
                )));
            }
        }
        Ok(())
    }

    /// Whether the server runs in production mode
    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("production")
    }

    /// Whether debug logging should be enabled by default
    pub fn is_development(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("development")
    }

    /// Log level from `[logging] level`, else by environment
    pub fn log_level(&self) -> &str {
        match self.logging.level.as_deref().map(str::trim) {
            Some(level) if !level.is_empty() => level,
            _ if self.is_development() => "debug",
            _ => "info",
        }
    }

    /// Filter directives for the subscriber; a non-empty `RUST_LOG` wins over the config
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() => directives.to_string(),
            _ => {
                let level = self.log_level();
                format!("{level},citerag={level}")
            }
        }
    }

    /// Get retrieval service endpoint
    pub fn retrieval_endpoint(&self) -> &str {
        &self.retrieval.endpoint
    }

    /// Get default number of passages to retrieve
    pub fn default_top_k(&self) -> usize {
        self.retrieval.default_top_k
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }
}
