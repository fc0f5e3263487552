//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, overrides and validation.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use crate::config::*;
    use crate::errors::CiteRagError;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.retrieval.api_token = "ragie-token".to_string();
        config.llm.llm_key = "sk-test".to_string();
        config
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ====== Default Value Tests ======

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.retrieval_endpoint(), "https://api.ragie.ai");
        assert_eq!(config.default_top_k(), 8);
        assert!(config.retrieval.rerank);
        assert!(config.retrieval.recency_bias);
        assert_eq!(config.llm_endpoint(), "https://api.openai.com/v1");
        assert_eq!(config.llm_model(), "gpt-4o");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins, vec!["*".to_string()]);
        assert!(config.is_development());
        assert!(config.webhook.base_url.is_none());
    }

    // ====== File Parsing Tests ======

    #[test]
    fn test_from_file_partial_sections_fill_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[retrieval]
api_token = "file-token"
default_top_k = 5

[llm]
llm_key = "file-key"
llm_model = "gpt-4o-mini"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.retrieval.api_token, "file-token");
        assert_eq!(config.default_top_k(), 5);
        assert_eq!(config.retrieval.max_attempts, 3);
        assert_eq!(config.llm_model(), "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retrieval\napi_token = ").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(CiteRagError::TomlParsing(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(CiteRagError::Io(_))));
    }

    // ====== Environment Override Tests ======

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[
            ("RAGIE_API_TOKEN", "env-token"),
            ("RAGIE_SERVER_URL", "http://localhost:9000"),
            ("OPENAI_API_KEY", "env-key"),
            ("OPENAI_MODEL", "gpt-4.1"),
            ("API_ENV", "production"),
            ("API_SECRET_KEY", "s3cret"),
            ("API_PORT", "9100"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("WEBHOOK_BASE_URL", "https://hooks.example"),
        ]));

        assert_eq!(config.retrieval.api_token, "env-token");
        assert_eq!(config.retrieval_endpoint(), "http://localhost:9000");
        assert_eq!(config.llm.llm_key, "env-key");
        assert_eq!(config.llm_model(), "gpt-4.1");
        assert!(config.is_production());
        assert_eq!(config.server.secret_key, "s3cret");
        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(
            config.webhook.base_url.as_deref(),
            Some("https://hooks.example")
        );
    }

    #[test]
    fn test_overrides_ignore_blank_and_invalid_values() {
        let mut config = valid_config();
        config.apply_overrides(lookup_from(&[("RAGIE_API_TOKEN", "   "), ("API_PORT", "eighty")]));

        assert_eq!(config.retrieval.api_token, "ragie-token");
        assert_eq!(config.server.port, 8000);
    }

    // ====== Validation Tests ======

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_retrieval_token() {
        let mut config = valid_config();
        config.retrieval.api_token.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RAGIE_API_TOKEN"));
    }

    #[test]
    fn test_validate_missing_llm_key() {
        let mut config = valid_config();
        config.llm.llm_key.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_validate_default_secret_in_production() {
        let mut config = valid_config();
        config.server.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.server.secret_key = "rotated".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_endpoint() {
        let mut config = valid_config();
        config.retrieval.endpoint = "not a url".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, CiteRagError::ConfigError(_)));
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
        let config = AppConfig::from_file(path).unwrap();

        assert_eq!(config.retrieval.endpoint, "https://api.ragie.ai");
        assert_eq!(config.default_top_k(), 8);
        assert_eq!(config.llm_model(), "gpt-4o");
        assert_eq!(config.llm.max_context_chars, 24_000);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
        assert!(config.webhook.base_url.is_none());
        assert!(config.llm.temperature.is_none());
        assert!(config.logging.level.is_none());
    }

    // ====== Log Level Tests ======

    #[test]
    fn test_log_level_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), "debug");

        config.apply_overrides(lookup_from(&[("API_ENV", "production")]));
        assert_eq!(config.log_level(), "info");

        config.server.environment = "staging".to_string();
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_explicit_log_level_wins_over_environment() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[("LOG_LEVEL", "warn")]));
        assert_eq!(config.log_level(), "warn");

        config.logging.level = Some("  ".to_string());
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_log_filter_prefers_rust_log() {
        let mut config = AppConfig::default();
        config.server.environment = "production".to_string();

        assert_eq!(config.log_filter(None), "info,citerag=info");
        assert_eq!(config.log_filter(Some("")), "info,citerag=info");
        assert_eq!(
            config.log_filter(Some("trace,hyper=warn")),
            "trace,hyper=warn"
        );
    }
}
