//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use crate::error::AdvisorError;

    fn key() -> Option<String> {
        Some("gsk_test".to_string())
    }

    // ============= Defaults Tests =============

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::from_sources(None, key()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(
            config.llm.base_url.as_deref(),
            Some("https://api.groq.com/openai/v1")
        );
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.market.base_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.market.timeout_secs, 10);
        assert_eq!(config.advisor.max_tool_rounds, 4);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_sources(Some("\u{feff}\n"), key()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    // ============= YAML Tests =============

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 3000
llm:
  base_url: http://localhost:1234/v1
  model: llama-3.1-8b-instant
market:
  base_url: http://localhost:9000/
  user_agent: test-agent
  timeout_secs: 3
advisor:
  max_tool_rounds: 2
"#;
        let config = AppConfig::from_sources(Some(yaml), key()).unwrap();

        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.base_url.as_deref(), Some("http://localhost:1234/v1"));
        assert_eq!(config.market.user_agent, "test-agent");
        assert_eq!(config.market.timeout_secs, 3);
        assert_eq!(config.advisor.max_tool_rounds, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
server:
  port: 9090
"#;
        let config = AppConfig::from_sources(Some(yaml), key()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.advisor.max_tool_rounds, 4);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_sources(Some("server: [1, 2"), key()).unwrap_err();
        assert!(matches!(err, AdvisorError::Yaml(_)));
    }

    // ============= API Key Tests =============

    #[test]
    fn test_missing_api_key_fails() {
        let err = AppConfig::from_sources(None, None).unwrap_err();
        match err {
            AdvisorError::Config(msg) => assert!(msg.contains("GROQ_API_KEY")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_api_key_fails() {
        assert!(AppConfig::from_sources(None, Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_api_key_from_yaml() {
        let yaml = r#"
llm:
  api_key: gsk_from_yaml
"#;
        let config = AppConfig::from_sources(Some(yaml), None).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_from_yaml"));
    }

    #[test]
    fn test_env_api_key_wins_over_yaml() {
        let yaml = r#"
llm:
  api_key: gsk_from_yaml
"#;
        let config = AppConfig::from_sources(Some(yaml), key()).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_test"));
    }
}
