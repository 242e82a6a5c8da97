//! Configuration loading and validation

#[cfg(test)]
mod tests {
    use docuprox_batch::config::{Config, LogFormat, env_vars};
    use docuprox_batch::{ConfigError, DOCUPROX_PROCESS_URL};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let file = write_config("logging:\n  format: json\n");
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.api.endpoint, DOCUPROX_PROCESS_URL);
        assert_eq!(config.api.timeout_ms, 60_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[tokio::test]
    async fn test_env_wins_over_file() {
        let file = write_config(
            "api:\n  api_key: file-key\n  endpoint: https://staging.docuprox.com/v1/process\n",
        );
        let config = Config::from_file(file.path())
            .await
            .unwrap()
            .with_overrides(|name| match name {
                env_vars::API_KEY => Some("env-key".to_string()),
                env_vars::TIMEOUT_MS => Some("1500".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.api.endpoint, "https://staging.docuprox.com/v1/process");
        assert_eq!(config.api.timeout_ms, 1500);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let file = write_config("api: [not, a, map");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_round_trip_yaml_keeps_settings() {
        let mut config = Config::default();
        config.batch.continue_on_failure = true;
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml_str(&yaml).unwrap();
        assert!(parsed.batch.continue_on_failure);
    }
}
