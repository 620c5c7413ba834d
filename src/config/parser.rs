use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[enrichment]
max-concurrent-requests = 20
site-request-delay-millis = 15000
max-fetch-attempts = 3

[http]
user-agent = "Mozilla/5.0 (compatible; quill-enrich/0.1)"
request-timeout-secs = 30

[inference]
endpoint = "https://api.genderize.io"
confidence-threshold = 0.9
request-delay-millis = 200

[io]
input-path = "data/clean_books.csv"
output-path = "data/enriched_books.csv"
manual-overrides-path = "data/gender_manual.csv"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.enrichment.max_concurrent_requests, 20);
        assert_eq!(config.enrichment.site_request_delay_millis, 15000);
        assert_eq!(config.enrichment.max_fetch_attempts, 3);
        // backoff-unit-millis defaults when omitted
        assert_eq!(config.enrichment.backoff_unit_millis, 1000);
        assert_eq!(config.inference.confidence_threshold, 0.9);
        assert_eq!(config.io.input_path, "data/clean_books.csv");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is not [valid toml");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_section() {
        let file = create_temp_config("[enrichment]\nmax-concurrent-requests = 5\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_failing_validation() {
        let bad = VALID_CONFIG.replace("confidence-threshold = 0.9", "confidence-threshold = 1.5");
        let file = create_temp_config(&bad);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
