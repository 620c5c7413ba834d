use crate::config::types::{Config, EnrichmentConfig, HttpConfig, InferenceConfig, IoConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_enrichment_config(&config.enrichment)?;
    validate_http_config(&config.http)?;
    validate_inference_config(&config.inference)?;
    validate_io_config(&config.io)?;
    Ok(())
}

/// Validates enrichment configuration
fn validate_enrichment_config(config: &EnrichmentConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.max_fetch_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_fetch_attempts must be >= 1, got {}",
            config.max_fetch_attempts
        )));
    }

    if config.backoff_unit_millis == 0 {
        return Err(ConfigError::Validation(
            "backoff_unit_millis must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates the inference API configuration
fn validate_inference_config(config: &InferenceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid inference endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Inference endpoint must be http(s), got '{}'",
            config.endpoint
        )));
    }

    if !(0.0..=1.0).contains(&config.confidence_threshold) {
        return Err(ConfigError::Validation(format!(
            "confidence_threshold must be within [0.0, 1.0], got {}",
            config.confidence_threshold
        )));
    }

    Ok(())
}

/// Validates input/output paths
fn validate_io_config(config: &IoConfig) -> Result<(), ConfigError> {
    if config.input_path.is_empty() {
        return Err(ConfigError::Validation(
            "input_path cannot be empty".to_string(),
        ));
    }

    if config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "output_path cannot be empty".to_string(),
        ));
    }

    if config.input_path == config.output_path {
        return Err(ConfigError::Validation(
            "output_path must differ from input_path".to_string(),
        ));
    }

    // The manual overrides file is allowed to be absent at run time, but the
    // configured path itself must be set.
    if config.manual_overrides_path.is_empty() {
        return Err(ConfigError::Validation(
            "manual_overrides_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
