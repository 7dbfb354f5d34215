//! Configuration validation

use crate::Config;
use http::HeaderName;
use reqlog_core::{Error, Result};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_logging(config)?;
    validate_observability(config)?;

    Ok(())
}

fn validate_logging(config: &Config) -> Result<()> {
    let logging = &config.logging;

    if logging.max_field_length == 0 {
        return Err(Error::Config("max_field_length must be > 0".to_string()));
    }

    if logging.max_path_length == 0 {
        return Err(Error::Config("max_path_length must be > 0".to_string()));
    }

    if logging.auth_header.is_empty() {
        return Err(Error::Config("auth_header cannot be empty".to_string()));
    }

    validate_header_name("auth_header", &logging.auth_header)?;

    if let Some(ref header) = logging.correlation_header {
        validate_header_name("correlation_header", header)?;
    }

    if logging.placeholder.chars().count() > logging.max_field_length {
        tracing::warn!(
            placeholder = %logging.placeholder,
            "placeholder is longer than max_field_length and will be truncated"
        );
    }

    Ok(())
}

fn validate_observability(config: &Config) -> Result<()> {
    match config.observability.format.as_str() {
        "text" | "json" => {}
        other => {
            return Err(Error::Config(format!(
                "Invalid log format: {other} (must be text or json)"
            )));
        }
    }

    if config.observability.level.trim().is_empty() {
        return Err(Error::Config("observability level cannot be empty".to_string()));
    }

    Ok(())
}

fn validate_header_name(field: &str, name: &str) -> Result<()> {
    HeaderName::from_bytes(name.as_bytes())
        .map(|_| ())
        .map_err(|_| Error::Config(format!("{field} is not a valid header name: {name:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_lengths_rejected() {
        let mut config = Config::default();
        config.logging.max_field_length = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.logging.max_path_length = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_header_names_checked() {
        let mut config = Config::default();
        config.logging.auth_header = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.logging.correlation_header = Some("not a header".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("correlation_header"));

        let mut config = Config::default();
        config.logging.correlation_header = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut config = Config::default();
        config.observability.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }
}
