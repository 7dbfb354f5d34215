//! Configuration loading

use crate::{Config, ConfigFormat};
use regex::Regex;
use reqlog_core::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;

/// Load configuration from a file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    let format = ConfigFormat::from_path(path)?;

    load_from_str(&content, format)
}

/// Expand environment variables in configuration string
/// Supports syntax: ${VAR} and ${VAR:-default}
fn expand_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}")
        .map_err(|e| Error::Config(format!("Invalid regex: {e}")))?;

    let mut result = String::with_capacity(content.len());
    let mut last_match = 0;

    for cap in re.captures_iter(content) {
        let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let var_name = var_name.as_str();
        let default_value = cap.get(3).map(|m| m.as_str());

        let value = match env::var(var_name) {
            Ok(val) => val,
            Err(_) => match default_value {
                Some(default) => default.to_string(),
                None => {
                    return Err(Error::Config(format!(
                        "Environment variable '{var_name}' not set and no default provided"
                    )));
                }
            },
        };

        result.push_str(&content[last_match..full_match.start()]);
        result.push_str(&value);
        last_match = full_match.end();
    }

    result.push_str(&content[last_match..]);

    Ok(result)
}

/// Load configuration from a string
pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<Config> {
    let expanded_content = expand_env_vars(content)?;

    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {e}")))?,
        ConfigFormat::Toml => toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {e}")))?,
        ConfigFormat::Json => serde_json::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse JSON: {e}")))?,
    };

    Ok(config)
}

/// Load a configuration file and validate it
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let config = load_from_file(path)?;

    crate::validator::validate_config(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqlog_middleware::IdGenerator;
    use std::io::Write;

    const YAML_CONFIG: &str = r#"
logging:
  max_field_length: 80
  max_path_length: 250
  placeholder: "-"
  auth_header: "x-api-key"
  correlation_header: "x-correlation-id"
  id_generator: "uuid_v7"

observability:
  level: "debug"
  format: "json"
"#;

    #[test]
    fn test_load_yaml() {
        let config = load_from_str(YAML_CONFIG, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.logging.max_field_length, 80);
        assert_eq!(config.logging.max_path_length, 250);
        assert_eq!(config.logging.placeholder, "-");
        assert_eq!(config.logging.auth_header, "x-api-key");
        assert_eq!(
            config.logging.correlation_header.as_deref(),
            Some("x-correlation-id")
        );
        assert_eq!(config.logging.id_generator, IdGenerator::UuidV7);
        assert_eq!(config.observability.format, "json");
    }

    #[test]
    fn test_load_toml() {
        let content = r#"
[logging]
max_field_length = 120

[observability]
level = "warn"
"#;
        let config = load_from_str(content, ConfigFormat::Toml).unwrap();

        assert_eq!(config.logging.max_field_length, 120);
        assert_eq!(config.logging.max_path_length, 500);
        assert_eq!(config.observability.level, "warn");
        assert_eq!(config.observability.format, "text");
    }

    #[test]
    fn test_null_correlation_header() {
        let content = r#"{"logging": {"correlation_header": null}}"#;
        let config = load_from_str(content, ConfigFormat::Json).unwrap();

        assert_eq!(config.logging.correlation_header, None);
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid = "invalid: [yaml";
        let result = load_from_str(invalid, ConfigFormat::Yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        env::set_var("REQLOG_TEST_MAX_FIELD", "42");

        let content = "logging:\n  max_field_length: ${REQLOG_TEST_MAX_FIELD}\n";
        let config = load_from_str(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.logging.max_field_length, 42);

        env::remove_var("REQLOG_TEST_MAX_FIELD");
    }

    #[test]
    fn test_env_var_with_default() {
        env::remove_var("REQLOG_TEST_UNDEFINED");

        let content = "logging:\n  placeholder: \"${REQLOG_TEST_UNDEFINED:-none}\"\n";
        let config = load_from_str(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.logging.placeholder, "none");
    }

    #[test]
    fn test_missing_env_var_no_default() {
        env::remove_var("REQLOG_TEST_MISSING");

        let result = load_from_str(
            "logging:\n  placeholder: ${REQLOG_TEST_MISSING}\n",
            ConfigFormat::Yaml,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("REQLOG_TEST_MISSING"));
    }

    #[test]
    fn test_multiple_env_vars() {
        env::set_var("REQLOG_TEST_A", "x");
        env::set_var("REQLOG_TEST_B", "y");

        let expanded = expand_env_vars("${REQLOG_TEST_A}-${REQLOG_TEST_B}-${REQLOG_TEST_C:-z}").unwrap();
        assert_eq!(expanded, "x-y-z");

        env::remove_var("REQLOG_TEST_A");
        env::remove_var("REQLOG_TEST_B");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.logging.max_field_length, 80);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"logging": {"max_path_length": 0}}"#).unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_path_length"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
