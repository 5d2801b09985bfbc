// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes, non-zero batch sizes, and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::AttribConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AttribConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.pipeline.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "pipeline.log_level `{}` is not one of {}",
                config.pipeline.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let base_url = config.scoring.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("scoring.base_url `{base_url}` must be an http(s) URL"),
        });
    }

    if config.scoring.conv_type_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "scoring.conv_type_id must not be empty".to_string(),
        });
    }

    if config.scoring.batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "scoring.batch_size must be at least 1".to_string(),
        });
    }

    if config.scoring.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "scoring.timeout_secs must be at least 1".to_string(),
        });
    }

    for (key, value) in [
        ("scoring.api_key_file", &config.scoring.api_key_file),
        ("scoring.audit_path", &config.scoring.audit_path),
        ("report.output_path", &config.report.output_path),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&AttribConfig::default()).is_ok());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = AttribConfig::default();
        config.scoring.batch_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("batch_size"));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut config = AttribConfig::default();
        config.scoring.base_url = "ftp://api.example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("base_url"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = AttribConfig::default();
        config.pipeline.log_level = "verbose".to_string();
        config.storage.database_path = "  ".to_string();
        config.scoring.timeout_secs = 0;
        config.report.output_path = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "got: {errors:?}");
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = AttribConfig::default();
        config.pipeline.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
