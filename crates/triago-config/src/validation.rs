// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: positive budgets, usable intent labels, and the existence of
//! the local model assets. Configuration failures are fatal and raised once,
//! at construction; routing calls never see them.

use crate::diagnostic::ConfigError;
use crate::model::TriagoConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TriagoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.router.max_batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "router.max_batch_size must be greater than zero".to_string(),
        });
    }

    if config.router.max_prompt_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "router.max_prompt_chars must be greater than zero".to_string(),
        });
    }

    if !(config.router.latency_budget_seconds > 0.0
        && config.router.latency_budget_seconds.is_finite())
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.latency_budget_seconds must be a positive finite number, got {}",
                config.router.latency_budget_seconds
            ),
        });
    }

    if config.router.memory_budget_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "router.memory_budget_bytes must be greater than zero".to_string(),
        });
    }

    if !(config.router.fallback_timeout_seconds > 0.0
        && config.router.fallback_timeout_seconds.is_finite())
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.fallback_timeout_seconds must be a positive finite number, got {}",
                config.router.fallback_timeout_seconds
            ),
        });
    }

    if config.router.classification_labels.is_empty() {
        errors.push(ConfigError::Validation {
            message: "router.classification_labels must not be empty".to_string(),
        });
    }

    // Labels shorter than the schema's minimum intent length could never
    // survive output validation.
    for label in &config.router.classification_labels {
        if label.trim().len() < 3 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "router.classification_labels entry `{label}` is shorter than 3 characters"
                ),
            });
        }
    }

    if config.router.router_version.trim().len() < 3 {
        errors.push(ConfigError::Validation {
            message: "router.router_version must describe the deployed model".to_string(),
        });
    }

    if !config.model.weights_path.exists() {
        errors.push(ConfigError::MissingAsset {
            path: config.model.weights_path.display().to_string(),
        });
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

    fn config_with_weights(dir: &std::path::Path) -> TriagoConfig {
        let mut config = TriagoConfig::default();
        config.model.weights_path = dir.to_path_buf();
        config
    }

    #[test]
    fn default_config_with_existing_weights_validates() {
        let weights = tempfile::tempdir().unwrap();
        let config = config_with_weights(weights.path());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn missing_weights_path_fails_validation() {
        let mut config = TriagoConfig::default();
        config.model.weights_path = "/nonexistent/qwen-30b".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingAsset { .. })));
    }

    #[test]
    fn zero_batch_size_fails_validation() {
        let weights = tempfile::tempdir().unwrap();
        let mut config = config_with_weights(weights.path());
        config.router.max_batch_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_batch_size"))
        ));
    }

    #[test]
    fn zero_prompt_chars_fails_validation() {
        let weights = tempfile::tempdir().unwrap();
        let mut config = config_with_weights(weights.path());
        config.router.max_prompt_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_prompt_chars"))
        ));
    }

    #[test]
    fn non_positive_latency_budget_fails_validation() {
        let weights = tempfile::tempdir().unwrap();
        let mut config = config_with_weights(weights.path());
        config.router.latency_budget_seconds = 0.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("latency_budget_seconds"))
        ));
    }

    #[test]
    fn short_label_fails_validation() {
        let weights = tempfile::tempdir().unwrap();
        let mut config = config_with_weights(weights.path());
        config.router.classification_labels.push("ok".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("`ok`"))
        ));
    }

    #[test]
    fn all_errors_are_collected_not_fail_fast() {
        let mut config = TriagoConfig::default();
        config.router.max_batch_size = 0;
        config.router.max_prompt_chars = 0;
        config.model.weights_path = "/nonexistent".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
