// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Triago configuration system.

use triago_config::model::TriagoConfig;
use triago_config::{load_and_validate_str, load_config_from_str, render_errors, ConfigError};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_triago_config() {
    let toml = r#"
[router]
router_version = "qwen-30b-intent-router-v2"
max_batch_size = 8
max_prompt_chars = 1024
latency_budget_seconds = 2.5
memory_budget_bytes = 1048576
classification_labels = ["billing_support", "general_inquiry"]
offline_mode = true
fallback_timeout_seconds = 0.5

[model]
weights_path = "/srv/models/qwen-30b"

[telemetry]
extra_context = { deployment = "staging", region = "eu-west-1" }
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.router.router_version, "qwen-30b-intent-router-v2");
    assert_eq!(config.router.max_batch_size, 8);
    assert_eq!(config.router.max_prompt_chars, 1024);
    assert_eq!(config.router.latency_budget_seconds, 2.5);
    assert_eq!(config.router.memory_budget_bytes, 1_048_576);
    assert_eq!(
        config.router.classification_labels,
        vec!["billing_support", "general_inquiry"]
    );
    assert!(config.router.offline_mode);
    assert_eq!(config.router.fallback_timeout_seconds, 0.5);
    assert_eq!(
        config.model.weights_path,
        std::path::PathBuf::from("/srv/models/qwen-30b")
    );
    assert_eq!(
        config.telemetry.extra_context.get("deployment").map(String::as_str),
        Some("staging")
    );
}

/// Unknown field in [router] section is rejected.
#[test]
fn unknown_field_in_router_produces_error() {
    let toml = r#"
[router]
max_batch_sze = 8
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("max_batch_sze"),
        "error should mention the unknown field, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.router.router_version, "qwen-30b-intent-router");
    assert_eq!(config.router.max_batch_size, 4);
    assert_eq!(config.router.max_prompt_chars, 2048);
    assert_eq!(config.router.latency_budget_seconds, 4.0);
    assert_eq!(config.router.memory_budget_bytes, 2 * 1024 * 1024 * 1024);
    assert!(!config.router.offline_mode);
    assert_eq!(config.router.classification_labels.len(), 5);
    assert!(config.telemetry.extra_context.is_empty());
}

/// load_and_validate_str surfaces both parse and validation failures.
#[test]
fn load_and_validate_collects_validation_errors() {
    let toml = r#"
[router]
max_batch_size = 0
max_prompt_chars = 0

[model]
weights_path = "/nonexistent/triago-weights"
"#;

    let errors = load_and_validate_str(toml).expect_err("invalid config must not validate");
    assert!(errors.len() >= 3);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::MissingAsset { .. })));

    let rendered = render_errors(&errors);
    assert!(rendered.contains("max_batch_size"));
    assert!(rendered.contains("max_prompt_chars"));
    assert!(rendered.contains("/nonexistent/triago-weights"));
}

/// A config whose weights directory exists validates end to end.
#[test]
fn load_and_validate_accepts_existing_weights() {
    let weights = tempfile::tempdir().expect("temp weights dir");
    let toml = format!(
        r#"
[model]
weights_path = "{}"
"#,
        weights.path().display()
    );

    let config = load_and_validate_str(&toml).expect("config should validate");
    assert_eq!(config.model.weights_path, weights.path());
}

/// Loading from an explicit file path picks up the file's values.
#[test]
fn load_from_path_reads_the_file() {
    let dir = tempfile::tempdir().expect("temp config dir");
    let path = dir.path().join("triago.toml");
    std::fs::write(
        &path,
        r#"
[router]
max_batch_size = 12
"#,
    )
    .expect("write config file");

    let config = triago_config::load_config_from_path(&path).expect("config should load");
    assert_eq!(config.router.max_batch_size, 12);
}

/// The serde model round-trips through TOML.
#[test]
fn config_round_trips_through_toml() {
    let config = TriagoConfig::default();
    let serialized = toml::to_string(&config).expect("default config serializes");
    let reparsed: TriagoConfig = toml::from_str(&serialized).expect("serialized config reparses");
    assert_eq!(reparsed.router.max_batch_size, config.router.max_batch_size);
    assert_eq!(
        reparsed.router.classification_labels,
        config.router.classification_labels
    );
}
