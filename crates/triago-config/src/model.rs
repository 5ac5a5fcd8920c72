// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triago intent router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Triago configuration.
///
/// Loaded from TOML with environment variable overrides. All sections are
/// optional and default to sensible values; validation of semantic
/// constraints happens separately in [`crate::validation`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriagoConfig {
    /// Router pipeline settings: budgets, batching, labels.
    #[serde(default)]
    pub router: RouterConfig,

    /// Local model asset settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Compliance telemetry settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Router pipeline configuration.
///
/// Immutable after construction; the router service reads it for the
/// lifetime of the process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Identifies the deployed classifier configuration, carried on every
    /// output for audit and reproducibility.
    #[serde(default = "default_router_version")]
    pub router_version: String,

    /// Maximum requests per classification chunk.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Utterances are truncated to this many characters before
    /// classification.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,

    /// Wall-clock budget for one whole `route_batch` call, shared across all
    /// of its chunks.
    #[serde(default = "default_latency_budget_seconds")]
    pub latency_budget_seconds: f64,

    /// Maximum estimated byte size of a batch's text payloads, checked
    /// before any classification work.
    #[serde(default = "default_memory_budget_bytes")]
    pub memory_budget_bytes: u64,

    /// Ordered set of intent names the primary classifier may emit.
    #[serde(default = "default_classification_labels")]
    pub classification_labels: Vec<String>,

    /// Forces the primary classifier to always signal unavailable, routing
    /// every request through the deterministic fallback.
    #[serde(default)]
    pub offline_mode: bool,

    /// Advisory bound on one fallback pass; overruns are logged, never
    /// failed.
    #[serde(default = "default_fallback_timeout_seconds")]
    pub fallback_timeout_seconds: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            router_version: default_router_version(),
            max_batch_size: default_max_batch_size(),
            max_prompt_chars: default_max_prompt_chars(),
            latency_budget_seconds: default_latency_budget_seconds(),
            memory_budget_bytes: default_memory_budget_bytes(),
            classification_labels: default_classification_labels(),
            offline_mode: false,
            fallback_timeout_seconds: default_fallback_timeout_seconds(),
        }
    }
}

fn default_router_version() -> String {
    "qwen-30b-intent-router".to_string()
}

fn default_max_batch_size() -> usize {
    4
}

fn default_max_prompt_chars() -> usize {
    2048
}

fn default_latency_budget_seconds() -> f64 {
    4.0
}

fn default_memory_budget_bytes() -> u64 {
    2 * 1024 * 1024 * 1024
}

fn default_classification_labels() -> Vec<String> {
    [
        "general_inquiry",
        "billing_support",
        "technical_support",
        "sales_inquiry",
        "account_security",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_fallback_timeout_seconds() -> f64 {
    0.3
}

/// Local model asset configuration.
///
/// The router asserts the weights path exists at construction time but never
/// inspects its content: the primary classifier here is an offline stand-in.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Directory holding the local model weights.
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
        }
    }
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("models/qwen-30b")
}

/// Compliance telemetry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Static context merged into every compliance log record.
    #[serde(default)]
    pub extra_context: HashMap<String, String>,
}
