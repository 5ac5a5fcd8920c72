// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merges compiled defaults, a `triago.toml` file, and `TRIAGO_` environment
//! variable overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriagoConfig;

/// Load configuration from the local `triago.toml` with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `./triago.toml`
/// 3. `TRIAGO_*` environment variables
pub fn load_config() -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file("triago.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriagoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriagoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIAGO_ROUTER_MAX_BATCH_SIZE` must map
/// to `router.max_batch_size`, not `router.max.batch.size`.
fn env_provider() -> Env {
    Env::prefixed("TRIAGO_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: TRIAGO_ROUTER_MAX_BATCH_SIZE -> "router_max_batch_size"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("router_", "router.", 1)
            .replacen("model_", "model.", 1)
            .replacen("telemetry_", "telemetry.", 1);
        mapped.into()
    })
}
