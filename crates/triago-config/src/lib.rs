// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Triago intent router.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), environment variable overrides, and miette
//! diagnostic rendering. Configuration is immutable after construction:
//! validation failures are fatal at startup and never reach a routing call.
//!
//! # Usage
//!
//! ```no_run
//! use triago_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("router version: {}", config.router.router_version);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TriagoConfig;

/// Load configuration from `triago.toml` and env overrides, then validate.
///
/// Returns either a valid `TriagoConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<TriagoConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TriagoConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
