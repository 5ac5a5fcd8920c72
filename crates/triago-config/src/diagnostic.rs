// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types for configuration loading and validation.
//!
//! Figment deserialization failures and semantic validation failures are
//! both rendered as miette diagnostics so operators get actionable messages
//! at startup instead of a routing-time surprise.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// TOML or environment input failed to deserialize into the model.
    #[error("failed to parse configuration: {message}")]
    #[diagnostic(
        code(triago::config::parse),
        help("check triago.toml and TRIAGO_* environment overrides against the documented keys")
    )]
    Parse {
        /// The underlying figment error, flattened to one message.
        message: String,
    },

    /// A semantic constraint on a config value was violated.
    #[error("validation error: {message}")]
    #[diagnostic(code(triago::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// A required local asset referenced by the config does not exist.
    #[error("local model weights expected at '{path}' but were not found")]
    #[diagnostic(
        code(triago::config::missing_asset),
        help("set model.weights_path to the directory holding the local weights")
    )]
    MissingAsset {
        /// The configured path that failed the existence check.
        path: String,
    },
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may contain multiple underlying failures; each becomes
/// its own diagnostic so all problems are reported in one startup pass.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| ConfigError::Parse {
            message: error.to_string(),
        })
        .collect()
}

/// Flatten a list of config errors into the single fatal message carried by
/// `RouterError::Config`.
pub fn render_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
