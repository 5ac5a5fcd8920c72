// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing pipeline for the Triago workspace.
//!
//! This crate provides:
//! - [`LanguageDetector`]: offline heuristic language detection
//! - [`LexicalIntentModel`]: deterministic stand-in for the primary model
//! - [`FallbackClassifier`]: regex safety net for offline degradation
//! - [`schema`]: the router output contract and its hard validation gate
//! - [`RouterService`]: orchestration, budgets, and failure policy
//!
//! The service degrades deterministically: when the primary capability is
//! unavailable or times out, requests re-route through the fallback rules
//! and the triggering failure is preserved in output metadata for audit.
//! Policy failures (content violations) and contract failures (schema
//! violations) are never degraded.

pub mod fallback;
pub mod language;
pub mod primary;
pub mod schema;
pub mod service;

pub use fallback::{FallbackClassifier, FallbackRule};
pub use language::LanguageDetector;
pub use primary::LexicalIntentModel;
pub use schema::{validate_router_output, validate_router_output_value, ROUTER_OUTPUT_SCHEMA};
pub use service::RouterService;
