// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the Triago pipeline.
//!
//! The classifier trait uses `#[async_trait]` for dynamic dispatch
//! compatibility, so a real inference backend can replace the offline
//! lexical stand-in without touching the router service.

pub mod classifier;
pub mod telemetry;

pub use classifier::IntentClassifier;
pub use telemetry::TelemetrySink;
