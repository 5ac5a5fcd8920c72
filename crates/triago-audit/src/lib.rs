// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compliance telemetry sinks for the Triago intent router.
//!
//! This crate provides:
//! - [`ComplianceLog`]: tracing-backed JSON-line decision log
//! - [`MemorySink`]: in-memory capture for tests
//!
//! Both implement [`triago_core::TelemetrySink`]. Appends are
//! fire-and-forget: a sink must never fail a routing call, which keeps the
//! audit trail an observer of the pipeline rather than a participant.

pub mod capture;
pub mod compliance;

pub use capture::MemorySink;
pub use compliance::{ComplianceLog, COMPLIANCE_TARGET};
