// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triago intent router.

use std::time::Duration;

use thiserror::Error;

/// Failures surfaced to callers of the router service.
///
/// Everything here is terminal for the call that raised it. Degradable
/// conditions (primary classifier unavailable or timing out) never appear in
/// this enum: the router recovers them internally via the fallback
/// classifier, so callers only ever see them reflected in
/// `metadata.fallback_reason` on successful outputs.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Construction-time misconfiguration or missing local model assets.
    /// Raised once, never during routing.
    #[error("configuration error: {0}")]
    Config(String),

    /// The whole-call latency budget was exceeded. Outputs already computed
    /// for earlier chunks of the same call are discarded.
    #[error("routing exceeded latency budget ({elapsed:?} elapsed of {budget:?})")]
    Timeout { elapsed: Duration, budget: Duration },

    /// Pre-flight admission rejection: the batch's estimated text payload
    /// would exceed the configured memory budget.
    #[error(
        "incoming batch of ~{estimated_bytes} bytes exceeds the memory budget of {budget_bytes} bytes"
    )]
    MemoryBudgetExceeded {
        estimated_bytes: u64,
        budget_bytes: u64,
    },

    /// A policy guardrail rejected an utterance inside the primary
    /// classifier. Always surfaced, never degraded to fallback.
    #[error("content violation: {0}")]
    ContentViolation(String),

    /// A router output failed the output schema contract. No output is ever
    /// returned or logged if it fails validation.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// A caller-supplied payload had an unsupported shape.
    #[error("invalid routing payload: {0}")]
    InvalidPayload(String),
}

/// Tagged failure channel for the primary classification capability.
///
/// Modeling the three classifier outcomes as a closed enum lets the router
/// service's "catch only these two kinds" rule be enforced by the type
/// system: `Unavailable` and `Timeout` degrade the chunk to the fallback
/// classifier, while `ContentViolation` propagates to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The model is disabled or its weights cannot be used.
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// The classifier gave up on the batch within its own time bound.
    #[error("classification timed out: {0}")]
    Timeout(String),

    /// A guardrail rejected an utterance. This is a policy decision, not an
    /// availability failure, and must never be degraded.
    #[error("content violation: {0}")]
    ContentViolation(String),
}

impl ClassifyError {
    /// Whether the router service may recover this failure by re-routing the
    /// chunk through the fallback classifier.
    pub fn is_degradable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}
