// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing-backed compliance decision log.
//!
//! Every routing decision is serialized to one JSON line on the
//! `compliance_log` target, merged with a static extra-context map. The
//! append is fire-and-forget: serialization problems are logged and
//! swallowed, never raised back into the router.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{info, warn};

use triago_core::{DecisionEvent, TelemetrySink};

/// Target name for decision records, so deployments can route them to a
/// dedicated appender.
pub const COMPLIANCE_TARGET: &str = "compliance_log";

/// Structured logger that mirrors the internal compliance-log sink.
pub struct ComplianceLog {
    extra_context: HashMap<String, String>,
}

impl ComplianceLog {
    /// Create a log with no extra context.
    pub fn new() -> Self {
        Self {
            extra_context: HashMap::new(),
        }
    }

    /// Create a log that merges `extra_context` into every record.
    ///
    /// Event fields win on key collision, matching the merge order callers
    /// rely on when reconstructing decisions from the log.
    pub fn with_context(extra_context: HashMap<String, String>) -> Self {
        Self { extra_context }
    }
}

impl Default for ComplianceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for ComplianceLog {
    fn record(&self, event: DecisionEvent) {
        let mut payload = serde_json::Map::new();
        for (key, value) in &self.extra_context {
            payload.insert(key.clone(), Value::String(value.clone()));
        }

        match serde_json::to_value(&event) {
            Ok(Value::Object(fields)) => payload.extend(fields),
            Ok(_) | Err(_) => {
                warn!(target: COMPLIANCE_TARGET, "decision event could not be serialized");
                return;
            }
        }

        match serde_json::to_string(&payload) {
            Ok(serialized) => info!(target: COMPLIANCE_TARGET, "{serialized}"),
            Err(error) => {
                warn!(target: COMPLIANCE_TARGET, %error, "decision record dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use triago_core::{Lang, Metadata};

    fn sample_event() -> DecisionEvent {
        DecisionEvent {
            intent: "billing_support".into(),
            confidence: 0.9,
            language: Lang::Es,
            fallback_used: false,
            request_id: Some("req-42".into()),
            metadata: Metadata::new(),
            timestamp: "2026-08-07T12:00:00Z".into(),
        }
    }

    #[traced_test]
    #[test]
    fn record_emits_one_json_line() {
        let log = ComplianceLog::new();
        log.record(sample_event());
        assert!(logs_contain("billing_support"));
        assert!(logs_contain("req-42"));
    }

    #[traced_test]
    #[test]
    fn extra_context_is_merged_into_records() {
        let mut context = HashMap::new();
        context.insert("deployment".to_string(), "staging".to_string());
        let log = ComplianceLog::with_context(context);
        log.record(sample_event());
        assert!(logs_contain("staging"));
    }

    #[traced_test]
    #[test]
    fn event_fields_win_on_key_collision() {
        let mut context = HashMap::new();
        context.insert("intent".to_string(), "from_context".to_string());
        let log = ComplianceLog::with_context(context);
        log.record(sample_event());
        assert!(logs_contain("billing_support"));
        assert!(!logs_contain("from_context"));
    }
}
