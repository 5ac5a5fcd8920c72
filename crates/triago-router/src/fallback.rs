// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic regex fallback classifier.
//!
//! The offline safety net engaged when the primary capability is
//! unavailable or times out. Rules are evaluated in declaration order with
//! first-match-wins semantics: billing outranks security, which outranks
//! sales, technical, and cancellation. Total: every request resolves to a
//! prediction, falling through to `general_inquiry` when no rule matches.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use triago_core::{LanguageContext, Metadata, ModelPrediction, RoutingRequest};

/// Confidence assigned when a specific fallback rule matches.
const RULE_CONFIDENCE: f64 = 0.75;

/// Confidence assigned to the default route.
const DEFAULT_CONFIDENCE: f64 = 0.45;

/// A single ordered fallback rule.
///
/// Static, configured once at classifier construction, immutable after.
#[derive(Debug, Clone)]
pub struct FallbackRule {
    /// Short rule name, recorded as `fallback_rule` in output metadata.
    pub name: String,
    /// Target intent the rule maps to.
    pub intent: String,
    /// Case-insensitive lexicon pattern.
    pub pattern: Regex,
    /// Reasoning template copied onto matching predictions.
    pub reasoning: String,
}

impl FallbackRule {
    fn new(name: &str, intent: &str, pattern: &str, reasoning: &str) -> Self {
        Self {
            name: name.to_string(),
            intent: intent.to_string(),
            pattern: Regex::new(pattern).expect("static fallback lexicon compiles"),
            reasoning: reasoning.to_string(),
        }
    }
}

static DEFAULT_RULES: LazyLock<Vec<FallbackRule>> = LazyLock::new(|| {
    vec![
        FallbackRule::new(
            "billing",
            "billing_support",
            r"(?i)billing|invoice|refund|factura|facture|rechnung|reembolso",
            "Billing lexicon matched during offline fallback",
        ),
        FallbackRule::new(
            "security",
            "account_security",
            r"(?i)password|login|contraseña|mot de passe|kennwort",
            "Account security lexicon matched during offline fallback",
        ),
        FallbackRule::new(
            "sales",
            "sales_inquiry",
            r"(?i)buy|purchase|pricing|quote|precio|cotización|angebot",
            "Sales lexicon matched during offline fallback",
        ),
        FallbackRule::new(
            "technical",
            "technical_support",
            r"(?i)error|bug|issue|falla|problema|panne",
            "Technical support lexicon matched during offline fallback",
        ),
        FallbackRule::new(
            "cancellation",
            "general_inquiry",
            r"(?i)cancel|close account|cerrar|annuler",
            "Cancellation keywords detected while offline",
        ),
    ]
});

/// Deterministic safety net when the primary model is offline or times out.
#[derive(Debug, Clone)]
pub struct FallbackClassifier {
    rules: Vec<FallbackRule>,
}

impl FallbackClassifier {
    /// Classifier with the default rule table.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }

    /// Classifier with a custom ordered rule table.
    pub fn with_rules(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// Route one request. Total: never fails, always marks
    /// `fallback_used = true`.
    ///
    /// `reason` is the string form of the failure that triggered the
    /// fallback, preserved in metadata for audit.
    pub fn route(
        &self,
        request: &RoutingRequest,
        language: &LanguageContext,
        reason: &str,
    ) -> ModelPrediction {
        let normalized = request.text.to_lowercase();
        let normalized = normalized.trim();

        for rule in &self.rules {
            if rule.pattern.is_match(normalized) {
                return ModelPrediction {
                    intent: rule.intent.clone(),
                    confidence: RULE_CONFIDENCE,
                    reasoning: rule.reasoning.clone(),
                    language: language.language,
                    fallback_used: true,
                    metadata: fallback_metadata(&rule.name, reason, language),
                };
            }
        }

        ModelPrediction {
            intent: "general_inquiry".to_string(),
            confidence: DEFAULT_CONFIDENCE,
            reasoning: "Default fallback route engaged".to_string(),
            language: language.language,
            fallback_used: true,
            metadata: fallback_metadata("default", reason, language),
        }
    }
}

impl Default for FallbackClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_metadata(rule: &str, reason: &str, language: &LanguageContext) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("fallback_rule".into(), json!(rule));
    metadata.insert("fallback_reason".into(), json!(reason));
    metadata.insert(
        "language_detector_confidence".into(),
        json!(language.confidence),
    );
    metadata
}
