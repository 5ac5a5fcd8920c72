// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline lexical stand-in for the primary intent model.
//!
//! `LexicalIntentModel` emulates a local Qwen-30B classification pass with
//! an ordered pattern table, keeping the whole pipeline deterministic and
//! network-free. The router service consumes it only through the
//! [`IntentClassifier`] capability, so a real inference backend can replace
//! it without touching orchestration.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use triago_config::TriagoConfig;
use triago_core::{
    ClassifyError, IntentClassifier, LanguageContext, Metadata, ModelPrediction,
    RoutingRequest,
};

/// Confidence when a specific intent pattern matches.
const MATCH_CONFIDENCE: f64 = 0.9;

/// Confidence for the catch-all intent. Confidence here is a discrete
/// signal of "specific pattern matched" versus "no match", not a continuous
/// probability.
const CATCH_ALL_CONFIDENCE: f64 = 0.6;

/// Ordered intent pattern table; first match wins, the final entry matches
/// anything.
static INTENT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "billing_support",
            Regex::new(r"(?i)billing|invoice|refund|factura|facture|rechnung").unwrap(),
        ),
        (
            "technical_support",
            Regex::new(r"(?i)error|bug|issue|problema|falla|störung").unwrap(),
        ),
        (
            "sales_inquiry",
            Regex::new(r"(?i)buy|purchase|pricing|quote|precio|cotización").unwrap(),
        ),
        (
            "account_security",
            Regex::new(r"(?i)password|login|contraseña|kennwort|mot de passe").unwrap(),
        ),
        ("general_inquiry", Regex::new(r"(?s).*").unwrap()),
    ]
});

/// Financial-advice solicitation lexicon. A hit is a policy decision, not an
/// availability failure: it always fails the call, in every mode.
static FINANCIAL_GUARDRAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)financial advice|stock tip|investment recommendation|crypto pick")
        .unwrap()
});

/// Offline-friendly heuristic classifier emulating Qwen-30B.
pub struct LexicalIntentModel {
    config: Arc<TriagoConfig>,
}

impl LexicalIntentModel {
    pub fn new(config: Arc<TriagoConfig>) -> Self {
        Self { config }
    }

    /// The prompt an inference backend would receive for this utterance.
    ///
    /// Recorded (truncated) in prediction metadata so decisions can be
    /// replayed against a real model later.
    fn build_prompt(&self, text: &str, language_code: &str) -> String {
        let labels = self.config.router.classification_labels.join(", ");
        format!(
            "System: You are Qwen-30B operating fully offline with local weights. \
             Classify the provided utterance into one of the following intents: {labels}. \
             Only return the canonical intent name and reasoning. \
             User language={language_code}. Utterance: ```{text}```"
        )
    }

    fn infer_intent(text: &str) -> (&'static str, String) {
        for (intent, pattern) in INTENT_PATTERNS.iter() {
            if pattern.is_match(text) {
                return (intent, format!("Matched lexical pattern '{}'", pattern.as_str()));
            }
        }
        // Unreachable while the table ends in a catch-all; kept so a
        // reordered table still produces a valid prediction.
        ("general_inquiry", "No high-confidence lexical match".to_string())
    }
}

#[async_trait]
impl IntentClassifier for LexicalIntentModel {
    async fn classify(
        &self,
        batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError> {
        if self.config.router.offline_mode {
            return Err(ClassifyError::Unavailable(
                "Offline mode enforced; model skipped".to_string(),
            ));
        }

        let max_prompt_chars = self.config.router.max_prompt_chars;
        let mut predictions = Vec::with_capacity(batch.len());
        for (request, language) in batch {
            let language_code = language.language.to_string();
            let truncated: String =
                request.text.trim().chars().take(max_prompt_chars).collect();

            if FINANCIAL_GUARDRAIL.is_match(&truncated) {
                return Err(ClassifyError::ContentViolation(
                    "Financial advice prompts are not permitted in the intent router"
                        .to_string(),
                ));
            }

            let prompt = self.build_prompt(&truncated, &language_code);
            let (intent, reasoning) = Self::infer_intent(&truncated);
            let confidence = if intent == "general_inquiry" {
                CATCH_ALL_CONFIDENCE
            } else {
                MATCH_CONFIDENCE
            };

            let mut metadata = Metadata::new();
            metadata.insert(
                "language_detector_confidence".into(),
                json!(language.confidence),
            );
            metadata.insert(
                "prompt_excerpt".into(),
                json!(prompt.chars().take(160).collect::<String>()),
            );
            metadata.insert(
                "model_path".into(),
                json!(self.config.model.weights_path.display().to_string()),
            );
            metadata.insert(
                "classification_labels".into(),
                json!(self.config.router.classification_labels),
            );

            predictions.push(ModelPrediction {
                intent: intent.to_string(),
                confidence,
                reasoning,
                language: language.language,
                fallback_used: false,
                metadata,
            });
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triago_core::Lang;

    fn model(mutate: impl FnOnce(&mut TriagoConfig)) -> LexicalIntentModel {
        let mut config = TriagoConfig::default();
        mutate(&mut config);
        LexicalIntentModel::new(Arc::new(config))
    }

    fn pair(text: &str, language: Lang) -> (RoutingRequest, LanguageContext) {
        (
            RoutingRequest::new(text),
            LanguageContext {
                language,
                confidence: 0.5,
                source: "lingua-offline",
            },
        )
    }

    #[tokio::test]
    async fn offline_mode_fails_before_any_per_item_work() {
        let model = model(|c| c.router.offline_mode = true);
        // The batch contains a guardrail phrase, but offline mode is checked
        // first for the whole batch.
        let batch = vec![pair("give me a stock tip", Lang::En)];
        let err = model.classify(&batch).await.unwrap_err();
        assert_eq!(
            err,
            ClassifyError::Unavailable("Offline mode enforced; model skipped".into())
        );
    }

    #[tokio::test]
    async fn billing_pattern_scores_high_confidence() {
        let model = model(|_| {});
        let batch = vec![pair("Necesito ayuda con mi factura", Lang::Es)];
        let predictions = model.classify(&batch).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].intent, "billing_support");
        assert_eq!(predictions[0].confidence, 0.9);
        assert_eq!(predictions[0].language, Lang::Es);
        assert!(!predictions[0].fallback_used);
        assert!(predictions[0].reasoning.contains("lexical pattern"));
    }

    #[tokio::test]
    async fn catch_all_scores_lower_confidence() {
        let model = model(|_| {});
        let batch = vec![pair("tell me something interesting", Lang::En)];
        let predictions = model.classify(&batch).await.unwrap();
        assert_eq!(predictions[0].intent, "general_inquiry");
        assert_eq!(predictions[0].confidence, 0.6);
    }

    #[tokio::test]
    async fn guardrail_hit_fails_the_whole_batch() {
        let model = model(|_| {});
        let batch = vec![
            pair("where is my invoice", Lang::En),
            pair("I want an investment recommendation", Lang::En),
        ];
        let err = model.classify(&batch).await.unwrap_err();
        assert!(matches!(err, ClassifyError::ContentViolation(_)));
        assert!(!err.is_degradable());
    }

    #[tokio::test]
    async fn guardrail_only_sees_the_truncated_text() {
        // The solicitation phrase sits beyond the prompt budget, so the scan
        // never reaches it.
        let model = model(|c| c.router.max_prompt_chars = 16);
        let text = format!("{} stock tip please", "a".repeat(32));
        let batch = vec![pair(&text, Lang::En)];
        let predictions = model.classify(&batch).await.unwrap();
        assert_eq!(predictions[0].intent, "general_inquiry");
    }

    #[tokio::test]
    async fn predictions_preserve_batch_order() {
        let model = model(|_| {});
        let batch = vec![
            pair("refund my invoice", Lang::En),
            pair("password reset", Lang::En),
            pair("pricing for teams", Lang::En),
        ];
        let predictions = model.classify(&batch).await.unwrap();
        let intents: Vec<&str> = predictions.iter().map(|p| p.intent.as_str()).collect();
        assert_eq!(
            intents,
            vec!["billing_support", "account_security", "sales_inquiry"]
        );
    }

    #[tokio::test]
    async fn metadata_carries_prompt_excerpt_and_labels() {
        let model = model(|_| {});
        let batch = vec![pair("where is my invoice", Lang::En)];
        let predictions = model.classify(&batch).await.unwrap();
        let metadata = &predictions[0].metadata;
        let excerpt = metadata["prompt_excerpt"].as_str().unwrap();
        assert!(excerpt.chars().count() <= 160);
        assert!(excerpt.starts_with("System: You are Qwen-30B"));
        assert_eq!(
            metadata["classification_labels"].as_array().unwrap().len(),
            5
        );
        assert!(metadata["model_path"].as_str().is_some());
        assert_eq!(metadata["language_detector_confidence"], json!(0.5));
    }

    #[tokio::test]
    async fn technical_outranks_security_in_pattern_order() {
        let model = model(|_| {});
        let batch = vec![pair("there is an error with my password", Lang::En)];
        let predictions = model.classify(&batch).await.unwrap();
        assert_eq!(predictions[0].intent, "technical_support");
    }
}
