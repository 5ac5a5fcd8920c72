// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock primary classifiers for deterministic testing.
//!
//! Each mock exercises one branch of the router service's failure policy:
//! availability failures that degrade to fallback, contract-breaking
//! predictions that must be caught by schema validation, and slow
//! classifiers that run into the whole-call deadline.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use triago_core::{
    ClassifyError, IntentClassifier, LanguageContext, Metadata, ModelPrediction,
    RoutingRequest,
};

/// Always signals `Unavailable`, forcing every chunk through the fallback.
pub struct UnavailableClassifier {
    message: String,
}

impl UnavailableClassifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UnavailableClassifier {
    fn default() -> Self {
        Self::new("offline weights unavailable")
    }
}

#[async_trait]
impl IntentClassifier for UnavailableClassifier {
    async fn classify(
        &self,
        _batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError> {
        Err(ClassifyError::Unavailable(self.message.clone()))
    }
}

/// Always reports its own `Timeout`, which the router degrades to fallback.
pub struct TimeoutClassifier {
    message: String,
}

impl TimeoutClassifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for TimeoutClassifier {
    fn default() -> Self {
        Self::new("classification pass gave up")
    }
}

#[async_trait]
impl IntentClassifier for TimeoutClassifier {
    async fn classify(
        &self,
        _batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError> {
        Err(ClassifyError::Timeout(self.message.clone()))
    }
}

/// Returns predictions whose confidence breaks the output contract, to
/// prove schema validation is a hard gate rather than a clamp.
#[derive(Default)]
pub struct InvalidSchemaClassifier;

#[async_trait]
impl IntentClassifier for InvalidSchemaClassifier {
    async fn classify(
        &self,
        batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError> {
        Ok(batch
            .iter()
            .map(|(_, language)| ModelPrediction {
                intent: "bad_intent".to_string(),
                confidence: 1.5,
                reasoning: "confidence outside schema".to_string(),
                language: language.language,
                fallback_used: false,
                metadata: Metadata::new(),
            })
            .collect())
    }
}

/// Sleeps before answering, so the whole-call deadline fires first.
pub struct SlowClassifier {
    delay: Duration,
}

impl SlowClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl IntentClassifier for SlowClassifier {
    async fn classify(
        &self,
        batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError> {
        tokio::time::sleep(self.delay).await;
        Ok(batch
            .iter()
            .map(|(_, language)| {
                let mut metadata = Metadata::new();
                metadata.insert("slow".into(), json!(true));
                ModelPrediction {
                    intent: "general_inquiry".to_string(),
                    confidence: 0.6,
                    reasoning: "slow catch-all".to_string(),
                    language: language.language,
                    fallback_used: false,
                    metadata,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triago_core::Lang;

    fn batch() -> Vec<(RoutingRequest, LanguageContext)> {
        vec![(
            RoutingRequest::new("where is my invoice"),
            LanguageContext {
                language: Lang::En,
                confidence: 0.2,
                source: "lingua-offline",
            },
        )]
    }

    #[tokio::test]
    async fn unavailable_classifier_signals_unavailable() {
        let classifier = UnavailableClassifier::default();
        let err = classifier.classify(&batch()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Unavailable(_)));
        assert!(err.to_string().contains("offline weights unavailable"));
    }

    #[tokio::test]
    async fn timeout_classifier_signals_timeout() {
        let classifier = TimeoutClassifier::default();
        let err = classifier.classify(&batch()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Timeout(_)));
    }

    #[tokio::test]
    async fn invalid_schema_classifier_breaks_the_contract() {
        let classifier = InvalidSchemaClassifier;
        let predictions = classifier.classify(&batch()).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].confidence, 1.5);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_classifier_waits_before_answering() {
        let classifier = SlowClassifier::new(Duration::from_secs(5));
        let binding = batch();
        let sleeping = classifier.classify(&binding);
        let predictions = sleeping.await.unwrap();
        assert_eq!(predictions[0].intent, "general_inquiry");
    }
}
