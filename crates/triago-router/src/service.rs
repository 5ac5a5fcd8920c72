// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The router service: orchestration and failure policy.
//!
//! One `route_batch` call runs synchronously and sequentially, chunk by
//! chunk: normalize, admit against the memory budget, detect languages,
//! classify under the remaining latency budget, degrade to the fallback on
//! availability failures only, validate every output, emit telemetry,
//! return in input order. Any stage can fail the whole call; no partial
//! success is ever returned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::{debug, warn};

use triago_audit::ComplianceLog;
use triago_config::TriagoConfig;
use triago_core::{
    ClassifyError, DecisionEvent, IntentClassifier, LanguageContext, Metadata,
    ModelPrediction, RouterError, RouterOutput, RoutingPayload, RoutingRequest,
    TelemetrySink,
};

use crate::fallback::FallbackClassifier;
use crate::language::LanguageDetector;
use crate::primary::LexicalIntentModel;
use crate::schema;

/// Coordinates language detection, primary classification, and fallbacks.
///
/// Stateless across calls apart from the read-only configuration and rule
/// tables and the process-lifetime telemetry sink, so concurrent calls on
/// one instance are independent and may run fully in parallel.
pub struct RouterService {
    config: Arc<TriagoConfig>,
    detector: LanguageDetector,
    fallback: FallbackClassifier,
    primary: Arc<dyn IntentClassifier>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl RouterService {
    /// Build a service from validated configuration with the default
    /// components: the offline lexical model and the compliance log.
    ///
    /// Configuration errors are fatal here and never surface during
    /// routing.
    pub fn new(config: TriagoConfig) -> Result<Self, RouterError> {
        triago_config::validation::validate_config(&config)
            .map_err(|errors| RouterError::Config(triago_config::render_errors(&errors)))?;
        let config = Arc::new(config);
        Ok(Self {
            detector: LanguageDetector::new(),
            fallback: FallbackClassifier::new(),
            primary: Arc::new(LexicalIntentModel::new(Arc::clone(&config))),
            telemetry: Arc::new(ComplianceLog::with_context(
                config.telemetry.extra_context.clone(),
            )),
            config,
        })
    }

    /// Replace the primary classification capability.
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.primary = classifier;
        self
    }

    /// Replace the telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Replace the fallback rule table.
    pub fn with_fallback(mut self, fallback: FallbackClassifier) -> Self {
        self.fallback = fallback;
        self
    }

    /// Route a single utterance. Sugar for a one-element [`route_batch`].
    ///
    /// [`route_batch`]: Self::route_batch
    pub async fn route(
        &self,
        text: &str,
        metadata: Option<Metadata>,
        request_id: Option<&str>,
        offline_override: bool,
    ) -> Result<RouterOutput, RouterError> {
        let request = RoutingRequest {
            text: text.to_string(),
            metadata: metadata.unwrap_or_default(),
            request_id: request_id.map(str::to_string),
        };
        let mut outputs = self
            .route_batch(vec![RoutingPayload::Request(request)], offline_override)
            .await?;
        outputs
            .pop()
            .ok_or_else(|| RouterError::InvalidPayload("empty routing batch".to_string()))
    }

    /// Route a batch of payloads, returning outputs in input order.
    pub async fn route_batch(
        &self,
        payloads: Vec<RoutingPayload>,
        offline_override: bool,
    ) -> Result<Vec<RouterOutput>, RouterError> {
        let normalized = normalize_payloads(payloads);
        self.enforce_memory_budget(&normalized)?;

        let budget = Duration::from_secs_f64(self.config.router.latency_budget_seconds);
        let started = Instant::now();
        debug!(
            requests = normalized.len(),
            max_batch_size = self.config.router.max_batch_size,
            "routing batch admitted"
        );

        let mut outputs = Vec::with_capacity(normalized.len());
        for chunk in normalized.chunks(self.config.router.max_batch_size) {
            self.check_latency_budget(started, budget)?;
            outputs.extend(
                self.route_chunk(chunk, offline_override, started, budget)
                    .await?,
            );
            self.check_latency_budget(started, budget)?;
        }
        Ok(outputs)
    }

    /// Route a batch of untyped payloads, rejecting unsupported shapes
    /// during normalization.
    pub async fn route_batch_values(
        &self,
        values: Vec<serde_json::Value>,
        offline_override: bool,
    ) -> Result<Vec<RouterOutput>, RouterError> {
        let payloads = values
            .into_iter()
            .map(RoutingPayload::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.route_batch(payloads, offline_override).await
    }

    async fn route_chunk(
        &self,
        chunk: &[RoutingRequest],
        offline_override: bool,
        started: Instant,
        budget: Duration,
    ) -> Result<Vec<RouterOutput>, RouterError> {
        let batch: Vec<(RoutingRequest, LanguageContext)> = chunk
            .iter()
            .map(|request| (request.clone(), self.detector.detect(&request.text)))
            .collect();

        let predictions = if offline_override {
            self.fall_back(&batch, "Offline override engaged")
        } else {
            let remaining = budget.saturating_sub(started.elapsed());
            match tokio::time::timeout(remaining, self.primary.classify(&batch)).await {
                Err(_deadline) => {
                    return Err(RouterError::Timeout {
                        elapsed: started.elapsed(),
                        budget,
                    });
                }
                Ok(Ok(predictions)) => predictions,
                Ok(Err(error)) if error.is_degradable() => {
                    warn!(reason = %error, "primary classifier degraded; engaging fallback");
                    self.fall_back(&batch, &error.to_string())
                }
                Ok(Err(ClassifyError::ContentViolation(message))) => {
                    return Err(RouterError::ContentViolation(message));
                }
                // is_degradable covers the remaining kinds; anything else
                // a classifier invents is treated like a policy violation.
                Ok(Err(error)) => {
                    return Err(RouterError::ContentViolation(error.to_string()));
                }
            }
        };

        let mut outputs = Vec::with_capacity(chunk.len());
        for ((request, language), prediction) in batch.iter().zip(predictions) {
            let output = self.build_output(request, prediction, language);
            schema::validate_router_output(&output)?;
            self.emit_telemetry(&output, request);
            outputs.push(output);
        }
        Ok(outputs)
    }

    fn fall_back(
        &self,
        batch: &[(RoutingRequest, LanguageContext)],
        reason: &str,
    ) -> Vec<ModelPrediction> {
        let pass_started = Instant::now();
        let predictions = batch
            .iter()
            .map(|(request, language)| self.fallback.route(request, language, reason))
            .collect();

        let advisory =
            Duration::from_secs_f64(self.config.router.fallback_timeout_seconds);
        if pass_started.elapsed() > advisory {
            warn!(
                elapsed_ms = pass_started.elapsed().as_millis() as u64,
                advisory_ms = advisory.as_millis() as u64,
                "fallback pass overran its advisory budget"
            );
        }
        predictions
    }

    fn build_output(
        &self,
        request: &RoutingRequest,
        prediction: ModelPrediction,
        language: &LanguageContext,
    ) -> RouterOutput {
        // Merge order matters: later entries win on key collision.
        let mut metadata = request.metadata.clone();
        metadata.extend(prediction.metadata);
        metadata.insert(
            "language_detector_confidence".into(),
            json!(language.confidence),
        );
        metadata.insert("language_detector_source".into(), json!(language.source));
        if let Some(request_id) = &request.request_id {
            metadata.insert("request_id".into(), json!(request_id));
        }

        RouterOutput {
            intent: prediction.intent,
            confidence: prediction.confidence,
            language: prediction.language,
            reasoning: prediction.reasoning,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            router_version: self.config.router.router_version.clone(),
            fallback_used: prediction.fallback_used,
            metadata,
        }
    }

    fn emit_telemetry(&self, output: &RouterOutput, request: &RoutingRequest) {
        self.telemetry.record(DecisionEvent {
            intent: output.intent.clone(),
            confidence: output.confidence,
            language: output.language,
            fallback_used: output.fallback_used,
            request_id: request.request_id.clone(),
            metadata: output.metadata.clone(),
            timestamp: output.timestamp.clone(),
        });
    }

    /// Pre-flight admission check over the whole batch, before any
    /// classification work. Estimates two bytes per character of text.
    fn enforce_memory_budget(&self, requests: &[RoutingRequest]) -> Result<(), RouterError> {
        let estimated_bytes: u64 = requests
            .iter()
            .map(|request| request.text.chars().count() as u64 * 2)
            .sum();
        if estimated_bytes > self.config.router.memory_budget_bytes {
            return Err(RouterError::MemoryBudgetExceeded {
                estimated_bytes,
                budget_bytes: self.config.router.memory_budget_bytes,
            });
        }
        Ok(())
    }

    fn check_latency_budget(
        &self,
        started: Instant,
        budget: Duration,
    ) -> Result<(), RouterError> {
        let elapsed = started.elapsed();
        if elapsed >= budget {
            return Err(RouterError::Timeout { elapsed, budget });
        }
        Ok(())
    }
}

/// Wrap every payload into a normalized request. Total over the closed
/// payload enum; untyped shapes are rejected earlier, at
/// [`RoutingPayload::try_from`].
fn normalize_payloads(payloads: Vec<RoutingPayload>) -> Vec<RoutingRequest> {
    payloads
        .into_iter()
        .map(|payload| match payload {
            RoutingPayload::Text(text) => RoutingRequest::new(text),
            RoutingPayload::Request(request) => request,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_wraps_bare_text() {
        let normalized = normalize_payloads(vec![
            RoutingPayload::from("hello"),
            RoutingPayload::from(RoutingRequest::new("full").with_request_id("req-1")),
        ]);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].text, "hello");
        assert!(normalized[0].metadata.is_empty());
        assert!(normalized[0].request_id.is_none());
        assert_eq!(normalized[1].request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn memory_estimate_counts_characters_not_utf8_bytes() {
        // "ñ" is two UTF-8 bytes but one character; the estimate must treat
        // it as one character at two bytes.
        let weights = tempfile::tempdir().unwrap();
        let mut config = TriagoConfig::default();
        config.model.weights_path = weights.path().to_path_buf();
        config.router.memory_budget_bytes = 10;
        let service = RouterService::new(config).unwrap();

        let under = vec![RoutingRequest::new("ñññññ")]; // 5 chars -> 10 bytes
        assert!(service.enforce_memory_budget(&under).is_ok());

        let over = vec![RoutingRequest::new("ññññññ")]; // 6 chars -> 12 bytes
        assert!(matches!(
            service.enforce_memory_budget(&over).unwrap_err(),
            RouterError::MemoryBudgetExceeded {
                estimated_bytes: 12,
                budget_bytes: 10,
            }
        ));
    }

    #[test]
    fn latency_check_rejects_once_budget_is_spent() {
        let weights = tempfile::tempdir().unwrap();
        let mut config = TriagoConfig::default();
        config.model.weights_path = weights.path().to_path_buf();
        let service = RouterService::new(config).unwrap();

        let started = Instant::now() - Duration::from_secs(10);
        let err = service
            .check_latency_budget(started, Duration::from_secs(4))
            .unwrap_err();
        assert!(matches!(err, RouterError::Timeout { .. }));

        assert!(service
            .check_latency_budget(Instant::now(), Duration::from_secs(4))
            .is_ok());
    }
}
