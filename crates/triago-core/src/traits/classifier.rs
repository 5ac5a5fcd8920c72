// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pluggable primary classification capability.

use async_trait::async_trait;

use crate::error::ClassifyError;
use crate::types::{LanguageContext, ModelPrediction, RoutingRequest};

/// A replaceable intent-classification capability.
///
/// Implementations receive an ordered batch of requests paired with their
/// detected languages and must return exactly one prediction per input, in
/// input order. A failure fails the whole batch with a tagged
/// [`ClassifyError`]; there is no partial success at this level.
///
/// The router service treats the call as potentially slow and bounds it with
/// the remaining whole-call latency budget.
#[async_trait]
pub trait IntentClassifier: Send + Sync + 'static {
    /// Classify a batch of `(request, language)` pairs.
    async fn classify(
        &self,
        batch: &[(RoutingRequest, LanguageContext)],
    ) -> Result<Vec<ModelPrediction>, ClassifyError>;
}
