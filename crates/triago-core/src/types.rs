// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by the router service, classifiers, and telemetry.
//!
//! All routing types are transient: the router service owns them for the
//! duration of one `route`/`route_batch` call and drops them when it
//! returns. Only static rule tables and configuration outlive a call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::RouterError;

/// Open string-keyed metadata carried through the pipeline untouched.
pub type Metadata = serde_json::Map<String, Value>;

/// Supported languages, in enumeration order.
///
/// Order is significant: the language detector scores candidates in this
/// order and breaks ties toward the earliest entry, so English is both the
/// default and the tie-break winner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Es,
    Fr,
    De,
    Zh,
}

impl Lang {
    /// All supported languages, English first.
    pub const ALL: [Lang; 5] = [Lang::En, Lang::Es, Lang::Fr, Lang::De, Lang::Zh];
}

/// Normalized representation of one routing invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRequest {
    /// Raw utterance text. Truncation happens inside the primary classifier.
    pub text: String,
    /// Caller-supplied metadata, passed through to the output untouched.
    #[serde(default)]
    pub metadata: Metadata,
    /// Opaque correlation token, echoed into output metadata when present.
    #[serde(default)]
    pub request_id: Option<String>,
}

impl RoutingRequest {
    /// Wrap bare text with empty metadata and no correlation token.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
            request_id: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// A batch element accepted by `route_batch`: bare text or a full request.
///
/// The enum is closed, so normalization inside the router service is total.
/// Untyped payloads enter through [`RoutingPayload::try_from`], which is
/// where unsupported shapes are rejected with
/// [`RouterError::InvalidPayload`].
#[derive(Debug, Clone)]
pub enum RoutingPayload {
    Text(String),
    Request(RoutingRequest),
}

impl From<&str> for RoutingPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RoutingPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<RoutingRequest> for RoutingPayload {
    fn from(request: RoutingRequest) -> Self {
        Self::Request(request)
    }
}

impl TryFrom<Value> for RoutingPayload {
    type Error = RouterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(_) => {
                let request: RoutingRequest = serde_json::from_value(value)
                    .map_err(|err| RouterError::InvalidPayload(err.to_string()))?;
                Ok(Self::Request(request))
            }
            other => Err(RouterError::InvalidPayload(format!(
                "unsupported routing payload type: expected string or object, got {}",
                type_name(&other)
            ))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The detected language for one routing request.
///
/// Created fresh per request inside a routing call; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageContext {
    pub language: Lang,
    /// Detection confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Identifies which detector produced this context.
    pub source: &'static str,
}

/// Intermediate prediction emitted by either classifier.
///
/// Not yet validated: only the router service consumes this, to build the
/// final [`RouterOutput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrediction {
    pub intent: String,
    pub confidence: f64,
    pub reasoning: String,
    pub language: Lang,
    pub fallback_used: bool,
    pub metadata: Metadata,
}

/// The externally visible, schema-validated routing decision.
///
/// Invariant: every `RouterOutput` that leaves the router service has passed
/// the output schema validator; none is ever returned or logged unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterOutput {
    pub intent: String,
    pub confidence: f64,
    pub language: Lang,
    pub reasoning: String,
    /// RFC 3339 date-time of the decision.
    pub timestamp: String,
    /// Identifies the deployed classifier configuration, for audit.
    pub router_version: String,
    pub fallback_used: bool,
    pub metadata: Metadata,
}

/// One telemetry record per routing decision, mirrored into the compliance
/// log so every decision is independently reproducible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionEvent {
    pub intent: String,
    pub confidence: f64,
    pub language: Lang,
    pub fallback_used: bool,
    pub request_id: Option<String>,
    pub metadata: Metadata,
    pub timestamp: String,
}
