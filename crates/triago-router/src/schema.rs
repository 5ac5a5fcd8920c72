// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output contract enforcement.
//!
//! Every routing decision passes through [`validate_router_output`] before it
//! is returned or logged; there is no skip-and-continue path. Checks run in a
//! fixed order and report the first unmet requirement, then the compiled
//! JSON Schema runs as a backstop gate for anything the explicit checks do
//! not cover.

use std::sync::LazyLock;

use jsonschema::Validator;
use regex::Regex;
use serde_json::{json, Value};

use triago_core::{RouterError, RouterOutput};

/// The published output contract, shared with downstream consumers.
pub static ROUTER_OUTPUT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "urn:intent-router:router-output",
        "type": "object",
        "required": [
            "intent",
            "confidence",
            "language",
            "reasoning",
            "timestamp",
            "router_version",
            "fallback_used",
            "metadata",
        ],
        "properties": {
            "intent": {"type": "string", "minLength": 3},
            "confidence": {"type": "number", "minimum": 0, "maximum": 1},
            "language": {"type": "string", "pattern": "^[a-z]{2}$"},
            "reasoning": {"type": "string", "minLength": 1},
            "timestamp": {"type": "string", "format": "date-time"},
            "router_version": {"type": "string", "minLength": 3},
            "fallback_used": {"type": "boolean"},
            "metadata": {"type": "object"},
        },
        "additionalProperties": true,
    })
});

static COMPILED_SCHEMA: LazyLock<Validator> = LazyLock::new(|| {
    jsonschema::options()
        .should_validate_formats(true)
        .build(&ROUTER_OUTPUT_SCHEMA)
        .expect("router output schema compiles")
});

static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").unwrap());

const REQUIRED_FIELDS: [&str; 8] = [
    "intent",
    "confidence",
    "language",
    "reasoning",
    "timestamp",
    "router_version",
    "fallback_used",
    "metadata",
];

/// Validate a typed router output against the output contract.
pub fn validate_router_output(output: &RouterOutput) -> Result<(), RouterError> {
    let payload = serde_json::to_value(output).map_err(|err| {
        RouterError::SchemaViolation(format!("router output is not serializable: {err}"))
    })?;
    validate_router_output_value(&payload)
}

/// Validate an untyped router output payload against the output contract.
///
/// Fails with the first unmet requirement, in check order.
pub fn validate_router_output_value(payload: &Value) -> Result<(), RouterError> {
    let object = payload
        .as_object()
        .ok_or_else(|| violation("router output must be an object"))?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(violation(&format!(
                "router output missing required field '{field}'"
            )));
        }
    }

    match object["intent"].as_str() {
        Some(intent) if intent.trim().len() >= 3 => {}
        _ => return Err(violation("intent must be a non-empty string")),
    }

    match object["confidence"].as_f64() {
        Some(confidence) => {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(violation("confidence must be between 0 and 1"));
            }
        }
        None => return Err(violation("confidence must be numeric")),
    }

    match object["language"].as_str() {
        Some(language) if LANGUAGE_PATTERN.is_match(language) => {}
        _ => return Err(violation("language must be a valid ISO-639-1 code")),
    }

    match object["reasoning"].as_str() {
        Some(reasoning) if !reasoning.trim().is_empty() => {}
        _ => return Err(violation("reasoning must be supplied")),
    }

    match object["timestamp"].as_str() {
        Some(timestamp)
            if chrono::DateTime::parse_from_rfc3339(timestamp).is_ok() => {}
        _ => return Err(violation("timestamp must be ISO-8601 formatted")),
    }

    match object["router_version"].as_str() {
        Some(version) if version.trim().len() >= 3 => {}
        _ => return Err(violation("router_version must describe the deployed model")),
    }

    if !object["fallback_used"].is_boolean() {
        return Err(violation("fallback_used must be boolean"));
    }

    if !object["metadata"].is_object() {
        return Err(violation("metadata must be an object"));
    }

    // Backstop: the published schema is the contract of record.
    COMPILED_SCHEMA
        .validate(payload)
        .map_err(|err| violation(&err.to_string()))
}

fn violation(message: &str) -> RouterError {
    RouterError::SchemaViolation(message.to_string())
}
