// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Triago workspace.
//!
//! Provides mock [`triago_core::IntentClassifier`] implementations that
//! exercise each branch of the router's failure policy without a real model.

pub mod mock_classifier;

pub use mock_classifier::{
    InvalidSchemaClassifier, SlowClassifier, TimeoutClassifier, UnavailableClassifier,
};
