// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telemetry sink trait for the compliance decision log.

use crate::types::DecisionEvent;

/// Append-only recorder of routing decisions.
///
/// `record` is fire-and-forget: it must never block the routing call and
/// must never raise back into the router. Implementations must accept
/// concurrent appends, since routing calls on one service instance may run
/// in parallel across tasks.
pub trait TelemetrySink: Send + Sync {
    /// Append one decision record.
    fn record(&self, event: DecisionEvent);
}
