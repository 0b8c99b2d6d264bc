// crates/timeout-ladder-core/src/profile.rs
// ============================================================================
// Module: Timeout Profile
// Description: Resolved timeout budgets for one (environment, tier) pair.
// Purpose: Carry named integer budgets and enforce the timeout hierarchy.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`TimeoutProfile`] is an immutable-in-intent bag of named integer
//! durations (whole seconds), tagged with the customer tier it was computed
//! for. The record owns the **timeout hierarchy** invariant: outer transport
//! budgets sit above the inner execution budget, which sits above every
//! per-phase budget. [`TimeoutProfile::validate`] checks the full rule set
//! in a deterministic order so the first reported violation is stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::tier::CustomerTier;

// ============================================================================
// SECTION: Profile Record
// ============================================================================

/// Resolved timeout budgets for one (environment, tier) pair.
///
/// All budgets are whole seconds. A profile is computed once per pair,
/// validated, and treated as immutable afterwards.
///
/// # Invariants
/// - `receive_timeout_secs > execution_timeout_secs` (outer transport above
///   inner execution).
/// - `execution_timeout_secs` exceeds every per-phase budget.
/// - Streaming budgets are all-or-nothing; see [`TimeoutProfile::validate`]
///   for the full rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutProfile {
    /// WebSocket handshake budget.
    pub connect_timeout_secs: u64,
    /// Outer transport receive window; the top of the ladder.
    pub receive_timeout_secs: u64,
    /// Outbound frame flush budget.
    pub send_timeout_secs: u64,
    /// Ping cadence on an established connection.
    pub heartbeat_interval_secs: u64,
    /// Maximum silent gap before the peer is considered dead.
    pub heartbeat_timeout_secs: u64,
    /// Whole agent run budget; the middle of the ladder.
    pub execution_timeout_secs: u64,
    /// Phase budget: load conversation and user context.
    pub context_load_timeout_secs: u64,
    /// Phase budget: model inference.
    pub inference_timeout_secs: u64,
    /// Phase budget: a single tool dispatch.
    pub tool_call_timeout_secs: u64,
    /// Phase budget: response assembly and flush.
    pub finalize_timeout_secs: u64,
    /// Outbound HTTP connect budget.
    pub http_connect_timeout_secs: u64,
    /// Outbound HTTP total request budget.
    pub http_request_timeout_secs: u64,
    /// Single test case budget for the test harness.
    pub test_case_timeout_secs: u64,
    /// Whole suite budget for the test harness.
    pub test_suite_timeout_secs: u64,
    /// Maximum gap between streamed response chunks (paid tiers).
    #[serde(default)]
    pub stream_idle_timeout_secs: Option<u64>,
    /// Whole streamed response budget (paid tiers).
    #[serde(default)]
    pub stream_total_timeout_secs: Option<u64>,
    /// Customer tier this profile was computed for.
    pub tier: CustomerTier,
}

// ============================================================================
// SECTION: Duration Views
// ============================================================================

impl TimeoutProfile {
    /// WebSocket handshake budget as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Outer transport receive window as a [`Duration`].
    #[must_use]
    pub const fn receive_timeout(&self) -> Duration {
        Duration::from_secs(self.receive_timeout_secs)
    }

    /// Outbound frame flush budget as a [`Duration`].
    #[must_use]
    pub const fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// Ping cadence as a [`Duration`].
    #[must_use]
    pub const fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    /// Maximum silent heartbeat gap as a [`Duration`].
    #[must_use]
    pub const fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }

    /// Whole agent run budget as a [`Duration`].
    #[must_use]
    pub const fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }

    /// Context-load phase budget as a [`Duration`].
    #[must_use]
    pub const fn context_load_timeout(&self) -> Duration {
        Duration::from_secs(self.context_load_timeout_secs)
    }

    /// Inference phase budget as a [`Duration`].
    #[must_use]
    pub const fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    /// Tool-call phase budget as a [`Duration`].
    #[must_use]
    pub const fn tool_call_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_call_timeout_secs)
    }

    /// Finalize phase budget as a [`Duration`].
    #[must_use]
    pub const fn finalize_timeout(&self) -> Duration {
        Duration::from_secs(self.finalize_timeout_secs)
    }

    /// Outbound HTTP connect budget as a [`Duration`].
    #[must_use]
    pub const fn http_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http_connect_timeout_secs)
    }

    /// Outbound HTTP total budget as a [`Duration`].
    #[must_use]
    pub const fn http_request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_request_timeout_secs)
    }

    /// Single test case budget as a [`Duration`].
    #[must_use]
    pub const fn test_case_timeout(&self) -> Duration {
        Duration::from_secs(self.test_case_timeout_secs)
    }

    /// Whole suite budget as a [`Duration`].
    #[must_use]
    pub const fn test_suite_timeout(&self) -> Duration {
        Duration::from_secs(self.test_suite_timeout_secs)
    }

    /// Streaming idle budget as a [`Duration`], when present.
    #[must_use]
    pub fn stream_idle_timeout(&self) -> Option<Duration> {
        self.stream_idle_timeout_secs.map(Duration::from_secs)
    }

    /// Streaming total budget as a [`Duration`], when present.
    #[must_use]
    pub fn stream_total_timeout(&self) -> Option<Duration> {
        self.stream_total_timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// SECTION: Hierarchy Validation
// ============================================================================

impl TimeoutProfile {
    /// Validates the timeout hierarchy and cross-field rules.
    ///
    /// Checks run in a deterministic order, so the first violation reported
    /// for a given profile is stable:
    ///
    /// 1. every base budget is greater than zero;
    /// 2. the receive window exceeds the execution budget;
    /// 3. the execution budget exceeds every phase budget;
    /// 4. the heartbeat timeout exceeds the heartbeat interval;
    /// 5. the HTTP request budget is at least the HTTP connect budget;
    /// 6. the suite budget is at least the test case budget;
    /// 7. streaming budgets are all-or-nothing, non-zero, and idle is below
    ///    total.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError`] naming the first offending field pair.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        require_nonzero("connect_timeout_secs", self.connect_timeout_secs)?;
        require_nonzero("receive_timeout_secs", self.receive_timeout_secs)?;
        require_nonzero("send_timeout_secs", self.send_timeout_secs)?;
        require_nonzero("heartbeat_interval_secs", self.heartbeat_interval_secs)?;
        require_nonzero("heartbeat_timeout_secs", self.heartbeat_timeout_secs)?;
        require_nonzero("execution_timeout_secs", self.execution_timeout_secs)?;
        require_nonzero("context_load_timeout_secs", self.context_load_timeout_secs)?;
        require_nonzero("inference_timeout_secs", self.inference_timeout_secs)?;
        require_nonzero("tool_call_timeout_secs", self.tool_call_timeout_secs)?;
        require_nonzero("finalize_timeout_secs", self.finalize_timeout_secs)?;
        require_nonzero("http_connect_timeout_secs", self.http_connect_timeout_secs)?;
        require_nonzero("http_request_timeout_secs", self.http_request_timeout_secs)?;
        require_nonzero("test_case_timeout_secs", self.test_case_timeout_secs)?;
        require_nonzero("test_suite_timeout_secs", self.test_suite_timeout_secs)?;

        require_order(
            "receive_timeout_secs",
            self.receive_timeout_secs,
            "execution_timeout_secs",
            self.execution_timeout_secs,
        )?;
        require_order(
            "execution_timeout_secs",
            self.execution_timeout_secs,
            "context_load_timeout_secs",
            self.context_load_timeout_secs,
        )?;
        require_order(
            "execution_timeout_secs",
            self.execution_timeout_secs,
            "inference_timeout_secs",
            self.inference_timeout_secs,
        )?;
        require_order(
            "execution_timeout_secs",
            self.execution_timeout_secs,
            "tool_call_timeout_secs",
            self.tool_call_timeout_secs,
        )?;
        require_order(
            "execution_timeout_secs",
            self.execution_timeout_secs,
            "finalize_timeout_secs",
            self.finalize_timeout_secs,
        )?;
        require_order(
            "heartbeat_timeout_secs",
            self.heartbeat_timeout_secs,
            "heartbeat_interval_secs",
            self.heartbeat_interval_secs,
        )?;

        require_floor(
            "http_request_timeout_secs",
            self.http_request_timeout_secs,
            "http_connect_timeout_secs",
            self.http_connect_timeout_secs,
        )?;
        require_floor(
            "test_suite_timeout_secs",
            self.test_suite_timeout_secs,
            "test_case_timeout_secs",
            self.test_case_timeout_secs,
        )?;

        match (self.stream_idle_timeout_secs, self.stream_total_timeout_secs) {
            (None, None) => Ok(()),
            (Some(idle), Some(total)) => {
                require_nonzero("stream_idle_timeout_secs", idle)?;
                require_nonzero("stream_total_timeout_secs", total)?;
                require_order("stream_total_timeout_secs", total, "stream_idle_timeout_secs", idle)
            }
            (Some(_), None) => Err(HierarchyError::StreamPairMismatch {
                present: "stream_idle_timeout_secs",
                missing: "stream_total_timeout_secs",
            }),
            (None, Some(_)) => Err(HierarchyError::StreamPairMismatch {
                present: "stream_total_timeout_secs",
                missing: "stream_idle_timeout_secs",
            }),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Violations of the timeout hierarchy or its cross-field rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A required budget is zero.
    #[error("{field} must be greater than zero")]
    ZeroField {
        /// Name of the zero-valued field.
        field: &'static str,
    },
    /// An outer budget does not strictly exceed an inner budget.
    #[error("{outer} ({outer_secs}s) must exceed {inner} ({inner_secs}s)")]
    OrderViolation {
        /// Name of the outer field.
        outer: &'static str,
        /// Value of the outer field in seconds.
        outer_secs: u64,
        /// Name of the inner field.
        inner: &'static str,
        /// Value of the inner field in seconds.
        inner_secs: u64,
    },
    /// A budget is below its non-strict floor.
    #[error("{field} ({secs}s) must be at least {floor_field} ({floor_secs}s)")]
    FloorViolation {
        /// Name of the constrained field.
        field: &'static str,
        /// Value of the constrained field in seconds.
        secs: u64,
        /// Name of the floor field.
        floor_field: &'static str,
        /// Value of the floor field in seconds.
        floor_secs: u64,
    },
    /// Exactly one streaming budget is present.
    #[error("{present} requires {missing}; streaming budgets are all-or-nothing")]
    StreamPairMismatch {
        /// Name of the streaming field that is present.
        present: &'static str,
        /// Name of the streaming field that is missing.
        missing: &'static str,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks that a named budget is greater than zero.
const fn require_nonzero(field: &'static str, secs: u64) -> Result<(), HierarchyError> {
    if secs == 0 {
        Err(HierarchyError::ZeroField {
            field,
        })
    } else {
        Ok(())
    }
}

/// Checks that an outer budget strictly exceeds an inner budget.
const fn require_order(
    outer: &'static str,
    outer_secs: u64,
    inner: &'static str,
    inner_secs: u64,
) -> Result<(), HierarchyError> {
    if outer_secs > inner_secs {
        Ok(())
    } else {
        Err(HierarchyError::OrderViolation {
            outer,
            outer_secs,
            inner,
            inner_secs,
        })
    }
}

/// Checks that a budget meets a non-strict floor.
const fn require_floor(
    field: &'static str,
    secs: u64,
    floor_field: &'static str,
    floor_secs: u64,
) -> Result<(), HierarchyError> {
    if secs >= floor_secs {
        Ok(())
    } else {
        Err(HierarchyError::FloorViolation {
            field,
            secs,
            floor_field,
            floor_secs,
        })
    }
}
