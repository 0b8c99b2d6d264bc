// crates/timeout-ladder-config/src/tables.rs
// ============================================================================
// Module: Base Tables
// Description: Built-in per-environment timeout tables and tier enhancement.
// Purpose: Single source of truth for default timeout budgets.
// Dependencies: timeout-ladder-core
// ============================================================================

//! ## Overview
//! Each deployment environment carries a fixed base table of budgets tuned
//! for its latency and cost profile: generous in `local`, tight in `testing`,
//! balanced in `staging` and `production`. Paid tiers are derived from the
//! base table by [`enhance_profile`], which scales the execution family and
//! recomputes the receive window so enhancement can never invert the ladder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use timeout_ladder_core::CustomerTier;
use timeout_ladder_core::Environment;
use timeout_ladder_core::TimeoutProfile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Seconds kept between the receive window and the enhanced execution budget.
pub const RECEIVE_HEADROOM_SECS: u64 = 60;
/// Multiplier applied to the execution family for the pro tier.
pub(crate) const PRO_EXECUTION_MULTIPLIER: u64 = 2;
/// Multiplier applied to the execution family for the enterprise tier.
pub(crate) const ENTERPRISE_EXECUTION_MULTIPLIER: u64 = 4;
/// Multiplier applied to the HTTP request budget for the enterprise tier.
pub(crate) const ENTERPRISE_HTTP_REQUEST_MULTIPLIER: u64 = 2;
/// Multiplier applied to the heartbeat timeout for the enterprise tier.
pub(crate) const ENTERPRISE_HEARTBEAT_MULTIPLIER: u64 = 2;
/// Streaming idle budget granted to the pro tier.
pub(crate) const PRO_STREAM_IDLE_SECS: u64 = 30;
/// Streaming idle budget granted to the enterprise tier.
pub(crate) const ENTERPRISE_STREAM_IDLE_SECS: u64 = 60;

// ============================================================================
// SECTION: Base Tables
// ============================================================================

/// Returns the built-in base table for an environment.
///
/// Base tables carry the free tier tag and no streaming budgets. Every table
/// satisfies the timeout hierarchy by construction.
#[must_use]
pub const fn base_profile(environment: Environment) -> TimeoutProfile {
    match environment {
        Environment::Local => TimeoutProfile {
            connect_timeout_secs: 60,
            receive_timeout_secs: 600,
            send_timeout_secs: 60,
            heartbeat_interval_secs: 30,
            heartbeat_timeout_secs: 120,
            execution_timeout_secs: 480,
            context_load_timeout_secs: 60,
            inference_timeout_secs: 300,
            tool_call_timeout_secs: 120,
            finalize_timeout_secs: 60,
            http_connect_timeout_secs: 30,
            http_request_timeout_secs: 120,
            test_case_timeout_secs: 120,
            test_suite_timeout_secs: 1200,
            stream_idle_timeout_secs: None,
            stream_total_timeout_secs: None,
            tier: CustomerTier::Free,
        },
        Environment::Staging => TimeoutProfile {
            connect_timeout_secs: 20,
            receive_timeout_secs: 240,
            send_timeout_secs: 20,
            heartbeat_interval_secs: 25,
            heartbeat_timeout_secs: 60,
            execution_timeout_secs: 180,
            context_load_timeout_secs: 20,
            inference_timeout_secs: 90,
            tool_call_timeout_secs: 45,
            finalize_timeout_secs: 20,
            http_connect_timeout_secs: 10,
            http_request_timeout_secs: 45,
            test_case_timeout_secs: 45,
            test_suite_timeout_secs: 450,
            stream_idle_timeout_secs: None,
            stream_total_timeout_secs: None,
            tier: CustomerTier::Free,
        },
        Environment::Production => TimeoutProfile {
            connect_timeout_secs: 30,
            receive_timeout_secs: 300,
            send_timeout_secs: 30,
            heartbeat_interval_secs: 25,
            heartbeat_timeout_secs: 60,
            execution_timeout_secs: 240,
            context_load_timeout_secs: 30,
            inference_timeout_secs: 120,
            tool_call_timeout_secs: 60,
            finalize_timeout_secs: 30,
            http_connect_timeout_secs: 10,
            http_request_timeout_secs: 60,
            test_case_timeout_secs: 60,
            test_suite_timeout_secs: 600,
            stream_idle_timeout_secs: None,
            stream_total_timeout_secs: None,
            tier: CustomerTier::Free,
        },
        Environment::Testing => TimeoutProfile {
            connect_timeout_secs: 5,
            receive_timeout_secs: 30,
            send_timeout_secs: 5,
            heartbeat_interval_secs: 5,
            heartbeat_timeout_secs: 10,
            execution_timeout_secs: 20,
            context_load_timeout_secs: 5,
            inference_timeout_secs: 10,
            tool_call_timeout_secs: 10,
            finalize_timeout_secs: 5,
            http_connect_timeout_secs: 2,
            http_request_timeout_secs: 10,
            test_case_timeout_secs: 15,
            test_suite_timeout_secs: 120,
            stream_idle_timeout_secs: None,
            stream_total_timeout_secs: None,
            tier: CustomerTier::Free,
        },
    }
}

// ============================================================================
// SECTION: Tier Enhancement
// ============================================================================

/// Derives the tier profile from a base table.
///
/// `Free` is the identity apart from the tier tag. Paid tiers scale the
/// execution family (`execution`, `inference`, `tool_call`) with saturating
/// arithmetic, recompute the receive window above the enhanced execution
/// budget, and grant streaming budgets. Enterprise additionally doubles the
/// HTTP request and heartbeat timeout budgets.
#[must_use]
pub fn enhance_profile(base: TimeoutProfile, tier: CustomerTier) -> TimeoutProfile {
    let mut profile = base;
    profile.tier = tier;
    match tier {
        CustomerTier::Free => {
            profile.stream_idle_timeout_secs = None;
            profile.stream_total_timeout_secs = None;
        }
        CustomerTier::Pro => {
            scale_execution_family(&mut profile, PRO_EXECUTION_MULTIPLIER);
            raise_receive_window(&mut profile);
            profile.stream_idle_timeout_secs = Some(PRO_STREAM_IDLE_SECS);
            profile.stream_total_timeout_secs = Some(profile.execution_timeout_secs);
        }
        CustomerTier::Enterprise => {
            scale_execution_family(&mut profile, ENTERPRISE_EXECUTION_MULTIPLIER);
            profile.http_request_timeout_secs =
                profile.http_request_timeout_secs.saturating_mul(ENTERPRISE_HTTP_REQUEST_MULTIPLIER);
            profile.heartbeat_timeout_secs =
                profile.heartbeat_timeout_secs.saturating_mul(ENTERPRISE_HEARTBEAT_MULTIPLIER);
            raise_receive_window(&mut profile);
            profile.stream_idle_timeout_secs = Some(ENTERPRISE_STREAM_IDLE_SECS);
            profile.stream_total_timeout_secs = Some(profile.execution_timeout_secs);
        }
    }
    profile
}

/// Scales the execution-family budgets with saturating arithmetic.
fn scale_execution_family(profile: &mut TimeoutProfile, factor: u64) {
    profile.execution_timeout_secs = profile.execution_timeout_secs.saturating_mul(factor);
    profile.inference_timeout_secs = profile.inference_timeout_secs.saturating_mul(factor);
    profile.tool_call_timeout_secs = profile.tool_call_timeout_secs.saturating_mul(factor);
}

/// Recomputes the receive window above the current execution budget.
fn raise_receive_window(profile: &mut TimeoutProfile) {
    profile.receive_timeout_secs =
        profile.execution_timeout_secs.saturating_add(RECEIVE_HEADROOM_SECS);
}
