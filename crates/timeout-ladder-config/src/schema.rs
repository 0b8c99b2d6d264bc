// crates/timeout-ladder-config/src/schema.rs
// ============================================================================
// Module: Overrides Schema
// Description: JSON schema builder for timeout-ladder.toml.
// Purpose: Provide the canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the deploy-time overrides file.
//! Environment and tier section names are closed sets, every budget carries
//! `minimum: 1`, and unknown properties are rejected, matching the strict
//! loader in [`crate::overrides`].

use serde_json::Value;
use serde_json::json;

/// Returns the JSON schema for `timeout-ladder.toml`.
#[must_use]
pub fn overrides_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "timeout-ladder://config/schemas/overrides.schema.json",
        "title": "Timeout Ladder Overrides",
        "description": "Deploy-time overrides for timeout budgets per environment and tier.",
        "type": "object",
        "properties": {
            "local": environment_overrides_schema("local"),
            "staging": environment_overrides_schema("staging"),
            "production": environment_overrides_schema("production"),
            "testing": environment_overrides_schema("testing")
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Section Schemas
// ============================================================================

/// Schema for one per-environment override table.
fn environment_overrides_schema(label: &str) -> Value {
    json!({
        "type": "object",
        "description": format!("Override layers applied in the {label} environment."),
        "properties": {
            "base": layer_schema("every tier"),
            "free": layer_schema("the free tier"),
            "pro": layer_schema("the pro tier"),
            "enterprise": layer_schema("the enterprise tier")
        },
        "additionalProperties": false
    })
}

/// Schema for one override layer; every budget is optional.
fn layer_schema(scope: &str) -> Value {
    json!({
        "type": "object",
        "description": format!("Field-wise replacements applied to {scope}."),
        "properties": {
            "connect_timeout_secs": budget_schema("WebSocket handshake budget."),
            "receive_timeout_secs": budget_schema("Outer transport receive window."),
            "send_timeout_secs": budget_schema("Outbound frame flush budget."),
            "heartbeat_interval_secs": budget_schema("Ping cadence on an established connection."),
            "heartbeat_timeout_secs": budget_schema("Maximum silent gap before the peer is considered dead."),
            "execution_timeout_secs": budget_schema("Whole agent run budget."),
            "context_load_timeout_secs": budget_schema("Context-load phase budget."),
            "inference_timeout_secs": budget_schema("Model inference phase budget."),
            "tool_call_timeout_secs": budget_schema("Single tool dispatch budget."),
            "finalize_timeout_secs": budget_schema("Response assembly and flush budget."),
            "http_connect_timeout_secs": budget_schema("Outbound HTTP connect budget."),
            "http_request_timeout_secs": budget_schema("Outbound HTTP total request budget."),
            "test_case_timeout_secs": budget_schema("Single test case budget."),
            "test_suite_timeout_secs": budget_schema("Whole suite budget."),
            "stream_idle_timeout_secs": budget_schema("Maximum gap between streamed response chunks."),
            "stream_total_timeout_secs": budget_schema("Whole streamed response budget.")
        },
        "additionalProperties": false
    })
}

/// Schema for a single timeout budget in whole seconds.
fn budget_schema(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}
