// crates/timeout-ladder-config/src/docs.rs
// ============================================================================
// Module: Overrides Docs Generator
// Description: Markdown generator for timeout-ladder.toml documentation.
// Purpose: Keep override docs in sync with schema, tables, and validation.
// Dependencies: serde_json, timeout-ladder-core, std
// ============================================================================

//! ## Overview
//! Generates `Docs/configuration/timeout-ladder.toml.md` from the canonical
//! overrides schema and the built-in base tables. Output is deterministic;
//! [`verify_overrides_docs`] fails when the committed file drifts from the
//! generated content. Field descriptions are rendered from the schema, and a
//! two-way completeness check rejects both missing and undocumented fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use timeout_ladder_core::Environment;
use timeout_ladder_core::TimeoutProfile;

use crate::detect::DetectionEnv;
use crate::schema::overrides_schema;
use crate::tables::ENTERPRISE_EXECUTION_MULTIPLIER;
use crate::tables::ENTERPRISE_HEARTBEAT_MULTIPLIER;
use crate::tables::ENTERPRISE_HTTP_REQUEST_MULTIPLIER;
use crate::tables::ENTERPRISE_STREAM_IDLE_SECS;
use crate::tables::PRO_EXECUTION_MULTIPLIER;
use crate::tables::PRO_STREAM_IDLE_SECS;
use crate::tables::RECEIVE_HEADROOM_SECS;
use crate::tables::base_profile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output path for generated overrides docs.
const DOCS_PATH: &str = "Docs/configuration/timeout-ladder.toml.md";

/// Ordered base budget fields rendered in docs tables.
const BASE_FIELD_ORDER: &[&str] = &[
    "connect_timeout_secs",
    "receive_timeout_secs",
    "send_timeout_secs",
    "heartbeat_interval_secs",
    "heartbeat_timeout_secs",
    "execution_timeout_secs",
    "context_load_timeout_secs",
    "inference_timeout_secs",
    "tool_call_timeout_secs",
    "finalize_timeout_secs",
    "http_connect_timeout_secs",
    "http_request_timeout_secs",
    "test_case_timeout_secs",
    "test_suite_timeout_secs",
];

/// Streaming fields rendered after the base budgets.
const STREAM_FIELD_ORDER: &[&str] = &["stream_idle_timeout_secs", "stream_total_timeout_secs"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying overrides docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Schema traversal or rendering error.
    #[error("docs schema error: {0}")]
    Schema(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the overrides markdown documentation.
///
/// # Errors
///
/// Returns [`DocsError`] when schema traversal fails.
pub fn overrides_docs_markdown() -> Result<String, DocsError> {
    let schema = overrides_schema();
    let mut out = String::new();

    out.push_str("<!--\n");
    out.push_str("Docs/configuration/timeout-ladder.toml.md\n");
    out.push_str("============================================================================\n");
    out.push_str("Document: Timeout Ladder Overrides\n");
    out.push_str("Description: Reference for timeout-ladder.toml override fields.\n");
    out.push_str("Purpose: Document detection, base tables, tiers, and override layers.\n");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("============================================================================\n");
    out.push_str("-->\n\n");

    out.push_str("# timeout-ladder.toml Overrides\n\n");
    out.push_str("## Overview\n\n");
    out.push_str("`timeout-ladder.toml` raises or lowers individual timeout budgets per\n");
    out.push_str("environment and customer tier without a rebuild. The file is optional;\n");
    out.push_str("when present it is size-, path-, and UTF-8-limited, unknown keys are\n");
    out.push_str("rejected, and the full (environment, tier) matrix is validated against\n");
    out.push_str("the timeout hierarchy at install time.\n\n");

    render_detection_section(&mut out);
    render_base_tables(&mut out).map_err(DocsError::Schema)?;
    render_tier_adjustments(&mut out);
    let fields = render_field_table(&schema).map_err(DocsError::Schema)?;
    out.push_str("## Override Fields\n\n");
    out.push_str("All fields are optional whole seconds, minimum 1. A set field replaces\n");
    out.push_str("the computed value outright; the tier layer wins over `base`.\n\n");
    out.push_str(&fields);
    out.push('\n');
    render_layer_section(&mut out);
    render_hierarchy_section(&mut out);

    Ok(out)
}

/// Writes the generated docs to the standard location.
///
/// # Errors
///
/// Returns [`DocsError`] when file output fails.
pub fn write_overrides_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = overrides_docs_markdown()?;
    fs::write(path, content.as_bytes()).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the on-disk docs match the generated output.
///
/// # Errors
///
/// Returns [`DocsError`] when the docs drift.
pub fn verify_overrides_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = overrides_docs_markdown()?;
    let existing = fs::read_to_string(path).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != content {
        return Err(DocsError::Drift(format!("docs mismatch: {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// SECTION: Section Rendering
// ============================================================================

/// Renders the environment detection precedence list.
fn render_detection_section(out: &mut String) {
    out.push_str("## Environment Detection\n\n");
    out.push_str("The active environment is classified from process environment\n");
    out.push_str("variables, first match wins; malformed values fall through:\n\n");
    let _ = writeln!(
        out,
        "1. `{}` set and non-blank selects `testing`.",
        DetectionEnv::PytestCurrentTest.as_str()
    );
    let _ = writeln!(
        out,
        "2. `{}` truthy (`1`, `true`, `yes`) selects `testing`.",
        DetectionEnv::Testing.as_str()
    );
    let _ = writeln!(
        out,
        "3. `{}` selects its label (`local`/`dev`/`development`, `staging`/`stage`, \
         `production`/`prod`, `testing`/`test`).",
        DetectionEnv::Environment.as_str()
    );
    let _ = writeln!(
        out,
        "4. `{}` or `{}` set selects `staging` when the project id contains \
         `staging`, otherwise `production`.",
        DetectionEnv::KService.as_str(),
        DetectionEnv::GcpProjectId.as_str()
    );
    out.push_str("5. Otherwise `local`.\n\n");
}

/// Renders the per-environment base tables.
fn render_base_tables(out: &mut String) -> Result<(), String> {
    out.push_str("## Base Tables\n\n");
    out.push_str("Built-in free-tier budgets in whole seconds:\n\n");
    out.push_str("| Field | local | staging | production | testing |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    let profiles: Vec<TimeoutProfile> =
        Environment::ALL.iter().map(|environment| base_profile(*environment)).collect();
    for field in BASE_FIELD_ORDER {
        let _ = write!(out, "| `{field}` |");
        for profile in &profiles {
            let value = base_value(profile, field)?;
            let _ = write!(out, " {value} |");
        }
        out.push('\n');
    }
    out.push('\n');
    Ok(())
}

/// Renders the tier adjustment rules from the enhancement constants.
fn render_tier_adjustments(out: &mut String) {
    out.push_str("## Tier Adjustments\n\n");
    out.push_str("- `free`: the base table unchanged; no streaming budgets.\n");
    let _ = writeln!(
        out,
        "- `pro`: `execution_timeout_secs`, `inference_timeout_secs`, and \
         `tool_call_timeout_secs` x{PRO_EXECUTION_MULTIPLIER}; \
         `receive_timeout_secs` recomputed to execution + {RECEIVE_HEADROOM_SECS}s; \
         streaming idle {PRO_STREAM_IDLE_SECS}s, streaming total = execution."
    );
    let _ = writeln!(
        out,
        "- `enterprise`: `execution_timeout_secs`, `inference_timeout_secs`, and \
         `tool_call_timeout_secs` x{ENTERPRISE_EXECUTION_MULTIPLIER}; \
         `http_request_timeout_secs` x{ENTERPRISE_HTTP_REQUEST_MULTIPLIER}; \
         `heartbeat_timeout_secs` x{ENTERPRISE_HEARTBEAT_MULTIPLIER}; \
         `receive_timeout_secs` recomputed to execution + {RECEIVE_HEADROOM_SECS}s; \
         streaming idle {ENTERPRISE_STREAM_IDLE_SECS}s, streaming total = execution."
    );
    out.push('\n');
}

/// Renders the override field table from the schema.
fn render_field_table(schema: &Value) -> Result<String, String> {
    let props = schema
        .pointer("/properties/local/properties/base/properties")
        .and_then(Value::as_object)
        .ok_or_else(|| "layer properties missing".to_string())?;

    let mut seen = BTreeSet::new();
    for field in BASE_FIELD_ORDER.iter().chain(STREAM_FIELD_ORDER) {
        if !props.contains_key(*field) {
            return Err(format!("missing field in schema: {field}"));
        }
        seen.insert(*field);
    }
    for key in props.keys() {
        if !seen.contains(key.as_str()) {
            return Err(format!("field not documented: {key}"));
        }
    }

    let mut table = String::new();
    table.push_str("| Field | Type | Notes |\n");
    table.push_str("| --- | --- | --- |\n");
    for field in BASE_FIELD_ORDER.iter().chain(STREAM_FIELD_ORDER) {
        let prop = props.get(*field).ok_or_else(|| format!("missing field schema: {field}"))?;
        let field_type = prop
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("missing type for field: {field}"))?;
        let notes = prop.get("description").and_then(Value::as_str).unwrap_or("");
        let _ = writeln!(&mut table, "| `{field}` | {field_type} | {notes} |");
    }
    Ok(table)
}

/// Renders the override layer shape and application order.
fn render_layer_section(out: &mut String) {
    out.push_str("## Override Layers\n\n");
    out.push_str("Each environment table accepts a `base` layer plus `free`, `pro`, and\n");
    out.push_str("`enterprise` layers. Application order per (environment, tier):\n");
    out.push_str("built-in base table, tier enhancement, `[env.base]`, `[env.<tier>]`,\n");
    out.push_str("then hierarchy validation.\n\n");
    out.push_str("```toml\n");
    out.push_str("[production.base]\n");
    out.push_str("http_request_timeout_secs = 90\n");
    out.push_str("\n");
    out.push_str("[production.pro]\n");
    out.push_str("inference_timeout_secs = 300\n");
    out.push_str("```\n\n");
}

/// Renders the hierarchy rules enforced at install time.
fn render_hierarchy_section(out: &mut String) {
    out.push_str("## Hierarchy Rules\n\n");
    out.push_str("- Every base budget is greater than zero.\n");
    out.push_str("- `receive_timeout_secs` exceeds `execution_timeout_secs`.\n");
    out.push_str("- `execution_timeout_secs` exceeds every phase budget\n");
    out.push_str("  (`context_load`, `inference`, `tool_call`, `finalize`).\n");
    out.push_str("- `heartbeat_timeout_secs` exceeds `heartbeat_interval_secs`.\n");
    out.push_str("- `http_request_timeout_secs` is at least `http_connect_timeout_secs`.\n");
    out.push_str("- `test_suite_timeout_secs` is at least `test_case_timeout_secs`.\n");
    out.push_str("- Streaming budgets are all-or-nothing, non-zero, and\n");
    out.push_str("  `stream_idle_timeout_secs` is below `stream_total_timeout_secs`.\n");
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Looks up a base-table budget by its documented field name.
fn base_value(profile: &TimeoutProfile, field: &str) -> Result<u64, String> {
    match field {
        "connect_timeout_secs" => Ok(profile.connect_timeout_secs),
        "receive_timeout_secs" => Ok(profile.receive_timeout_secs),
        "send_timeout_secs" => Ok(profile.send_timeout_secs),
        "heartbeat_interval_secs" => Ok(profile.heartbeat_interval_secs),
        "heartbeat_timeout_secs" => Ok(profile.heartbeat_timeout_secs),
        "execution_timeout_secs" => Ok(profile.execution_timeout_secs),
        "context_load_timeout_secs" => Ok(profile.context_load_timeout_secs),
        "inference_timeout_secs" => Ok(profile.inference_timeout_secs),
        "tool_call_timeout_secs" => Ok(profile.tool_call_timeout_secs),
        "finalize_timeout_secs" => Ok(profile.finalize_timeout_secs),
        "http_connect_timeout_secs" => Ok(profile.http_connect_timeout_secs),
        "http_request_timeout_secs" => Ok(profile.http_request_timeout_secs),
        "test_case_timeout_secs" => Ok(profile.test_case_timeout_secs),
        "test_suite_timeout_secs" => Ok(profile.test_suite_timeout_secs),
        _ => Err(format!("unknown base field: {field}")),
    }
}
