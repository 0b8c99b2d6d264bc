// crates/timeout-ladder-config/src/examples.rs
// ============================================================================
// Module: Overrides Example
// Description: Canonical example overrides payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for the deploy-time overrides file. The output is
//! deterministic, parses under the strict loader, and validates across the
//! full (environment, tier) matrix; a test installs it to prove that.

/// Returns a canonical example `timeout-ladder.toml` overrides file.
#[must_use]
pub fn overrides_toml_example() -> String {
    String::from(
        r"[local.free]
execution_timeout_secs = 540
# receive_timeout_secs = 660

[staging.enterprise]
stream_idle_timeout_secs = 90

[production.base]
http_request_timeout_secs = 90

[production.pro]
inference_timeout_secs = 300

[testing.base]
test_suite_timeout_secs = 180
",
    )
}
