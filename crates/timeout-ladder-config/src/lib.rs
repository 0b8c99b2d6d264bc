// crates/timeout-ladder-config/src/lib.rs
// ============================================================================
// Module: Timeout Ladder Config Library
// Description: Detection, tables, overrides, resolver cache, and artifacts.
// Purpose: Single source of truth for timeout budget resolution.
// Dependencies: timeout-ladder-core, serde, toml
// ============================================================================

//! ## Overview
//! `timeout-ladder-config` resolves timeout budgets for the current process:
//! it classifies the deployment environment from env vars, derives tier
//! profiles from built-in base tables, applies optional deploy-time
//! overrides with strict fail-closed validation, and memoizes resolved
//! profiles per (environment, tier) pair. Deterministic generators keep the
//! overrides schema, docs, and example in sync with the model.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod detect;
pub mod docs;
pub mod examples;
pub mod overrides;
pub mod resolver;
pub mod schema;
pub mod tables;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use detect::DetectionEnv;
pub use detect::detect_environment;
pub use docs::DocsError;
pub use docs::overrides_docs_markdown;
pub use docs::verify_overrides_docs;
pub use docs::write_overrides_docs;
pub use examples::overrides_toml_example;
pub use overrides::*;
pub use resolver::cached_profile_count;
pub use resolver::clear_cache;
pub use resolver::connect_timeout_secs;
pub use resolver::execution_timeout_secs;
pub use resolver::heartbeat_interval_secs;
pub use resolver::http_request_timeout_secs;
pub use resolver::inference_timeout_secs;
pub use resolver::install_overrides;
pub use resolver::receive_timeout_secs;
pub use resolver::resolve;
pub use resolver::resolve_for;
pub use resolver::send_timeout_secs;
pub use resolver::test_case_timeout_secs;
pub use resolver::test_suite_timeout_secs;
pub use schema::overrides_schema;
pub use tables::RECEIVE_HEADROOM_SECS;
pub use tables::base_profile;
pub use tables::enhance_profile;
