// crates/timeout-ladder-config/src/resolver.rs
// ============================================================================
// Module: Profile Resolver
// Description: Process-wide memoized (environment, tier) profile cache.
// Purpose: Cheap repeated lookups plus integer accessors for call sites.
// Dependencies: timeout-ladder-core, std
// ============================================================================

//! ## Overview
//! Profiles are computed once per (environment, tier) pair and memoized for
//! the life of the process. Built-in tables and installed overrides are
//! validated ahead of time, so resolution is infallible. [`clear_cache`]
//! drops both the memoized profiles and the installed overrides; tests that
//! mutate detection variables call it between cases.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::sync::PoisonError;

use timeout_ladder_core::CustomerTier;
use timeout_ladder_core::Environment;
use timeout_ladder_core::TimeoutProfile;

use crate::detect::detect_environment;
use crate::overrides::ConfigError;
use crate::overrides::LadderOverrides;
use crate::tables::base_profile;
use crate::tables::enhance_profile;

// ============================================================================
// SECTION: Resolver State
// ============================================================================

/// Process-wide resolver state.
#[derive(Default)]
struct ResolverState {
    /// Memoized profiles per (environment, tier) pair.
    profiles: HashMap<(Environment, CustomerTier), Arc<TimeoutProfile>>,
    /// Installed override set, when any.
    overrides: Option<LadderOverrides>,
}

/// Locks the process-wide resolver state, recovering from poisoning.
fn state() -> MutexGuard<'static, ResolverState> {
    static STATE: OnceLock<Mutex<ResolverState>> = OnceLock::new();
    STATE
        .get_or_init(|| Mutex::new(ResolverState::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Computes the profile for a pair from tables, enhancement, and overrides.
fn compute_profile(
    overrides: Option<&LadderOverrides>,
    environment: Environment,
    tier: CustomerTier,
) -> TimeoutProfile {
    overrides.map_or_else(
        || enhance_profile(base_profile(environment), tier),
        |overrides| overrides.effective_profile(environment, tier),
    )
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the timeout profile for the detected environment.
#[must_use]
pub fn resolve(tier: CustomerTier) -> Arc<TimeoutProfile> {
    resolve_for(detect_environment(), tier)
}

/// Resolves the memoized timeout profile for an explicit pair.
///
/// The first lookup for a pair computes the base table, tier enhancement,
/// and any installed overrides; later lookups return the memoized handle.
#[must_use]
pub fn resolve_for(environment: Environment, tier: CustomerTier) -> Arc<TimeoutProfile> {
    let mut guard = state();
    if let Some(profile) = guard.profiles.get(&(environment, tier)) {
        return Arc::clone(profile);
    }
    let profile = Arc::new(compute_profile(guard.overrides.as_ref(), environment, tier));
    guard.profiles.insert((environment, tier), Arc::clone(&profile));
    profile
}

/// Installs a deploy-time override set.
///
/// The set is validated eagerly across the full (environment, tier) matrix,
/// then replaces any previously installed set and invalidates all memoized
/// profiles. Without an install, resolution uses the built-in tables only.
///
/// # Errors
///
/// Returns [`ConfigError`] when any resolved pair violates the timeout
/// hierarchy.
pub fn install_overrides(overrides: LadderOverrides) -> Result<(), ConfigError> {
    overrides.validate()?;
    let mut guard = state();
    guard.profiles.clear();
    guard.overrides = Some(overrides);
    Ok(())
}

/// Clears memoized profiles and any installed overrides.
pub fn clear_cache() {
    let mut guard = state();
    guard.profiles.clear();
    guard.overrides = None;
}

/// Returns the number of memoized profiles.
#[must_use]
pub fn cached_profile_count() -> usize {
    state().profiles.len()
}

// ============================================================================
// SECTION: Integer Accessors
// ============================================================================

/// WebSocket handshake budget in seconds for the detected environment.
#[must_use]
pub fn connect_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).connect_timeout_secs
}

/// Outer transport receive window in seconds for the detected environment.
#[must_use]
pub fn receive_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).receive_timeout_secs
}

/// Outbound frame flush budget in seconds for the detected environment.
#[must_use]
pub fn send_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).send_timeout_secs
}

/// Ping cadence in seconds for the detected environment.
#[must_use]
pub fn heartbeat_interval_secs(tier: CustomerTier) -> u64 {
    resolve(tier).heartbeat_interval_secs
}

/// Whole agent run budget in seconds for the detected environment.
#[must_use]
pub fn execution_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).execution_timeout_secs
}

/// Inference phase budget in seconds for the detected environment.
#[must_use]
pub fn inference_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).inference_timeout_secs
}

/// Outbound HTTP request budget in seconds for the detected environment.
#[must_use]
pub fn http_request_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).http_request_timeout_secs
}

/// Single test case budget in seconds for the detected environment.
#[must_use]
pub fn test_case_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).test_case_timeout_secs
}

/// Whole suite budget in seconds for the detected environment.
#[must_use]
pub fn test_suite_timeout_secs(tier: CustomerTier) -> u64 {
    resolve(tier).test_suite_timeout_secs
}
