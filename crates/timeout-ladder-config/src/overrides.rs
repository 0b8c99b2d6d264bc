// crates/timeout-ladder-config/src/overrides.rs
// ============================================================================
// Module: Deploy-Time Overrides
// Description: Canonical model and loader for timeout-ladder.toml.
// Purpose: Strict, fail-closed override loading and matrix validation.
// Dependencies: serde, toml, timeout-ladder-core
// ============================================================================

//! ## Overview
//! A deployment may raise or lower individual budgets without a rebuild via
//! an optional TOML file. Each environment table carries a `base` layer
//! applied to every tier plus optional per-tier layers; every field is
//! optional and unknown keys are rejected so typos cannot become silently
//! ignored overrides. A file is validated across the full
//! (environment, tier) matrix at install time, never at lookup time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use timeout_ladder_core::CustomerTier;
use timeout_ladder_core::Environment;
use timeout_ladder_core::TimeoutProfile;

use crate::tables::base_profile;
use crate::tables::enhance_profile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default overrides filename when no path is specified.
const DEFAULT_OVERRIDES_NAME: &str = "timeout-ladder.toml";
/// Environment variable used to override the overrides file path.
pub const OVERRIDES_ENV_VAR: &str = "TIMEOUT_LADDER_CONFIG";
/// Maximum overrides file size in bytes.
pub(crate) const MAX_OVERRIDES_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Override Types
// ============================================================================

/// Deploy-time override file for timeout budgets.
///
/// Top-level tables are the four deployment environments; each carries a
/// `base` layer plus optional per-tier layers. An empty value is the
/// identity: applying it changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LadderOverrides {
    /// Overrides applied in the local environment.
    #[serde(default)]
    pub local: EnvironmentOverrides,
    /// Overrides applied in the staging environment.
    #[serde(default)]
    pub staging: EnvironmentOverrides,
    /// Overrides applied in the production environment.
    #[serde(default)]
    pub production: EnvironmentOverrides,
    /// Overrides applied in the testing environment.
    #[serde(default)]
    pub testing: EnvironmentOverrides,
}

/// Override layers for one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverrides {
    /// Layer applied to every tier, after tier enhancement.
    #[serde(default)]
    pub base: ProfileOverrides,
    /// Layer applied to the free tier only, after the base layer.
    #[serde(default)]
    pub free: ProfileOverrides,
    /// Layer applied to the pro tier only, after the base layer.
    #[serde(default)]
    pub pro: ProfileOverrides,
    /// Layer applied to the enterprise tier only, after the base layer.
    #[serde(default)]
    pub enterprise: ProfileOverrides,
}

/// Field-wise replacements for one override layer.
///
/// Every field is optional; a set field replaces the computed value outright.
/// Streaming budgets can be granted or resized but not removed, since TOML
/// cannot express an absent-value override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    /// Replacement WebSocket handshake budget.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Replacement outer transport receive window.
    #[serde(default)]
    pub receive_timeout_secs: Option<u64>,
    /// Replacement outbound frame flush budget.
    #[serde(default)]
    pub send_timeout_secs: Option<u64>,
    /// Replacement ping cadence.
    #[serde(default)]
    pub heartbeat_interval_secs: Option<u64>,
    /// Replacement heartbeat timeout.
    #[serde(default)]
    pub heartbeat_timeout_secs: Option<u64>,
    /// Replacement whole agent run budget.
    #[serde(default)]
    pub execution_timeout_secs: Option<u64>,
    /// Replacement context-load phase budget.
    #[serde(default)]
    pub context_load_timeout_secs: Option<u64>,
    /// Replacement inference phase budget.
    #[serde(default)]
    pub inference_timeout_secs: Option<u64>,
    /// Replacement tool-call phase budget.
    #[serde(default)]
    pub tool_call_timeout_secs: Option<u64>,
    /// Replacement finalize phase budget.
    #[serde(default)]
    pub finalize_timeout_secs: Option<u64>,
    /// Replacement outbound HTTP connect budget.
    #[serde(default)]
    pub http_connect_timeout_secs: Option<u64>,
    /// Replacement outbound HTTP request budget.
    #[serde(default)]
    pub http_request_timeout_secs: Option<u64>,
    /// Replacement single test case budget.
    #[serde(default)]
    pub test_case_timeout_secs: Option<u64>,
    /// Replacement whole suite budget.
    #[serde(default)]
    pub test_suite_timeout_secs: Option<u64>,
    /// Replacement streaming idle budget.
    #[serde(default)]
    pub stream_idle_timeout_secs: Option<u64>,
    /// Replacement streaming total budget.
    #[serde(default)]
    pub stream_total_timeout_secs: Option<u64>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl LadderOverrides {
    /// Loads overrides from disk using the default resolution rules.
    ///
    /// The path is the explicit argument, else the `TIMEOUT_LADDER_CONFIG`
    /// environment variable, else `timeout-ladder.toml` in the working
    /// directory. A missing file at the fallback default yields an empty
    /// override set; a missing file at an explicitly requested path is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// non-UTF-8, fails to parse, or fails matrix validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_OVERRIDES_FILE_SIZE {
            return Err(ConfigError::Invalid("overrides file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("overrides file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates overrides from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or matrix validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let overrides: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Validates the override set across the full (environment, tier) matrix.
    ///
    /// Every pair is materialized through the application chain and checked
    /// against the timeout hierarchy, so a bad file is rejected up front with
    /// an error naming the offending environment and tier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any resolved pair violates the hierarchy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for environment in Environment::ALL {
            for tier in CustomerTier::ALL {
                self.effective_profile(environment, tier).validate().map_err(|err| {
                    ConfigError::Invalid(format!("{environment}.{tier}: {err}"))
                })?;
            }
        }
        Ok(())
    }

    /// Computes the effective profile for one pair.
    ///
    /// Application order: built-in base table, tier enhancement, the
    /// environment's `base` layer, then the tier layer. The result is not
    /// validated here; [`LadderOverrides::validate`] covers the matrix.
    #[must_use]
    pub fn effective_profile(
        &self,
        environment: Environment,
        tier: CustomerTier,
    ) -> TimeoutProfile {
        let layers = self.environment(environment);
        let mut profile = enhance_profile(base_profile(environment), tier);
        layers.base.apply(&mut profile);
        layers.layer_for(tier).apply(&mut profile);
        profile
    }

    /// Returns the override layers for an environment.
    #[must_use]
    pub const fn environment(&self, environment: Environment) -> &EnvironmentOverrides {
        match environment {
            Environment::Local => &self.local,
            Environment::Staging => &self.staging,
            Environment::Production => &self.production,
            Environment::Testing => &self.testing,
        }
    }
}

impl EnvironmentOverrides {
    /// Returns the layer for a tier.
    #[must_use]
    pub const fn layer_for(&self, tier: CustomerTier) -> &ProfileOverrides {
        match tier {
            CustomerTier::Free => &self.free,
            CustomerTier::Pro => &self.pro,
            CustomerTier::Enterprise => &self.enterprise,
        }
    }
}

impl ProfileOverrides {
    /// Applies every set field onto a profile.
    pub fn apply(&self, profile: &mut TimeoutProfile) {
        if let Some(secs) = self.connect_timeout_secs {
            profile.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.receive_timeout_secs {
            profile.receive_timeout_secs = secs;
        }
        if let Some(secs) = self.send_timeout_secs {
            profile.send_timeout_secs = secs;
        }
        if let Some(secs) = self.heartbeat_interval_secs {
            profile.heartbeat_interval_secs = secs;
        }
        if let Some(secs) = self.heartbeat_timeout_secs {
            profile.heartbeat_timeout_secs = secs;
        }
        if let Some(secs) = self.execution_timeout_secs {
            profile.execution_timeout_secs = secs;
        }
        if let Some(secs) = self.context_load_timeout_secs {
            profile.context_load_timeout_secs = secs;
        }
        if let Some(secs) = self.inference_timeout_secs {
            profile.inference_timeout_secs = secs;
        }
        if let Some(secs) = self.tool_call_timeout_secs {
            profile.tool_call_timeout_secs = secs;
        }
        if let Some(secs) = self.finalize_timeout_secs {
            profile.finalize_timeout_secs = secs;
        }
        if let Some(secs) = self.http_connect_timeout_secs {
            profile.http_connect_timeout_secs = secs;
        }
        if let Some(secs) = self.http_request_timeout_secs {
            profile.http_request_timeout_secs = secs;
        }
        if let Some(secs) = self.test_case_timeout_secs {
            profile.test_case_timeout_secs = secs;
        }
        if let Some(secs) = self.test_suite_timeout_secs {
            profile.test_suite_timeout_secs = secs;
        }
        if let Some(secs) = self.stream_idle_timeout_secs {
            profile.stream_idle_timeout_secs = Some(secs);
        }
        if let Some(secs) = self.stream_total_timeout_secs {
            profile.stream_total_timeout_secs = Some(secs);
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Override loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the overrides file.
    #[error("overrides io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("overrides parse error: {0}")]
    Parse(String),
    /// Invalid override data.
    #[error("invalid overrides: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the overrides path and whether the caller requested it
/// explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(OVERRIDES_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("overrides path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_OVERRIDES_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("overrides path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("overrides path component too long".to_string()));
        }
        if value == ".." {
            return Err(ConfigError::Invalid(
                "overrides path must not contain traversal".to_string(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
