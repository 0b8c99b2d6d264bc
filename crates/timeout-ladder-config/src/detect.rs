// crates/timeout-ladder-config/src/detect.rs
// ============================================================================
// Module: Environment Detection
// Description: Classifies the process deployment environment from env vars.
// Purpose: Centralize detection precedence with infallible fallbacks.
// Dependencies: timeout-ladder-core, std
// ============================================================================

//! ## Overview
//! Detection never fails: malformed labels, unrecognized flag values, and
//! non-UTF-8 bytes are treated as unset and the next source is consulted.
//! Test markers are checked first so CI runs that also set `ENVIRONMENT` or
//! deploy markers still get test budgets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use timeout_ladder_core::Environment;

// ============================================================================
// SECTION: Detection Variables
// ============================================================================

/// Environment variables consulted by detection, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionEnv {
    /// Exported by the pytest harness for every running test.
    PytestCurrentTest,
    /// Explicit test-mode flag (`1`, `true`, or `yes`).
    Testing,
    /// Explicit environment label parsed via [`Environment::parse_label`].
    Environment,
    /// Cloud Run service marker.
    KService,
    /// GCP project identifier.
    GcpProjectId,
}

impl DetectionEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PytestCurrentTest => "PYTEST_CURRENT_TEST",
            Self::Testing => "TESTING",
            Self::Environment => "ENVIRONMENT",
            Self::KService => "K_SERVICE",
            Self::GcpProjectId => "GCP_PROJECT_ID",
        }
    }
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Classifies the deployment environment for this process.
///
/// Sources are consulted in precedence order:
///
/// 1. `PYTEST_CURRENT_TEST` set and non-blank yields [`Environment::Testing`];
/// 2. `TESTING` truthy (`1`, `true`, `yes`) yields [`Environment::Testing`];
/// 3. `ENVIRONMENT` parsed via [`Environment::parse_label`];
/// 4. `K_SERVICE` or `GCP_PROJECT_ID` set yields [`Environment::Staging`]
///    when the project id contains `staging`, otherwise
///    [`Environment::Production`];
/// 5. [`Environment::Local`].
#[must_use]
pub fn detect_environment() -> Environment {
    if read_env(DetectionEnv::PytestCurrentTest).is_some() {
        return Environment::Testing;
    }
    if read_env(DetectionEnv::Testing).is_some_and(|value| is_truthy(&value)) {
        return Environment::Testing;
    }
    if let Some(label) = read_env(DetectionEnv::Environment)
        && let Some(environment) = Environment::parse_label(&label)
    {
        return environment;
    }
    let project_id = read_env(DetectionEnv::GcpProjectId);
    if project_id.is_some() || read_env(DetectionEnv::KService).is_some() {
        let staging_project = project_id
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("staging"));
        return if staging_project { Environment::Staging } else { Environment::Production };
    }
    Environment::Local
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads one detection variable, treating blank or non-UTF-8 values as unset.
fn read_env(key: DetectionEnv) -> Option<String> {
    let value = std::env::var_os(key.as_str())?.into_string().ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Returns true for the accepted truthy literals.
fn is_truthy(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed == "1" || trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes")
}
