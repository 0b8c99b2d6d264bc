// crates/timeout-ladder-core/src/environment.rs
// ============================================================================
// Module: Deployment Environment
// Description: Closed set of deployment environments for timeout resolution.
// Purpose: Provide stable labels and permissive parsing with no error path.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The deployment environment selects which base timeout table applies.
//! Labels parse permissively (trimmed, lowercased, common aliases accepted)
//! and malformed labels yield `None` so classification can fall through to
//! the next signal instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Deployment environment recognized by timeout resolution.
///
/// # Invariants
/// - Variants are a closed set; canonical labels are stable wire forms.
/// - [`Environment::Local`] is the fallback when no classification signal
///   matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Developer workstation; also the default classification.
    #[default]
    Local,
    /// Pre-production staging deployment.
    Staging,
    /// Production deployment.
    Production,
    /// Test-harness runs (unit, integration, e2e).
    Testing,
}

impl Environment {
    /// All environments, in base-table order.
    pub const ALL: [Self; 4] = [Self::Local, Self::Staging, Self::Production, Self::Testing];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }

    /// Parses an environment label permissively.
    ///
    /// Input is trimmed and lowercased before matching; common deployment
    /// aliases are accepted. Malformed labels yield `None` rather than an
    /// error so classification can fall through to the next signal.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Some(Self::Local),
            "staging" | "stage" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            "testing" | "test" => Some(Self::Testing),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
