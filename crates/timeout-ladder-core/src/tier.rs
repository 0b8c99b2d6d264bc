// crates/timeout-ladder-core/src/tier.rs
// ============================================================================
// Module: Customer Tier
// Description: Closed set of customer tiers for timeout enhancement.
// Purpose: Provide stable labels and permissive parsing for tier selection.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The customer tier selects which enhancement applies on top of the
//! environment base table. [`CustomerTier::Free`] is the base tier: it never
//! enhances and carries no streaming budgets by default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Customer tier recognized by timeout enhancement.
///
/// # Invariants
/// - Variants are a closed set; canonical labels are stable wire forms.
/// - [`CustomerTier::Free`] is the base tier and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    /// Base tier; receives the environment table unchanged.
    #[default]
    Free,
    /// Paid tier with doubled execution-family budgets and streaming.
    Pro,
    /// Paid tier with quadrupled execution-family budgets and streaming.
    Enterprise,
}

impl CustomerTier {
    /// All tiers, in enhancement order.
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Enterprise];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    /// Parses a tier label permissively.
    ///
    /// Input is trimmed and lowercased before matching. Malformed labels
    /// yield `None` rather than an error.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "pro" | "professional" => Some(Self::Pro),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
