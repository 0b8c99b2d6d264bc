// crates/timeout-ladder-core/src/lib.rs
// ============================================================================
// Module: Timeout Ladder Core Library
// Description: Domain types for tiered timeout-budget resolution.
// Purpose: Single source of truth for environments, tiers, and profiles.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `timeout-ladder-core` defines the domain model shared by every Timeout
//! Ladder consumer: the closed set of deployment environments, the customer
//! tiers, and the [`TimeoutProfile`] record together with its
//! timeout-hierarchy invariant. Resolution, tables, and caching live in
//! `timeout-ladder-config`; this crate stays free of I/O and process state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod environment;
pub mod profile;
pub mod tier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use environment::Environment;
pub use profile::HierarchyError;
pub use profile::TimeoutProfile;
pub use tier::CustomerTier;
