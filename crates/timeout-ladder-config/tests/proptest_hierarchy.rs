// crates/timeout-ladder-config/tests/proptest_hierarchy.rs
// ============================================================================
// Module: Hierarchy Property-Based Tests
// Description: Property tests for tier enhancement and label parsing.
// Purpose: Detect panics and invariant breaks across wide input ranges.
// ============================================================================

//! Property-based tests for enhancement invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use timeout_ladder_config::RECEIVE_HEADROOM_SECS;
use timeout_ladder_config::enhance_profile;
use timeout_ladder_core::CustomerTier;
use timeout_ladder_core::Environment;
use timeout_ladder_core::TimeoutProfile;

/// Upper bound for generated budgets, far below any saturation point.
const MAX_BUDGET_SECS: u64 = 1_000;

/// Every accepted environment label alias and its parse target.
const ENVIRONMENT_ALIASES: [(&str, Environment); 9] = [
    ("local", Environment::Local),
    ("dev", Environment::Local),
    ("development", Environment::Local),
    ("staging", Environment::Staging),
    ("stage", Environment::Staging),
    ("production", Environment::Production),
    ("prod", Environment::Production),
    ("testing", Environment::Testing),
    ("test", Environment::Testing),
];

/// Every accepted tier label alias and its parse target.
const TIER_ALIASES: [(&str, CustomerTier); 4] = [
    ("free", CustomerTier::Free),
    ("pro", CustomerTier::Pro),
    ("professional", CustomerTier::Pro),
    ("enterprise", CustomerTier::Enterprise),
];

/// Generates profiles that satisfy the timeout hierarchy by construction.
///
/// Execution margins start at 16 because the streaming idle budgets granted
/// during enhancement are fixed at 30s and 60s while totals track execution:
/// the scaled execution window has to clear the larger idle budget.
fn valid_base_strategy() -> impl Strategy<Value = TimeoutProfile> {
    let phases = (
        1 ..= MAX_BUDGET_SECS,
        1 ..= MAX_BUDGET_SECS,
        1 ..= MAX_BUDGET_SECS,
        1 ..= MAX_BUDGET_SECS,
    );
    let margins = (16 ..= MAX_BUDGET_SECS, 1 ..= MAX_BUDGET_SECS, 1 ..= MAX_BUDGET_SECS);
    let singles = (1 ..= MAX_BUDGET_SECS, 1 ..= MAX_BUDGET_SECS, 1 ..= MAX_BUDGET_SECS);
    let http = (1 ..= MAX_BUDGET_SECS, 0 ..= MAX_BUDGET_SECS);
    let suite = (1 ..= MAX_BUDGET_SECS, 0 ..= MAX_BUDGET_SECS);
    (phases, margins, singles, http, suite).prop_map(|(phases, margins, singles, http, suite)| {
        let (context_load, inference, tool_call, finalize) = phases;
        let (execution_margin, receive_margin, heartbeat_margin) = margins;
        let (connect, send, heartbeat_interval) = singles;
        let (http_connect, http_margin) = http;
        let (test_case, suite_margin) = suite;
        let longest_phase = context_load.max(inference).max(tool_call).max(finalize);
        let execution = longest_phase + execution_margin;
        TimeoutProfile {
            connect_timeout_secs: connect,
            receive_timeout_secs: execution + receive_margin,
            send_timeout_secs: send,
            heartbeat_interval_secs: heartbeat_interval,
            heartbeat_timeout_secs: heartbeat_interval + heartbeat_margin,
            execution_timeout_secs: execution,
            context_load_timeout_secs: context_load,
            inference_timeout_secs: inference,
            tool_call_timeout_secs: tool_call,
            finalize_timeout_secs: finalize,
            http_connect_timeout_secs: http_connect,
            http_request_timeout_secs: http_connect + http_margin,
            test_case_timeout_secs: test_case,
            test_suite_timeout_secs: test_case + suite_margin,
            stream_idle_timeout_secs: None,
            stream_total_timeout_secs: None,
            tier: CustomerTier::Free,
        }
    })
}

/// Generates profiles with fully unconstrained budgets.
fn unconstrained_strategy() -> impl Strategy<Value = TimeoutProfile> {
    any::<[u64; 14]>().prop_map(|budgets| TimeoutProfile {
        connect_timeout_secs: budgets[0],
        receive_timeout_secs: budgets[1],
        send_timeout_secs: budgets[2],
        heartbeat_interval_secs: budgets[3],
        heartbeat_timeout_secs: budgets[4],
        execution_timeout_secs: budgets[5],
        context_load_timeout_secs: budgets[6],
        inference_timeout_secs: budgets[7],
        tool_call_timeout_secs: budgets[8],
        finalize_timeout_secs: budgets[9],
        http_connect_timeout_secs: budgets[10],
        http_request_timeout_secs: budgets[11],
        test_case_timeout_secs: budgets[12],
        test_suite_timeout_secs: budgets[13],
        stream_idle_timeout_secs: None,
        stream_total_timeout_secs: None,
        tier: CustomerTier::Free,
    })
}

/// Applies ASCII case flips and whitespace padding to an alias.
fn mangle(alias: &str, case_mask: u16, left_pad: usize, right_pad: usize) -> String {
    let flipped: String = alias
        .chars()
        .enumerate()
        .map(|(position, ch)| {
            if case_mask & (1 << (position % 16)) == 0 {
                ch
            } else {
                ch.to_ascii_uppercase()
            }
        })
        .collect();
    format!("{}{}{}", " ".repeat(left_pad), flipped, " ".repeat(right_pad))
}

proptest! {
    #[test]
    fn enhancement_preserves_the_hierarchy(base in valid_base_strategy()) {
        prop_assert!(base.validate().is_ok(), "strategy must produce valid bases");
        for tier in CustomerTier::ALL {
            let enhanced = enhance_profile(base.clone(), tier);
            prop_assert!(
                enhanced.validate().is_ok(),
                "{} enhancement broke the hierarchy: {:?}",
                tier,
                enhanced
            );
        }
    }

    #[test]
    fn free_enhancement_is_the_identity(base in valid_base_strategy()) {
        let enhanced = enhance_profile(base.clone(), CustomerTier::Free);
        prop_assert_eq!(enhanced, base);
    }

    #[test]
    fn execution_scaling_is_exact(base in valid_base_strategy()) {
        let pro = enhance_profile(base.clone(), CustomerTier::Pro);
        prop_assert_eq!(pro.execution_timeout_secs, base.execution_timeout_secs * 2);
        prop_assert_eq!(
            pro.receive_timeout_secs,
            pro.execution_timeout_secs + RECEIVE_HEADROOM_SECS
        );
        prop_assert_eq!(pro.stream_total_timeout_secs, Some(pro.execution_timeout_secs));

        let enterprise = enhance_profile(base.clone(), CustomerTier::Enterprise);
        prop_assert_eq!(enterprise.execution_timeout_secs, base.execution_timeout_secs * 4);
        prop_assert_eq!(
            enterprise.receive_timeout_secs,
            enterprise.execution_timeout_secs + RECEIVE_HEADROOM_SECS
        );
        prop_assert_eq!(
            enterprise.stream_total_timeout_secs,
            Some(enterprise.execution_timeout_secs)
        );
    }

    #[test]
    fn enhancement_never_panics_on_extreme_budgets(base in unconstrained_strategy()) {
        for tier in CustomerTier::ALL {
            let enhanced = enhance_profile(base.clone(), tier);
            prop_assert_eq!(enhanced.tier, tier);
        }
    }

    #[test]
    fn environment_labels_parse_despite_mangling(
        index in 0 .. ENVIRONMENT_ALIASES.len(),
        case_mask in any::<u16>(),
        left_pad in 0_usize .. 4,
        right_pad in 0_usize .. 4,
    ) {
        let (alias, expected) = ENVIRONMENT_ALIASES[index];
        let mangled = mangle(alias, case_mask, left_pad, right_pad);
        prop_assert_eq!(Environment::parse_label(&mangled), Some(expected));
    }

    #[test]
    fn tier_labels_parse_despite_mangling(
        index in 0 .. TIER_ALIASES.len(),
        case_mask in any::<u16>(),
        left_pad in 0_usize .. 4,
        right_pad in 0_usize .. 4,
    ) {
        let (alias, expected) = TIER_ALIASES[index];
        let mangled = mangle(alias, case_mask, left_pad, right_pad);
        prop_assert_eq!(CustomerTier::parse_label(&mangled), Some(expected));
    }
}
