// crates/timeout-ladder-config/tests/detection.rs
// ============================================================================
// Module: Environment Detection Tests
// Description: Verifies detection precedence across process env vars.
// ============================================================================
//! ## Overview
//! Exercises every layer of the detection precedence: pytest markers, the
//! `TESTING` flag, explicit `ENVIRONMENT` labels, GCP deployment markers,
//! and the local fallback. Tests serialize environment mutation via a global
//! lock and restore prior values on drop.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use timeout_ladder_config::DetectionEnv;
use timeout_ladder_config::detect_environment;
use timeout_ladder_core::Environment;

mod helpers;

use helpers::env::EnvGuard;

fn detection_vars() -> [&'static str; 5] {
    [
        DetectionEnv::PytestCurrentTest.as_str(),
        DetectionEnv::Testing.as_str(),
        DetectionEnv::Environment.as_str(),
        DetectionEnv::KService.as_str(),
        DetectionEnv::GcpProjectId.as_str(),
    ]
}

fn clear_detection_vars() {
    for name in detection_vars() {
        helpers::env::remove_var(name);
    }
}

// ============================================================================
// SECTION: Fallback
// ============================================================================

#[test]
fn bare_process_detects_local() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    assert_eq!(detect_environment(), Environment::Local);
}

// ============================================================================
// SECTION: Test Markers
// ============================================================================

#[test]
fn pytest_marker_selects_testing() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(
        DetectionEnv::PytestCurrentTest.as_str(),
        "tests/e2e/test_chat.py::test_reply (call)",
    );
    assert_eq!(detect_environment(), Environment::Testing);
}

#[test]
fn blank_pytest_marker_is_ignored() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::PytestCurrentTest.as_str(), "   ");
    assert_eq!(detect_environment(), Environment::Local);
}

#[test]
fn pytest_marker_wins_over_environment_label() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::PytestCurrentTest.as_str(), "tests/test_x.py::test_y");
    helpers::env::set_var(DetectionEnv::Environment.as_str(), "production");
    assert_eq!(detect_environment(), Environment::Testing);
}

#[test]
fn testing_flag_truthy_values_select_testing() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());

    for value in ["1", "true", "TRUE", "yes", " Yes "] {
        clear_detection_vars();
        helpers::env::set_var(DetectionEnv::Testing.as_str(), value);
        assert_eq!(detect_environment(), Environment::Testing, "value: {value:?}");
    }
}

#[test]
fn testing_flag_falsey_values_are_ignored() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());

    for value in ["0", "false", "no", "off"] {
        clear_detection_vars();
        helpers::env::set_var(DetectionEnv::Testing.as_str(), value);
        assert_eq!(detect_environment(), Environment::Local, "value: {value:?}");
    }
}

#[test]
fn garbage_testing_flag_falls_through_to_label() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::Testing.as_str(), "definitely");
    helpers::env::set_var(DetectionEnv::Environment.as_str(), "staging");
    assert_eq!(detect_environment(), Environment::Staging);
}

// ============================================================================
// SECTION: Explicit Labels
// ============================================================================

#[test]
fn environment_label_selects_each_environment() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());

    let cases = [
        ("local", Environment::Local),
        ("dev", Environment::Local),
        ("Staging", Environment::Staging),
        ("prod", Environment::Production),
        ("production", Environment::Production),
        ("test", Environment::Testing),
    ];
    for (label, expected) in cases {
        clear_detection_vars();
        helpers::env::set_var(DetectionEnv::Environment.as_str(), label);
        assert_eq!(detect_environment(), expected, "label: {label:?}");
    }
}

#[test]
fn malformed_label_falls_through_to_deploy_markers() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::Environment.as_str(), "produktion");
    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "acme-chat-prod");
    assert_eq!(detect_environment(), Environment::Production);
}

#[test]
fn malformed_label_without_markers_detects_local() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::Environment.as_str(), "quux");
    assert_eq!(detect_environment(), Environment::Local);
}

#[test]
fn environment_label_wins_over_deploy_markers() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::Environment.as_str(), "local");
    helpers::env::set_var(DetectionEnv::KService.as_str(), "chat-backend");
    assert_eq!(detect_environment(), Environment::Local);
}

// ============================================================================
// SECTION: Deploy Markers
// ============================================================================

#[test]
fn k_service_alone_selects_production() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::KService.as_str(), "chat-backend");
    assert_eq!(detect_environment(), Environment::Production);
}

#[test]
fn staging_project_id_selects_staging() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "acme-staging-7");
    assert_eq!(detect_environment(), Environment::Staging);
}

#[test]
fn staging_substring_match_is_case_insensitive() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "ACME-STAGING");
    assert_eq!(detect_environment(), Environment::Staging);
}

#[test]
fn non_staging_project_id_selects_production() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "acme-chat-42");
    assert_eq!(detect_environment(), Environment::Production);
}

#[test]
fn k_service_with_staging_project_selects_staging() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::KService.as_str(), "chat-backend");
    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "acme-staging");
    assert_eq!(detect_environment(), Environment::Staging);
}

#[test]
fn blank_deploy_markers_are_ignored() {
    let _lock = helpers::env::lock();
    let _guard = EnvGuard::new(&detection_vars());
    clear_detection_vars();

    helpers::env::set_var(DetectionEnv::KService.as_str(), "  ");
    helpers::env::set_var(DetectionEnv::GcpProjectId.as_str(), "");
    assert_eq!(detect_environment(), Environment::Local);
}
