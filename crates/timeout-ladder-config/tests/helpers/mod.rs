// crates/timeout-ladder-config/tests/helpers/mod.rs
#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod env;
