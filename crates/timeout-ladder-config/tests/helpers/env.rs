// crates/timeout-ladder-config/tests/helpers/env.rs
// ============================================================================
// Module: Test Environment Helpers
// Description: Safe wrappers for test-only environment mutation.
// Purpose: Centralize env var changes with explicit safety notes.
// ============================================================================

#![allow(unsafe_code, reason = "Test harness mutates process env vars in a controlled scope.")]

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

/// Sets an environment variable for the current process.
pub fn set_var(key: &str, value: &str) {
    // SAFETY: Tests serialize environment mutation via `lock`.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable from the current process.
pub fn remove_var(key: &str) {
    // SAFETY: Tests serialize environment mutation via `lock`.
    unsafe {
        std::env::remove_var(key);
    }
}

/// Acquires the process-wide lock serializing env mutation across tests.
pub fn lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    match LOCK.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        // A poisoned lock means a prior test panicked; the guards already
        // restored their variables on unwind, so the state is still usable.
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Restores the captured values of a set of environment variables on drop.
pub struct EnvGuard {
    /// Variable names paired with their values at capture time.
    entries: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Captures the current values of `names` for restoration on drop.
    pub fn new(names: &[&'static str]) -> Self {
        let entries = names.iter().map(|name| (*name, std::env::var(*name).ok())).collect();
        Self {
            entries,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => set_var(name, &value),
                None => remove_var(name),
            }
        }
    }
}
