//! Environment helpers for tests that read `PARALLEL_*` variables.

use std::ffi::OsString;

/// Restores one environment variable to its original value on drop.
///
/// Mutating the process environment races with any concurrent reader, so
/// every test holding a guard must be marked `#[serial(env)]`.
pub struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Set `key` to `val` until the guard drops.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        Self::replace(key, Some(val.into()))
    }

    /// Unset `key` until the guard drops.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, val: Option<OsString>) -> Self {
        let original = std::env::var_os(key);
        write_var(key, val.as_ref());
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(self.key, self.original.as_ref());
    }
}

fn write_var(key: &str, val: Option<&OsString>) {
    // SAFETY: guards are only used from `#[serial(env)]` tests, so no other
    // thread touches the environment meanwhile.
    unsafe {
        match val {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}
