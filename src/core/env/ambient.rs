// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Access to the environment of the running process.
//!
//! ```text
//! AmbientEnv (trait)
//!   get / set / remove / vars
//!     |
//!     +--> ProcessEnv   std::env, mutates this process
//!     +--> MemoryEnv    RwLock<BTreeMap>, never touches std::env
//! ```

use std::collections::BTreeMap;
use std::sync::RwLock;

/// Read and write access to an ambient (parent process) environment.
pub trait AmbientEnv: Send + Sync {
    /// Returns the value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`.
    fn set(&self, key: &str, value: &str);

    /// Unsets `key`. Does nothing if it is not set.
    fn remove(&self, key: &str);

    /// Returns every variable as `(key, value)` pairs.
    fn vars(&self) -> Vec<(String, String)>;

    /// Returns true if `key` is set.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// The real environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl AmbientEnv for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        // SAFETY: only the controller's task writes the environment, and
        // only before it spawns the child. Nothing else in this crate reads
        // the environment at that point.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn remove(&self, key: &str) {
        // SAFETY: same contract as `set`.
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }
}

/// An in-memory environment.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<BTreeMap<String, String>>,
}

impl MemoryEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment seeded with `vars`.
    #[must_use]
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl AmbientEnv for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
