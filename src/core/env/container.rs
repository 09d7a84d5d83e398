// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The resolved environment map.
//!
//! # Architecture
//!
//! ```text
//! EnvMap (BTreeMap<String, String>, case-sensitive, sorted)
//! Sources: EnvMap::new(), from_section(), FromIterator
//! Ops:     set/get/remove, get_missing_keys, diff
//! Render:  to_kv_strings(), to_expanded_kv_strings()
//! ```

use std::collections::BTreeMap;

use super::ambient::AmbientEnv;
use crate::core::ini::Section;
use crate::core::interpolate::interpolate_args;

/// A set of environment variables keyed by name.
///
/// Keys are case-sensitive and iterate in sorted order, which keeps every
/// rendering of the map stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
}

/// Keys that differ between two [`EnvMap`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDiff {
    /// Keys present only in the newer map.
    pub added: Vec<String>,
    /// Keys present only in the older map.
    pub removed: Vec<String>,
    /// Keys present in both with different values.
    pub changed: Vec<String>,
}

impl EnvDiff {
    /// Returns true if both maps were identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl EnvMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Creates an environment from the raw keys of an INI section.
    #[must_use]
    pub fn from_section(section: &Section) -> Self {
        section
            .entries()
            .map(|entry| (entry.key().to_string(), entry.value().to_string()))
            .collect()
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Gets a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.vars.remove(key);
        self
    }

    /// Returns an iterator over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns an iterator over variable names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns every name from `required` whose value is absent or empty,
    /// in the order given.
    #[must_use]
    pub fn get_missing_keys<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| self.get(key).is_none_or(str::is_empty))
            .map(str::to_string)
            .collect()
    }

    /// Renders the map as `KEY=VALUE` strings.
    #[must_use]
    pub fn to_kv_strings(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Renders the map as `KEY=VALUE` strings after interpolating each
    /// value against the map itself, and against `ambient` when
    /// `os_expand` is set.
    #[must_use]
    pub fn to_expanded_kv_strings(&self, os_expand: bool, ambient: &dyn AmbientEnv) -> Vec<String> {
        let values: Vec<String> = self.vars.values().cloned().collect();
        let values = interpolate_args(&values, self, os_expand, ambient);
        self.keys()
            .zip(values)
            .map(|(k, v)| format!("{k}={v}"))
            .collect()
    }

    /// Compares `self` (older) with `other` (newer).
    #[must_use]
    pub fn diff(&self, other: &Self) -> EnvDiff {
        let mut diff = EnvDiff::default();
        for (key, value) in other.iter() {
            match self.get(key) {
                None => diff.added.push(key.to_string()),
                Some(old) if old != value => diff.changed.push(key.to_string()),
                Some(_) => {}
            }
        }
        diff.removed = self
            .keys()
            .filter(|key| !other.contains_key(key))
            .map(str::to_string)
            .collect();
        diff
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EnvMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
