// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value interpolation.
//!
//! ```text
//! EnvMap::expand(os_expand)
//!
//!   resolution order (dependencies first, cycles marked)
//!        |
//!        v  for each key
//!   1. ${NAME}   against already resolved keys
//!                miss --> keep literal, record in ExpandReport
//!   2. $(cmd)    run, capture stdout, trim one "\n"
//!                failure --> EnvError::CommandFailed (fatal)
//!   3. $VAR      against the ambient environment (os_expand only)
//! ```
//!
//! Keys that take part in a reference cycle, including a key that refers
//! to itself, count as undefined for the `${NAME}` pass.

mod cmds;
mod vars;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::env::{AmbientEnv, EnvMap};
use crate::error::EnvError;

pub use cmds::interpolate_cmds;
pub use vars::{interpolate_vars, interpolate_vars_lenient};

/// `${NAME}` references that could not be resolved during an expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandReport {
    unresolved: BTreeMap<String, Vec<String>>,
}

impl ExpandReport {
    /// Returns true if every reference resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Keys whose value was left unexpanded, with the names they referenced.
    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.unresolved
            .iter()
            .map(|(k, names)| (k.as_str(), names.as_slice()))
    }

    fn record(&mut self, key: &str, names: Vec<String>) {
        self.unresolved.insert(key.to_string(), names);
    }
}

/// Expands `$VAR` and `${VAR}` against `ambient`.
///
/// Undefined variables expand to an empty string.
#[must_use]
pub fn expand_os(value: &str, ambient: &dyn AmbientEnv) -> String {
    shellexpand::env_with_context_no_errors(value, |name| {
        Some(ambient.get(name).unwrap_or_default())
    })
    .into_owned()
}

/// Applies `${NAME}` substitution from `env` to each argument, then OS
/// expansion when `os_expand` is set.
#[must_use]
pub fn interpolate_args<S: AsRef<str>>(
    args: &[S],
    env: &EnvMap,
    os_expand: bool,
    ambient: &dyn AmbientEnv,
) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let arg = interpolate_vars_lenient(arg.as_ref(), |name| env.get(name).map(str::to_string));
            if os_expand {
                expand_os(&arg, ambient)
            } else {
                arg
            }
        })
        .collect()
}

impl EnvMap {
    /// Resolves every value in place.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::CommandFailed` if a `$(command)` substitution
    /// fails. The map is left untouched in that case.
    pub async fn expand(
        &mut self,
        os_expand: bool,
        ambient: &dyn AmbientEnv,
    ) -> Result<ExpandReport, EnvError> {
        let (order, cyclic) = resolution_order(self);
        let mut resolved = Self::new();
        let mut report = ExpandReport::default();

        for key in order {
            let raw = self.get(&key).unwrap_or_default();

            let value = match interpolate_vars(raw, |name| {
                if cyclic.contains(name) {
                    None
                } else {
                    resolved.get(name).map(str::to_string)
                }
            }) {
                Ok(value) => value,
                Err(missing) => {
                    debug!(key = %key, missing = ?missing, "leaving value unexpanded");
                    report.record(&key, missing);
                    raw.to_string()
                }
            };

            let value = interpolate_cmds(&value).await?;
            let value = if os_expand {
                expand_os(&value, ambient)
            } else {
                value
            };

            debug!(key = %key, "resolved");
            resolved.set(key, value);
        }

        *self = resolved;
        Ok(report)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Orders keys so every key comes after the keys it references, and
/// collects the keys that sit on a reference cycle.
fn resolution_order(env: &EnvMap) -> (Vec<String>, BTreeSet<String>) {
    let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut order = Vec::with_capacity(env.len());
    let mut cyclic = BTreeSet::new();

    for key in env.keys() {
        if !marks.contains_key(key) {
            visit(env, key, &mut marks, &mut stack, &mut order, &mut cyclic);
        }
    }

    (order, cyclic)
}

fn visit<'a>(
    env: &'a EnvMap,
    key: &'a str,
    marks: &mut BTreeMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    order: &mut Vec<String>,
    cyclic: &mut BTreeSet<String>,
) {
    marks.insert(key, Mark::Visiting);
    stack.push(key);

    for name in vars::placeholders(env.get(key).unwrap_or_default()) {
        if !env.contains_key(name) {
            continue;
        }
        match marks.get(name) {
            None => visit(env, name, marks, stack, order, cyclic),
            Some(Mark::Visiting) => {
                let start = stack.iter().rposition(|k| *k == name).unwrap_or(0);
                cyclic.extend(stack[start..].iter().map(|k| (*k).to_string()));
            }
            Some(Mark::Done) => {}
        }
    }

    stack.pop();
    marks.insert(key, Mark::Done);
    order.push(key.to_string());
}
