// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! EnvMap (BTreeMap<String, String>)
//! Sources: EnvMap::from_section(), current_env()
//! Ops: set/get/get_missing_keys/diff/to_kv_strings
//!
//! AmbientEnv: ProcessEnv (real) | MemoryEnv (in-memory)
//! ```
//!
//! - **Case-sensitive** keys on every platform
//! - **Sorted** iteration, so rendered output is stable
//! - Mutating the parent environment only happens through [`AmbientEnv`]

pub mod ambient;
pub mod container;


pub use ambient::{AmbientEnv, MemoryEnv, ProcessEnv};
pub use container::{EnvDiff, EnvMap};

/// Captures the given ambient environment as an [`EnvMap`].
#[must_use]
pub fn current_env(ambient: &dyn AmbientEnv) -> EnvMap {
    ambient.vars().into_iter().collect()
}
