// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration tables of `.envsetrc`.
//!
//! ```text
//! [environments]  names
//! [meta]          file, dir, print, json
//! [template]      file, path
//! [restart]       enabled, forever, max_restarts, ignore
//! ```

use serde::{Deserialize, Serialize};

/// Environment names accepted as subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentsConfig {
    pub names: Vec<String>,
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            names: ["test", "staging", "production", "development"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Metadata file location and output defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaConfig {
    /// Metadata file name.
    pub file: String,
    /// Directory holding the metadata file.
    pub dir: String,
    /// Print the compare report.
    pub print: bool,
    /// Render the compare report as JSON.
    pub json: bool,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            file: "metadata.json".to_string(),
            dir: ".meta".to_string(),
            print: true,
            json: false,
        }
    }
}

/// Template file location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    pub file: String,
    pub path: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            file: "envset.example".to_string(),
            path: ".".to_string(),
        }
    }
}

/// Restart defaults for the run path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestartConfig {
    pub enabled: bool,
    /// Restart without bound.
    pub forever: bool,
    pub max_restarts: u64,
    /// Environments that never restart.
    pub ignore: Vec<String>,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            forever: false,
            max_restarts: 3,
            ignore: Vec::new(),
        }
    }
}
