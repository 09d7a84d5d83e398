// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.envsetrc` configuration.
//!
//! # Lookup
//!
//! ```text
//! --rc FILE          required, read as-is
//!     |
//!     v  (absent)
//! .envsetrc          searched upward from the working directory
//!     |
//!     v  (absent)
//! defaults           Config::default(), same as DEFAULT_RC
//! ```
//!
//! # Per-environment lists
//!
//! ```toml
//! [required]
//! production = ["DB_URL", "API_KEY"]
//!
//! [ignored]
//! staging = ["BUILD_ID"]
//! ```
//!
//! Keys given on the command line are merged after the configured ones.

pub mod loader;
pub mod types;


use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub use loader::ConfigLoader;
pub use types::{EnvironmentsConfig, MetaConfig, RestartConfig, TemplateConfig};

/// Name of the configuration file.
pub const RC_FILENAME: &str = ".envsetrc";

/// Default `.envsetrc` contents, printed by `envset config`.
pub const DEFAULT_RC: &str = r#"filename = ".envset"
isolated = true
expand = true
export_env_name = "APP_ENV"
comment_section_names = ["comments"]

[environments]
names = ["test", "staging", "production", "development"]

# [required]
# production = ["DB_URL"]

# [ignored]
# staging = ["BUILD_ID"]

[meta]
file = "metadata.json"
dir = ".meta"
print = true
json = false

[template]
file = "envset.example"
path = "."

[restart]
enabled = false
forever = false
max_restarts = 3
ignore = []
"#;

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Environment file name searched for upward.
    pub filename: String,
    pub isolated: bool,
    pub expand: bool,
    /// Key that receives the selected environment name.
    pub export_env_name: String,
    /// Sections holding documentation only.
    pub comment_section_names: Vec<String>,
    pub environments: EnvironmentsConfig,
    /// Required keys per environment.
    pub required: BTreeMap<String, Vec<String>>,
    /// Keys skipped by metadata comparison, per environment.
    pub ignored: BTreeMap<String, Vec<String>>,
    pub meta: MetaConfig,
    pub template: TemplateConfig,
    pub restart: RestartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: ".envset".to_string(),
            isolated: true,
            expand: true,
            export_env_name: "APP_ENV".to_string(),
            comment_section_names: vec!["comments".to_string()],
            environments: EnvironmentsConfig::default(),
            required: BTreeMap::new(),
            ignored: BTreeMap::new(),
            meta: MetaConfig::default(),
            template: TemplateConfig::default(),
            restart: RestartConfig::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Whether `name` is a configured environment.
    #[must_use]
    pub fn is_environment(&self, name: &str) -> bool {
        self.environments.names.iter().any(|n| n == name)
    }

    /// Checks that `name` is a configured environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEnvironment` listing the known names.
    pub fn check_environment(&self, name: &str) -> std::result::Result<(), ConfigError> {
        if self.is_environment(name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownEnvironment {
                name: name.to_string(),
                known: self.environments.names.clone(),
            })
        }
    }

    /// Configured required keys for `env` followed by `cli`, without duplicates.
    #[must_use]
    pub fn merge_required(&self, env: &str, cli: &[String]) -> Vec<String> {
        merge_keys(self.required.get(env), cli)
    }

    /// Configured ignored keys for `env` followed by `cli`, without duplicates.
    #[must_use]
    pub fn merge_ignored(&self, env: &str, cli: &[String]) -> Vec<String> {
        merge_keys(self.ignored.get(env), cli)
    }

    /// Whether `env` may be restarted at all.
    #[must_use]
    pub fn restart_for_env(&self, env: &str) -> bool {
        !self.restart.ignore.iter().any(|e| e == env)
    }

    /// Looks up a dotted key path such as `meta.file`.
    ///
    /// Strings are returned bare, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the path does not exist.
    pub fn get(&self, key_path: &str) -> std::result::Result<String, ConfigError> {
        let root = self.to_value()?;
        let value = key_path
            .split('.')
            .try_fold(&root, |value, part| value.get(part))
            .ok_or_else(|| ConfigError::MissingKey {
                key: key_path.to_string(),
            })?;

        Ok(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// All dotted key paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn list_keys(&self) -> std::result::Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        collect_keys(&self.to_value()?, "", &mut keys);
        keys.sort();
        Ok(keys)
    }

    /// Default configuration file contents.
    #[must_use]
    pub const fn default_toml() -> &'static str {
        DEFAULT_RC
    }

    fn to_value(&self) -> std::result::Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            key: String::new(),
            message: e.to_string(),
        })
    }
}

fn merge_keys(configured: Option<&Vec<String>>, cli: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for key in configured.into_iter().flatten().chain(cli) {
        if !merged.contains(key) {
            merged.push(key.clone());
        }
    }
    merged
}

fn collect_keys(value: &Value, prefix: &str, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (name, child) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                collect_keys(child, &path, keys);
            }
        }
        _ if !prefix.is_empty() => keys.push(prefix.to_string()),
        _ => {}
    }
}
