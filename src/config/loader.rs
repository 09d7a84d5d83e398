// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::discover(--rc, cwd)
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, RC_FILENAME};
use crate::core::section::finder::find_upward;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from TOML sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            files: Vec::new(),
        }
    }

    /// Loader for the file named by `--rc`, or else the first `.envsetrc`
    /// found upward from `start`. With neither, defaults apply.
    #[must_use]
    pub fn discover(explicit: Option<&Path>, start: &Path) -> Self {
        let loader = Self::new();
        if let Some(path) = explicit {
            return loader.add_toml_file(path);
        }
        match find_upward(Path::new(RC_FILENAME), start) {
            Ok(path) => {
                debug!(path = %path.display(), "found configuration file");
                loader.add_toml_file(path)
            }
            Err(_) => {
                debug!("no {RC_FILENAME} found, using defaults");
                loader
            }
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(p.to_path_buf());
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(p.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push(PathBuf::from("<string>"));
        self
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if a required file is missing, has
    /// invalid TOML syntax, or does not match the `Config` structure.
    pub fn build(self) -> Result<Config> {
        let origin = self.describe();
        let parse_error = |e: config::ConfigError| ConfigError::ParseError {
            path: origin.clone(),
            message: e.to_string(),
        };

        let cfg = self.builder.build().map_err(parse_error)?;
        let config: Config = cfg.try_deserialize().map_err(parse_error)?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }

    fn describe(&self) -> String {
        if self.files.is_empty() {
            "<defaults>".to_string()
        } else {
            self.files
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
