// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Section loading.
//!
//! ```text
//! SectionLoader::load("development")
//!        |
//!        v
//!   find_upward(filename) ---------> FileNotFound
//!        |
//!        v
//!   Document::load() --------------> MalformedFile
//!        |
//!        v
//!   section("development") --------> SectionNotFound
//!        |                           (missing, empty DEFAULT,
//!        v                            or empty while isolated)
//!   EnvMap + export name key
//!   (APP_ENV=development, replaces any existing value)
//! ```

pub mod finder;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use bon::Builder;
use tracing::{debug, warn};

use crate::core::env::EnvMap;
use crate::core::ini::{DEFAULT_SECTION, Document};
use crate::error::EnvError;

pub use finder::{find_from_cwd, find_upward};

/// Key that receives the active environment name unless configured otherwise.
pub const DEFAULT_EXPORT_ENV_NAME: &str = "APP_ENV";

/// Default environment file name.
pub const DEFAULT_FILENAME: &str = ".envset";

/// Loads one named section of an environment file.
#[derive(Debug, Clone, Builder)]
pub struct SectionLoader {
    #[builder(setters(name = with_filename), into, default = PathBuf::from(DEFAULT_FILENAME))]
    filename: PathBuf,
    /// Directory the upward search starts from (default: working directory).
    #[builder(setters(name = with_start_dir), into)]
    start_dir: Option<PathBuf>,
    #[builder(setters(name = with_isolated), default = true)]
    isolated: bool,
    #[builder(setters(name = with_export_env_name), into, default = DEFAULT_EXPORT_ENV_NAME.to_string())]
    export_env_name: String,
    /// Sections that hold documentation rather than an environment.
    #[builder(setters(name = with_comment_sections), default)]
    comment_sections: Vec<String>,
}

impl Default for SectionLoader {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SectionLoader {
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    #[must_use]
    pub const fn isolated(&self) -> bool {
        self.isolated
    }

    #[must_use]
    pub fn export_env_name(&self) -> &str {
        &self.export_env_name
    }

    /// Finds the environment file on the upward search path.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FileNotFound` if no file is found.
    pub fn locate(&self) -> Result<PathBuf, EnvError> {
        match &self.start_dir {
            Some(dir) => find_upward(&self.filename, dir),
            None => find_from_cwd(&self.filename),
        }
    }

    /// Finds and parses the environment file.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FileNotFound` or `EnvError::MalformedFile`.
    pub fn load_document(&self) -> Result<(PathBuf, Document), EnvError> {
        let path = self.locate()?;
        debug!(file = %path.display(), "loading environment file");
        let doc = Document::load(&path)?;
        Ok((path, doc))
    }

    /// Loads the raw, unexpanded keys of `environment`.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FileNotFound`, `EnvError::MalformedFile`, or
    /// `EnvError::SectionNotFound` when the section is missing, is an empty
    /// `DEFAULT` section, or is empty while running isolated.
    pub fn load(&self, environment: &str) -> Result<EnvMap, EnvError> {
        let (_, doc) = self.load_document()?;
        self.select(&doc, environment)
    }

    /// Selects `environment` from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::SectionNotFound` under the same rules as [`Self::load`].
    pub fn select(&self, doc: &Document, environment: &str) -> Result<EnvMap, EnvError> {
        let Some(section) = doc.section(environment) else {
            return Err(self.section_not_found(doc, environment));
        };

        if section.is_empty() && (self.isolated || environment == DEFAULT_SECTION) {
            let err = self.section_not_found(doc, environment);
            warn!(section = %environment, "section is empty");
            return Err(err);
        }

        let mut env = EnvMap::from_section(section);
        if !self.export_env_name.is_empty() {
            env.set(self.export_env_name.as_str(), environment);
        }
        Ok(env)
    }

    /// Names of sections that can be used as environments.
    #[must_use]
    pub fn available_sections(&self, doc: &Document) -> Vec<String> {
        doc.section_names()
            .filter(|name| *name != DEFAULT_SECTION)
            .filter(|name| !self.comment_sections.iter().any(|c| c == name))
            .map(str::to_string)
            .collect()
    }

    fn section_not_found(&self, doc: &Document, environment: &str) -> EnvError {
        EnvError::SectionNotFound {
            section: environment.to_string(),
            available: self.available_sections(doc),
        }
    }
}
