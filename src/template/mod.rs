// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Template maintenance.
//!
//! A template (`envset.example`) documents every section and key of an
//! environment file without its values.
//!
//! ```text
//! .envset                    envset.example
//! [development]              [development]
//! # database                 # database
//! DB_URL=postgres://...  ->  DB_URL={{DB_URL}}
//! ```
//!
//! Comments already in the template are kept. Keys the environment file
//! no longer has are removed from the template.

#[cfg(test)]
mod tests;

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::core::ini::Document;
use crate::error::{EnvError, Result};

/// Placeholder value for `key`.
#[must_use]
pub fn placeholder(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Loads the template at `path`. A missing file, or `overwrite`, gives an
/// empty template.
///
/// # Errors
///
/// Returns `EnvError::MalformedFile` if an existing template cannot be
/// parsed.
pub fn load_template(path: &Path, overwrite: bool) -> std::result::Result<Document, EnvError> {
    if overwrite || !path.is_file() {
        debug!(path = %path.display(), overwrite, "starting from an empty template");
        return Ok(Document::new());
    }
    Document::load(path)
}

/// Brings `template` in line with the sections and keys of `source`.
pub fn update_template(source: &Document, template: &mut Document) {
    for section in source.sections() {
        let target = template.section_or_insert(section.name());
        if target.comment().is_empty() {
            target.set_comment(section.comment());
        }

        for entry in section.entries() {
            let key = entry.key();
            if !target.contains_key(key) {
                target.set(key, placeholder(key));
            }
            if let Some(existing) = target.entry_mut(key)
                && existing.comment().is_empty()
            {
                existing.set_comment(entry.comment());
            }
        }

        let stale: Vec<String> = target
            .keys()
            .filter(|key| !section.contains_key(key))
            .map(String::from)
            .collect();
        for key in stale {
            target.remove(&key);
        }
    }
}

/// Writes `template` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save(template: &Document, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    std::fs::write(path, template.render())
        .with_context(|| format!("failed to write template {}", path.display()))?;
    Ok(())
}
