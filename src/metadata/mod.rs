// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata files: hashed snapshots of an environment file.
//!
//! ```text
//! .envset ---> Document ---> generate() ---> MetaFile ---> .meta/metadata.json
//!                               |                               |
//!                       hash::hash_value()              write(): create,
//!                       sha256 or hmac, 50 chars        skip unchanged,
//!                                                       overwrite on request
//!
//! metadata.json (source) --+
//!                          +--> compare::compare_files() --> SectionDiff
//! metadata.json (target) --+                                     |
//!                                                      report::render_*()
//! ```
//!
//! Metadata lets CI detect drift between environment files without
//! committing their values.

pub mod compare;
pub mod hash;
pub mod report;

#[cfg(test)]
mod tests;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::core::ini::Document;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::MetadataError;

pub use compare::{DiffEntry, DiffStatus, SectionDiff, compare_files, compare_sections};
pub use hash::{Algorithm, hash_value};

/// One hashed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaKey {
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub hash: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// One environment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default)]
    pub values: Vec<MetaKey>,
}

impl MetaSection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            values: Vec::new(),
        }
    }

    /// Four-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, MetadataError> {
        to_json(self)
    }
}

/// A complete metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub envfile: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    pub algorithm: Algorithm,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub sections: Vec<MetaSection>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl MetaFile {
    /// Reads a metadata file.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Read` or `MetadataError::Parse`.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: display.clone(),
            source,
        })?;
        let mut file: Self = serde_json::from_str(&text).map_err(|source| MetadataError::Parse {
            path: display,
            source,
        })?;
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Path the file was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Looks up a section by name.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::SectionNotFound` if no section has that name.
    pub fn section(&self, name: &str) -> Result<&MetaSection, MetadataError> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| MetadataError::SectionNotFound {
                section: name.to_string(),
                path: self
                    .path
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string()),
            })
    }

    /// Whether the sections of `self` and `other` differ, ignoring dates.
    #[must_use]
    pub fn differs(&self, other: &Self) -> bool {
        if self.algorithm != other.algorithm || self.sections.len() != other.sections.len() {
            return true;
        }
        self.sections.iter().any(|section| {
            other
                .sections
                .iter()
                .find(|o| o.name == section.name)
                .is_none_or(|o| !compare_sections(section, o, &[] as &[&str]).is_empty())
        })
    }

    /// Four-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, MetadataError> {
        to_json(self)
    }
}

/// Options for [`generate`].
#[derive(Debug, Clone, Builder)]
pub struct MetadataOptions {
    /// Environment file name recorded in the output.
    #[builder(setters(name = with_envfile), into, default)]
    envfile: String,

    /// Repository URL recorded in the output.
    #[builder(setters(name = with_project), into, default)]
    project: String,

    /// HMAC secret; plain SHA-256 without one.
    #[builder(setters(name = with_secret), into)]
    secret: Option<String>,

    /// Keep values next to their hashes.
    #[builder(setters(name = with_values), default = false)]
    values: bool,

    /// Include a non-empty `DEFAULT` section.
    #[builder(setters(name = with_globals), default = false)]
    globals: bool,

    #[builder(setters(name = with_comment_sections), default)]
    comment_sections: Vec<String>,

    #[builder(setters(name = with_date), default = Utc::now())]
    date: DateTime<Utc>,
}

/// Builds a metadata snapshot of `doc`.
///
/// # Errors
///
/// Returns `MetadataError::InvalidSecret` if the secret cannot key the HMAC.
pub fn generate(doc: &Document, options: &MetadataOptions) -> Result<MetaFile, MetadataError> {
    let secret = options.secret.as_deref().filter(|s| !s.is_empty());
    let mut sections = Vec::new();

    for section in doc.sections() {
        if section.is_default() && (!options.globals || section.is_empty()) {
            continue;
        }
        if options.comment_sections.iter().any(|c| c == section.name()) {
            continue;
        }

        let mut meta = MetaSection::new(section.name());
        meta.comment = section.comment().to_string();
        for entry in section.entries() {
            meta.values.push(MetaKey {
                key: entry.key().to_string(),
                value: if options.values {
                    entry.value().to_string()
                } else {
                    String::new()
                },
                hash: hash_value(entry.value(), secret)?,
                comment: entry.comment().to_string(),
            });
        }
        sections.push(meta);
    }

    Ok(MetaFile {
        envfile: options.envfile.clone(),
        project: options.project.clone(),
        algorithm: Algorithm::for_secret(secret),
        date: options.date,
        sections,
        path: None,
    })
}

/// What [`write`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Unchanged,
    Overwritten,
    /// Changed, but overwriting was not allowed.
    Kept,
}

impl std::fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Overwritten => write!(f, "overwritten"),
            Self::Kept => write!(f, "changed, not overwritten"),
        }
    }
}

/// Writes `file` to `path`, creating parent directories.
///
/// An existing file is only replaced when its sections changed and
/// `overwrite` is set.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or parsed, or if
/// the new file cannot be written.
pub fn write(file: &MetaFile, path: &Path, overwrite: bool) -> Result<WriteOutcome, MetadataError> {
    let outcome = if path.exists() {
        let existing = MetaFile::load(path)?;
        if !file.differs(&existing) {
            debug!(path = %path.display(), "metadata unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
        if !overwrite {
            info!(path = %path.display(), "metadata changed, not overwriting");
            return Ok(WriteOutcome::Kept);
        }
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };

    write_atomic(path, file.to_json()?.as_bytes())?;
    info!(path = %path.display(), ?outcome, "metadata written");
    Ok(outcome)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), MetadataError> {
    let write_error = |source: std::io::Error| MetadataError::Write {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_error)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(contents).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, MetadataError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(MetadataError::Serialize)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `remote.origin.url` of the enclosing git repository, empty when there
/// is none.
pub async fn origin_url(cwd: &Path) -> String {
    let Ok(git) = ProcessBuilder::which("git") else {
        return String::new();
    };
    let output = git
        .args(["config", "--get", "remote.origin.url"])
        .cwd(cwd)
        .capture_stdout()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await;

    match output {
        Ok(output) if output.success() => output.stdout().trim().to_string(),
        _ => String::new(),
    }
}
