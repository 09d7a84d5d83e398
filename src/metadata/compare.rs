// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Section comparison.
//!
//! ```text
//! source key  target key   status
//! ----------  ----------   ---------
//!   A=h1        A=h2       Different
//!   B=h1        -          Extra       (extra in source)
//!   -           C=h1       Missing     (missing in source)
//!   D=h1        D=h1       (equal, not reported)
//! ```

use std::collections::HashSet;

use super::{MetaFile, MetaKey, MetaSection};
use crate::error::MetadataError;

/// How a key differs between source and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiffStatus {
    Different,
    Extra,
    Missing,
}

impl DiffStatus {
    /// Comment stored on the key in JSON output.
    #[must_use]
    pub const fn comment(self) -> &'static str {
        match self {
            Self::Different => "different hash value",
            Self::Extra => "extra in source",
            Self::Missing => "missing in source",
        }
    }
}

/// One differing key. The hash is taken from the side that has the key,
/// the source for `Different`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub key: String,
    pub hash: String,
    pub status: DiffStatus,
}

/// Differences of one section between two metadata files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDiff {
    pub name: String,
    pub entries: Vec<DiffEntry>,
}

impl SectionDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with `status`, in comparison order.
    pub fn with_status(&self, status: DiffStatus) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }

    /// The diff as a metadata section, each key commented with its status.
    #[must_use]
    pub fn to_section(&self) -> MetaSection {
        MetaSection {
            name: self.name.clone(),
            comment: String::new(),
            values: self
                .entries
                .iter()
                .map(|e| MetaKey {
                    key: e.key.clone(),
                    value: String::new(),
                    hash: e.hash.clone(),
                    comment: e.status.comment().to_string(),
                })
                .collect(),
        }
    }
}

/// Compares `source` against `target`, skipping `ignored` keys.
///
/// Source keys are reported first in source order, then keys only the
/// target has.
#[must_use]
pub fn compare_sections<S: AsRef<str>>(
    source: &MetaSection,
    target: &MetaSection,
    ignored: &[S],
) -> SectionDiff {
    let ignored: HashSet<&str> = ignored.iter().map(AsRef::as_ref).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for key in source.values.iter().filter(|k| !ignored.contains(k.key.as_str())) {
        seen.insert(&key.key);
        match target.values.iter().find(|t| t.key == key.key) {
            Some(other) if other.hash != key.hash => entries.push(DiffEntry {
                key: key.key.clone(),
                hash: key.hash.clone(),
                status: DiffStatus::Different,
            }),
            Some(_) => {}
            None => entries.push(DiffEntry {
                key: key.key.clone(),
                hash: key.hash.clone(),
                status: DiffStatus::Extra,
            }),
        }
    }

    for key in &target.values {
        if ignored.contains(key.key.as_str()) || seen.contains(key.key.as_str()) {
            continue;
        }
        entries.push(DiffEntry {
            key: key.key.clone(),
            hash: key.hash.clone(),
            status: DiffStatus::Missing,
        });
    }

    SectionDiff {
        name: source.name.clone(),
        entries,
    }
}

/// Compares section `name` of two metadata files.
///
/// # Errors
///
/// Returns `MetadataError::WrongAlgorithm` if the files were hashed
/// differently, or `MetadataError::SectionNotFound` if either file lacks
/// the section.
pub fn compare_files<S: AsRef<str>>(
    source: &MetaFile,
    target: &MetaFile,
    name: &str,
    ignored: &[S],
) -> Result<SectionDiff, MetadataError> {
    if source.algorithm != target.algorithm {
        return Err(MetadataError::WrongAlgorithm {
            source_algorithm: source.algorithm.to_string(),
            target_algorithm: target.algorithm.to_string(),
        });
    }
    let diff = compare_sections(source.section(name)?, target.section(name)?, ignored);
    Ok(diff)
}
