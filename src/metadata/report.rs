// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Human readable compare reports.
//!
//! ```text
//! source: .meta/metadata.json
//! target: ci/metadata.json
//!
//! missing in source (1)
//!   STATUS     KEY      HASH
//!   missing    API_KEY  9f86d081884c...
//! ...
//! summary: 1 missing, 0 extra, 0 different
//! ```

use std::fmt::Write as _;

use super::compare::{DiffEntry, DiffStatus, SectionDiff};

/// Hashes are shortened to this many characters in tables.
const HASH_PREVIEW: usize = 12;

/// Report for a comparison that found differences.
#[must_use]
pub fn render_report(diff: &SectionDiff, source: &str, target: &str) -> String {
    let mut out = header(source, target);

    let groups = [
        (DiffStatus::Missing, "missing", "source is not missing any keys"),
        (DiffStatus::Extra, "extra", "target has no extra keys"),
        (DiffStatus::Different, "different", "all keys have the same values"),
    ];

    for (status, label, none) in groups {
        let entries: Vec<&DiffEntry> = diff.with_status(status).collect();
        let _ = writeln!(out, "\n{} ({})", status.comment(), entries.len());
        if entries.is_empty() {
            let _ = writeln!(out, "  {none}");
        } else {
            out.push_str(&table(&entries, label));
        }
    }

    let _ = writeln!(
        out,
        "\nsummary: {} missing, {} extra, {} different",
        diff.with_status(DiffStatus::Missing).count(),
        diff.with_status(DiffStatus::Extra).count(),
        diff.with_status(DiffStatus::Different).count(),
    );
    out
}

/// Report for a comparison without differences.
#[must_use]
pub fn render_ok(source: &str, target: &str) -> String {
    let mut out = header(source, target);
    out.push_str("\nall good\n");
    out
}

fn header(source: &str, target: &str) -> String {
    format!("source: {source}\ntarget: {target}\n")
}

fn table(entries: &[&DiffEntry], label: &str) -> String {
    let status_width = label.len().max("STATUS".len());
    let key_width = entries
        .iter()
        .map(|e| e.key.len())
        .chain(std::iter::once("KEY".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "  {:<status_width$}  {:<key_width$}  HASH", "STATUS", "KEY");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<status_width$}  {:<key_width$}  {}",
            label,
            entry.key,
            preview(&entry.hash)
        );
    }
    out
}

fn preview(hash: &str) -> String {
    match hash.get(..HASH_PREVIEW) {
        Some(head) if hash.len() > HASH_PREVIEW => format!("{head}..."),
        _ => hash.to_string(),
    }
}
