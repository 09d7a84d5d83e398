// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Write as _;

use super::{Document, Entry, Section};

pub(super) fn render(doc: &Document) -> String {
    let mut out = String::new();

    for section in doc.sections() {
        if section.is_default() && section.is_empty() && section.comment().is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        render_section(&mut out, section);
    }

    out
}

fn render_section(out: &mut String, section: &Section) {
    render_comment(out, section.comment());
    if !section.is_default() {
        let _ = writeln!(out, "[{}]", section.name());
    }
    for entry in section.entries() {
        render_entry(out, entry);
    }
}

fn render_entry(out: &mut String, entry: &Entry) {
    render_comment(out, entry.comment());
    let _ = writeln!(out, "{}={}", entry.key(), quote_value(entry.value()));
}

fn render_comment(out: &mut String, comment: &str) {
    if comment.is_empty() {
        return;
    }
    for line in comment.lines() {
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            let _ = writeln!(out, "# {line}");
        }
    }
}

/// Quotes values the parser would otherwise trim or cut short.
fn quote_value(value: &str) -> String {
    let needs_quotes = value != value.trim() || value.contains(" #") || value.contains(" ;");
    if needs_quotes && !value.contains('"') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
