// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented INI parser.
//!
//! ```text
//! for each line:
//!   blank            --> skip
//!   # or ; comment   --> buffer, attach to next key/header
//!   [name]           --> switch section (repeated headers merge)
//!   [unclosed        --> warn, skip
//!   KEY=VALUE        --> set in current section (last one wins)
//!   anything else    --> MalformedFile
//! ```

use tracing::warn;

use super::{DEFAULT_SECTION, Document};
use crate::error::EnvError;

pub(super) fn parse(text: &str, origin: &str) -> Result<Document, EnvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut doc = Document::new();
    let mut current = DEFAULT_SECTION.to_string();
    let mut pending_comment: Vec<&str> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#').or_else(|| line.strip_prefix(';')) {
            pending_comment.push(comment.trim());
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.split_once(']').map(|(name, _)| name.trim()) else {
                warn!(file = %origin, line = line_number, "skipping unclosed section header");
                pending_comment.clear();
                continue;
            };
            if name.is_empty() {
                warn!(file = %origin, line = line_number, "skipping empty section header");
                pending_comment.clear();
                continue;
            }

            current = name.to_string();
            let section = doc.section_or_insert(&current);
            if !pending_comment.is_empty() && section.comment().is_empty() {
                section.set_comment(pending_comment.join("\n"));
            }
            pending_comment.clear();
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(malformed(origin, line_number, raw_line));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed(origin, line_number, raw_line));
        }

        let entry = doc.section_or_insert(&current).set(key, parse_value(value));
        if !pending_comment.is_empty() {
            entry.set_comment(pending_comment.join("\n"));
        }
        pending_comment.clear();
    }

    Ok(doc)
}

fn malformed(origin: &str, line_number: usize, line: &str) -> EnvError {
    EnvError::MalformedFile {
        path: origin.to_string(),
        line_number,
        line: line.to_string(),
    }
}

/// Trims a raw value, strips matching surrounding quotes, and drops an
/// inline `#`/`;` comment preceded by whitespace from unquoted values.
fn parse_value(raw: &str) -> String {
    let value = raw.trim();

    for quote in ['"', '\'', '`'] {
        if let Some(inner) = value.strip_prefix(quote)
            && let Some(end) = inner.find(quote)
        {
            return inner[..end].to_string();
        }
    }

    strip_inline_comment(value).trim_end().to_string()
}

fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if (*byte == b'#' || *byte == b';') && index > 0 && bytes[index - 1].is_ascii_whitespace()
        {
            return &value[..index];
        }
    }
    value
}
