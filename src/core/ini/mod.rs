// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! INI document model.
//!
//! ```text
//! Document
//!   sections: [DEFAULT, development, production, ...]
//!       |
//!       v
//!   Section { name, comment, entries }
//!       |
//!       v
//!   Entry { key, value, comment }
//!
//! parse(text) --> Document --> render() --> text
//! ```
//!
//! The `DEFAULT` section always exists and always comes first. Keys that
//! appear before any header belong to it, as does an explicit `[DEFAULT]`.

mod parser;
mod render;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::error::EnvError;

/// Name of the section holding keys that appear before any header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A single `KEY=VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
    comment: String,
}

impl Entry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: String::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Comment lines written directly above the key, without markers.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }
}

/// A bracketed section and its keys, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    comment: String,
    entries: Vec<Entry>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::key)
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(Entry::value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Sets `key` to `value`, keeping its position when it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Entry {
        let key = key.into();
        let value = value.into();
        let index = match self.entries.iter().position(|e| e.key == key) {
            Some(index) => {
                self.entries[index].value = value;
                index
            }
            None => {
                self.entries.push(Entry::new(key, value));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Removes `key`, returning its entry if it existed.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true for the implicit `DEFAULT` section.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SECTION
    }
}

/// A parsed INI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty `DEFAULT` section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: vec![Section::new(DEFAULT_SECTION)],
        }
    }

    /// Parses INI text. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::MalformedFile` for a key line without `=`.
    pub fn parse(text: &str, origin: &str) -> Result<Self, EnvError> {
        parser::parse(text, origin)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FileNotFound` if the file cannot be read and
    /// `EnvError::MalformedFile` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, EnvError> {
        let text = std::fs::read_to_string(path).map_err(|_| EnvError::FileNotFound {
            name: path.display().to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Renders the document back to INI text.
    #[must_use]
    pub fn render(&self) -> String {
        render::render(self)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section names in file order, `DEFAULT` first.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    /// Returns the `DEFAULT` section.
    #[must_use]
    pub fn default_section(&self) -> &Section {
        // The constructor and parser both guarantee index 0 is DEFAULT.
        &self.sections[0]
    }

    /// Returns the section called `name`, appending it if missing.
    pub fn section_or_insert(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }
}
