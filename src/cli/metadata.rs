// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata command arguments.
//!
//! ```text
//! metadata [--print] [--values] [--globals] [--secret S]
//!   -> hash every section into .meta/metadata.json
//! metadata compare --section S [source] target
//!   -> exit 1 when the section differs
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Subcommand};

/// Arguments for the `metadata` command.
#[derive(Debug, Clone, Args)]
pub struct MetadataArgs {
    #[command(subcommand)]
    pub subcommand: Option<MetadataSubcommand>,

    /// Only print the contents to stdout, don't write the file.
    #[arg(long)]
    pub print: bool,

    /// Metadata file name.
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Directory of the metadata file.
    #[arg(long, value_name = "PATH")]
    pub filepath: Option<PathBuf>,

    /// Load the environment from FILE.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Replace an existing metadata file when it changed.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_value_t = true, default_missing_value = "true", value_name = "BOOL")]
    pub overwrite: bool,

    /// Keep values next to their hashes.
    #[arg(long)]
    pub values: bool,

    /// Include the global section.
    #[arg(long)]
    pub globals: bool,

    /// Password used to key the value hashes.
    #[arg(long, env = "ENVSET_HASH_SECRET", hide_env_values = true, value_name = "PASSWORD")]
    pub secret: Option<String>,
}

/// Metadata subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum MetadataSubcommand {
    /// Compares one section of two metadata files.
    Compare(CompareArgs),
}

/// Arguments for `metadata compare`.
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Section to compare.
    #[arg(short = 's', long, required = true)]
    pub section: String,

    /// Print the comparison results.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_missing_value = "true", value_name = "BOOL")]
    pub print: Option<bool>,

    /// Print the comparison results as JSON.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_missing_value = "true", value_name = "BOOL")]
    pub json: Option<bool>,

    /// Key to leave out of the comparison. Can repeat.
    #[arg(short = 'I', long = "ignore", value_name = "KEY", action = ArgAction::Append)]
    pub ignore: Vec<String>,

    /// `[source] target`; the source defaults to the configured metadata file.
    #[arg(value_name = "FILE", num_args = 1..=2, required = true)]
    pub files: Vec<PathBuf>,
}
