// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Template command arguments.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `template` command.
#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// Only print the contents to stdout, don't write the file.
    #[arg(long)]
    pub print: bool,

    /// Template file name.
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Directory of the template file.
    #[arg(long, value_name = "PATH")]
    pub filepath: Option<PathBuf>,

    /// Load the environment from FILE.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Start from an empty template, dropping manual edits.
    #[arg(long)]
    pub overwrite: bool,
}
