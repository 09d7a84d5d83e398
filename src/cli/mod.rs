// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envset [global options] <command>
//! <environment> [options] [-- cmd args...]   any name in .envsetrc
//! metadata [compare]
//! template
//! config {get|list}                          alias: rc
//! version
//! envset --env-file FILE                     print the DEFAULT section
//! ```

pub mod env;
pub mod global;
pub mod metadata;
pub mod rc;
pub mod template;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::cli::global::GlobalOptions;
use crate::cli::metadata::MetadataArgs;
use crate::cli::rc::RcArgs;
use crate::cli::template::TemplateArgs;
use clap::{Parser, Subcommand};

/// Environment Loader and Command Runner
///
/// Loads a named section of an INI file and prints it or runs a command
/// with it.
#[derive(Debug, Parser)]
#[command(
    name = "envset",
    author,
    version,
    about = "Load environment variables from an INI file and run a command",
    long_about = "envset-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Loads a named section of an INI file (.envset by default,\n\
                  searched upward from the working directory), resolves\n\
                  ${VAR} and $(command) references, and prints the result\n\
                  or runs a command with it.",
    after_help = "EXAMPLES:\n\n\
                  \x20   envset development -- node index.js\n\
                  \x20   eval \"$(envset development --isolated=true)\"\n\
                  \x20   envset development -- say '${MY_GREETING}'\n\n\
                  Environment names are configured in .envsetrc under\n\
                  [environments] names."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Print the DEFAULT section of FILE when no command is given.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Generates or compares metadata files.
    Metadata(MetadataArgs),

    /// Creates or updates the template file.
    Template(TemplateArgs),

    /// Shows configuration.
    #[command(visible_alias = "rc")]
    Config(RcArgs),

    /// Any configured environment name.
    #[command(external_subcommand)]
    Environment(Vec<String>),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
