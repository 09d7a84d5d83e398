// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of an environment invocation.
//!
//! ```text
//! envset development --isolated=false -R DB_URL -- node app.js
//!        ^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^    ^^^^^^^^^^^
//!        name        EnvArgs options                command
//! ```
//!
//! Environment names come from `.envsetrc`, so they reach the binary as
//! an external subcommand and are parsed here in a second pass.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Options for running or printing one environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "envset <environment>",
    about = "Load an environment and print it or run a command with it",
    disable_version_flag = true
)]
pub struct EnvArgs {
    /// Run with only the variables defined in the file.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_missing_value = "true", value_name = "BOOL")]
    pub isolated: Option<bool>,

    /// Expand `$VAR` references against the calling environment.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_missing_value = "true", value_name = "BOOL")]
    pub expand: Option<bool>,

    /// File with environment definitions, searched upward.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Key that must resolve to a non-empty value. Can repeat.
    #[arg(short = 'R', long = "required", value_name = "KEY", action = ArgAction::Append)]
    pub required: Vec<String>,

    /// Name of the exported variable holding the environment name.
    #[arg(short = 'N', long = "export-env-name", value_name = "NAME")]
    pub export_env_name: Option<String>,

    /// Variable to inherit from the calling shell in isolated mode. Can repeat.
    #[arg(short = 'I', long = "inherit", value_name = "KEY", action = ArgAction::Append)]
    pub inherit: Vec<String>,

    /// Re-run the command when it exits with an error.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
        default_missing_value = "true", value_name = "BOOL")]
    pub restart: Option<bool>,

    /// Re-run the command on every failure, without bound.
    #[arg(long)]
    pub forever: bool,

    /// Times to restart a failed command.
    #[arg(long = "max-restarts", alias = "max-restart", value_name = "N")]
    pub max_restarts: Option<u64>,

    /// Command to run, after `--`.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl EnvArgs {
    /// Parses the external subcommand captured for an environment, whose
    /// first element is the environment name.
    ///
    /// # Errors
    ///
    /// Returns a `clap::Error` for invalid options or when help was requested.
    pub fn parse_external(raw: &[String]) -> Result<(String, Self), clap::Error> {
        let name = raw.first().cloned().unwrap_or_default();
        let args = Self::try_parse_from(raw)?;
        Ok((name, args))
    }

    /// Program and arguments after `--`, if any.
    #[must_use]
    pub fn split_command(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(cmd, args)| (cmd.as_str(), args))
    }
}
