// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command implementation.

use std::io::Write;

use anyhow::Context;

use crate::cli::rc::{RcArgs, RcSubcommand};
use crate::config::Config;
use crate::error::Result;

/// Main handler for the config command.
///
/// # Errors
///
/// Returns an error for an unknown key or if output cannot be written.
pub fn run_rc_command<W: Write>(args: &RcArgs, config: &Config, out: &mut W) -> Result<()> {
    match &args.subcommand {
        None => write!(out, "{}", Config::default_toml()).context("failed to write output")?,
        Some(RcSubcommand::Get { key }) => {
            let value = config.get(key)?;
            writeln!(out, "{value}").context("failed to write output")?;
        }
        Some(RcSubcommand::List) => {
            for key in config.list_keys()? {
                writeln!(out, "{key}").context("failed to write output")?;
            }
        }
    }
    Ok(())
}
