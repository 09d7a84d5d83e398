// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment command implementation.
//!
//! ```text
//! EnvArgs + Config --> RunOptions --+--> no command: print()
//!                                   +--> command:    Controller::run()
//! ```
//!
//! Command-line values win over `.envsetrc`, which wins over built-in
//! defaults.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cli::env::EnvArgs;
use crate::config::Config;
use crate::core::env::AmbientEnv;
use crate::core::ini::DEFAULT_SECTION;
use crate::core::run::{Controller, ReloadSignal, RestartPolicy, RunOptions, print};
use crate::error::Result;

/// Restart policy for `environment`.
///
/// Environments listed in `restart.ignore` never restart. `--forever`
/// lifts the bound, otherwise `--restart` enables up to `--max-restarts`.
#[must_use]
pub fn restart_policy(config: &Config, environment: &str, args: &EnvArgs) -> RestartPolicy {
    if !config.restart_for_env(environment) {
        return RestartPolicy::disabled();
    }
    if args.forever || config.restart.forever {
        return RestartPolicy::forever();
    }
    if args.restart.unwrap_or(config.restart.enabled) {
        RestartPolicy::bounded(args.max_restarts.unwrap_or(config.restart.max_restarts))
    } else {
        RestartPolicy::disabled()
    }
}

/// Merges command-line arguments with configuration.
#[must_use]
pub fn run_options(
    config: &Config,
    environment: &str,
    args: &EnvArgs,
    start_dir: Option<PathBuf>,
) -> RunOptions {
    let (cmd, cmd_args) = args
        .split_command()
        .map_or((None, Vec::new()), |(cmd, rest)| (Some(cmd), rest.to_vec()));

    RunOptions::builder()
        .with_environment(environment)
        .with_filename(
            args.env_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.filename)),
        )
        .maybe_with_start_dir(start_dir)
        .maybe_with_cmd(cmd)
        .with_args(cmd_args)
        .with_isolated(args.isolated.unwrap_or(config.isolated))
        .with_expand(args.expand.unwrap_or(config.expand))
        .with_required(config.merge_required(environment, &args.required))
        .with_inherit(args.inherit.clone())
        .with_export_env_name(
            args.export_env_name
                .clone()
                .unwrap_or_else(|| config.export_env_name.clone()),
        )
        .with_comment_sections(config.comment_section_names.clone())
        .with_restart(restart_policy(config, environment, args))
        .build()
}

/// Main handler for an environment invocation.
///
/// # Errors
///
/// Returns an error if the environment is not configured, cannot be
/// resolved, or the command fails.
pub async fn run_env_command<W: Write>(
    environment: &str,
    args: &EnvArgs,
    config: &Config,
    ambient: Arc<dyn AmbientEnv>,
    reload: &mut ReloadSignal,
    out: &mut W,
) -> Result<()> {
    config.check_environment(environment)?;
    let options = run_options(config, environment, args, None);
    debug!(?options, "environment options");

    if options.cmd().is_none() {
        return print(&options, ambient.as_ref(), out).await;
    }

    let mut controller = Controller::new(options, ambient);
    controller.run(reload).await
}

/// Prints the `DEFAULT` section of `env_file`.
///
/// # Errors
///
/// Returns an error if the file cannot be found or has no usable
/// `DEFAULT` section.
pub async fn run_default_print<W: Write>(
    env_file: &Path,
    config: &Config,
    ambient: &dyn AmbientEnv,
    out: &mut W,
) -> Result<()> {
    let options = RunOptions::builder()
        .with_environment(DEFAULT_SECTION)
        .with_filename(env_file)
        .with_isolated(config.isolated)
        .with_expand(config.expand)
        .with_export_env_name(config.export_env_name.clone())
        .with_comment_sections(config.comment_section_names.clone())
        .build();
    print(&options, ambient, out).await
}
