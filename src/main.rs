// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> .envsetrc --> Command Dispatch
//!   <environment> | Metadata | Template | Config | Version
//! ```

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::CommandFactory;
use envset_rs::cli::env::EnvArgs;
use envset_rs::cli::global::GlobalOptions;
use envset_rs::cli::{self, Cli, Command};
use envset_rs::cmd::env::{run_default_print, run_env_command};
use envset_rs::cmd::metadata::run_metadata_command;
use envset_rs::cmd::rc::run_rc_command;
use envset_rs::cmd::template::run_template_command;
use envset_rs::config::Config;
use envset_rs::config::loader::ConfigLoader;
use envset_rs::core::env::ProcessEnv;
use envset_rs::core::run::ReloadSignal;
use envset_rs::error::{Result, exit_code_for};
use envset_rs::logging::init_logging;
use envset_rs::logging::{LogConfig, LogLevel};

use anyhow::Context;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &Cli) -> Result<()> {
    if matches!(cli.command, Some(Command::Version)) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = load_config(&cli.global, &cwd)?;
    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Command::Version) => Ok(()),
        Some(Command::Metadata(args)) => {
            run_metadata_command(args, &config, &cwd, &mut stdout).await
        }
        Some(Command::Template(args)) => run_template_command(args, &config, &cwd, &mut stdout),
        Some(Command::Config(args)) => run_rc_command(args, &config, &mut stdout),
        Some(Command::Environment(raw)) => {
            let (environment, args) = EnvArgs::parse_external(raw).unwrap_or_else(|e| e.exit());
            let mut reload = ReloadSignal::listen();
            run_env_command(
                &environment,
                &args,
                &config,
                Arc::new(ProcessEnv),
                &mut reload,
                &mut stdout,
            )
            .await
        }
        None => match &cli.env_file {
            Some(env_file) => run_default_print(env_file, &config, &ProcessEnv, &mut stdout).await,
            None => {
                Cli::command()
                    .print_help()
                    .context("failed to print help")?;
                Ok(())
            }
        },
    }
}

fn load_config(global: &GlobalOptions, cwd: &Path) -> Result<Config> {
    let loader = ConfigLoader::discover(global.rc.as_deref(), cwd);
    for path in loader.loaded_files() {
        tracing::debug!(path = %path.display(), "loading configuration");
    }
    loader.build()
}
