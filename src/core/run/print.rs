// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Print path: resolve a section and render it for `eval`.
//!
//! ```text
//! resolve(options)      (same resolution as the run path)
//!      |
//!      v
//! not isolated? --> ambient KEY=VALUE lines first
//!      |
//!      v
//! resolved KEY=VALUE lines, "quoted" when the value has whitespace
//! ```

use std::io::Write;

use anyhow::Context;
use tracing::warn;

use super::options::RunOptions;
use crate::core::env::{AmbientEnv, EnvMap};
use crate::core::interpolate::ExpandReport;
use crate::error::{EnvError, Result};

/// Loads and expands the section named by `options`.
///
/// # Errors
///
/// Returns any `EnvError` raised by the section loader or by a failed
/// `$(command)` substitution.
pub async fn resolve(
    options: &RunOptions,
    ambient: &dyn AmbientEnv,
) -> std::result::Result<(EnvMap, ExpandReport), EnvError> {
    let mut env = options.section_loader().load(options.environment())?;
    let report = env.expand(options.os_expand_values(), ambient).await?;
    Ok((env, report))
}

/// Logs the keys whose `${NAME}` references were left unexpanded.
pub fn warn_unresolved(report: &ExpandReport) {
    if !report.is_clean() {
        let keys: Vec<&str> = report.unresolved().map(|(key, _)| key).collect();
        warn!(keys = ?keys, "some values were left unexpanded");
    }
}

/// Renders the print path output.
#[must_use]
pub fn render(env: &EnvMap, isolated: bool, ambient: &dyn AmbientEnv) -> String {
    let mut out = String::new();

    if !isolated {
        let mut vars = ambient.vars();
        vars.sort();
        for (key, value) in vars {
            out.push_str(&key);
            out.push('=');
            out.push_str(&value);
            out.push('\n');
        }
    }

    for (key, value) in env.iter() {
        out.push_str(key);
        out.push('=');
        if value.chars().any(char::is_whitespace) {
            out.push('"');
            out.push_str(value);
            out.push('"');
        } else {
            out.push_str(value);
        }
        out.push('\n');
    }

    out
}

/// Resolves the section and writes it to `writer`.
///
/// Required keys are not checked here.
///
/// # Errors
///
/// Returns an error if resolution fails or `writer` cannot be written.
pub async fn print<W: Write>(
    options: &RunOptions,
    ambient: &dyn AmbientEnv,
    writer: &mut W,
) -> Result<()> {
    let (env, report) = resolve(options, ambient).await?;
    warn_unresolved(&report);
    writer
        .write_all(render(&env, options.isolated(), ambient).as_bytes())
        .context("failed to write environment")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}
